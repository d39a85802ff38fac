//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod prompter;
mod session;

pub use prompter::ClackPrompter;
pub use session::{run, CreateArgs};
