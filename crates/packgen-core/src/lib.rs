//! Packgen Core - plugin-driven project generator
//!
//! A generator installs an ordered list of plugins, asks the user one merged
//! round of prompts, lets every plugin react to the answers, and writes a
//! build configuration (`webpack.config.js`) and a package manifest
//! (`package.json`) into the project directory.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Data** - `ConfigBuilder`, `Manifest`, prompt specs and answers
//! - **Layer 2: Orchestration** - `Generator`, `Plugin` / `PluginApi`, callbacks, `Preset`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompter and `run` flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use packgen_core::{plugin, DefaultPrompter, Generator, GeneratorOptions, Manifest};
//!
//! let plugins = vec![plugin("base", |api| {
//!     api.config().mode("development");
//!     api.manifest().script("build", "webpack");
//!     Ok(())
//! })];
//!
//! let mut generator = Generator::new(
//!     "./my-app",
//!     GeneratorOptions { plugins, manifest: Manifest::named("my-app") },
//! )?;
//! generator.create(&mut DefaultPrompter).await?;
//! ```

pub mod callbacks;
pub mod config;
mod dotted;
pub mod emit;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod plugin;
pub mod preset;
pub mod prompt;
pub mod runtime;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use callbacks::{CallbackContext, CallbackRegistry};
pub use config::{ConfigBuilder, JsExpr, Loader, Rule, WebpackPlugin};
pub use error::GeneratorError;
pub use generator::{CreateOutcome, Generator, GeneratorEvent, GeneratorOptions, GeneratorState};
pub use manifest::Manifest;
pub use plugin::{load_plugin_dir, plugin, DeclarativePlugin, Plugin, PluginApi};
pub use preset::Preset;
pub use prompt::{
    AnswerMap, AnswerValue, Choice, DefaultPrompter, PromptCollector, PromptKind, PromptSpec,
    Prompter, MODULE_PROMPT_NAME,
};
pub use runtime::{detect_package_manager, PackageManager};

#[cfg(feature = "tui")]
pub use tui::{run, ClackPrompter, CreateArgs};
