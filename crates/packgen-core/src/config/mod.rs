//! Build configuration emitted as `webpack.config.js`

pub mod builder;
pub mod js;

pub use builder::{ConfigBuilder, Loader, Rule, WebpackPlugin};
pub use js::JsExpr;
