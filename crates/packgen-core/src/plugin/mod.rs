//! Plugins and the API they receive during installation
//!
//! A plugin only registers things: prompts, callbacks, and initial
//! config/manifest mutations. Nothing is asked of the user until
//! [`Generator::create`](crate::Generator::create).

pub mod api;
pub mod declarative;
pub(crate) mod loader;

pub use api::PluginApi;
pub use declarative::{load_plugin_dir, DeclarativePlugin};

/// A unit of scaffolding logic installed once per generator
pub trait Plugin {
    /// Identity used for diagnostics and `has_plugin` lookups
    fn id(&self) -> &str;

    /// Register prompts, callbacks, and mutations
    fn apply(&self, api: &mut PluginApi<'_>) -> anyhow::Result<()>;
}

/// A plugin backed by a closure
pub struct FnPlugin<F> {
    id: String,
    apply: F,
}

impl<F> FnPlugin<F>
where
    F: Fn(&mut PluginApi<'_>) -> anyhow::Result<()>,
{
    pub fn new(id: impl Into<String>, apply: F) -> Self {
        Self {
            id: id.into(),
            apply,
        }
    }
}

impl<F> Plugin for FnPlugin<F>
where
    F: Fn(&mut PluginApi<'_>) -> anyhow::Result<()>,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, api: &mut PluginApi<'_>) -> anyhow::Result<()> {
        (self.apply)(api)
    }
}

/// Box a closure as a plugin
pub fn plugin<F>(id: impl Into<String>, apply: F) -> Box<dyn Plugin>
where
    F: Fn(&mut PluginApi<'_>) -> anyhow::Result<()> + 'static,
{
    Box::new(FnPlugin::new(id, apply))
}
