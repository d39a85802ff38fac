//! The capability object handed to each plugin

use crate::callbacks::CallbackContext;
use crate::config::ConfigBuilder;
use crate::generator::Session;
use crate::manifest::Manifest;
use crate::prompt::{AnswerMap, Choice, PromptSpec};

/// Registration surface bound to one plugin id and one generator session.
///
/// Created fresh for every plugin during installation. Every method only
/// records state in memory; none of them prompts the user.
pub struct PluginApi<'g> {
    id: &'g str,
    plugins: &'g [String],
    session: &'g mut Session,
}

impl<'g> PluginApi<'g> {
    pub(crate) fn new(id: &'g str, plugins: &'g [String], session: &'g mut Session) -> Self {
        Self {
            id,
            plugins,
            session,
        }
    }

    /// Id of the plugin being installed
    pub fn id(&self) -> &str {
        self.id
    }

    /// Whether the generator was given a plugin with this id
    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p == id)
    }

    /// Ask a freeform question after the module selection
    pub fn add_preset_prompt(&mut self, spec: PromptSpec) -> &mut Self {
        self.session.prompts.add_preset_prompt(self.id, spec);
        self
    }

    /// Offer a feature in the module-selection checkbox
    pub fn add_module_prompt(&mut self, choice: Choice) -> &mut Self {
        self.session.prompts.add_module_prompt(self.id, choice);
        self
    }

    /// Run `callback` once every prompt is answered
    pub fn on_answers<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&AnswerMap, &mut CallbackContext<'_>) -> anyhow::Result<()> + Send + 'static,
    {
        self.session.callbacks.add_callback(self.id, callback);
        self
    }

    /// The shared build configuration
    pub fn config(&mut self) -> &mut ConfigBuilder {
        &mut self.session.config
    }

    /// The shared package manifest
    pub fn manifest(&mut self) -> &mut Manifest {
        &mut self.session.manifest
    }
}
