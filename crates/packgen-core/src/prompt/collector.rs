//! Accumulates preset and module prompts contributed by plugins

use super::spec::{Choice, PromptSpec};
use tracing::warn;

/// Name of the synthesized module-selection checkbox
pub const MODULE_PROMPT_NAME: &str = "module";

/// Message of the synthesized module-selection checkbox
pub const MODULE_PROMPT_MESSAGE: &str = "Select the features you need:";

/// An item stamped with the plugin that registered it
#[derive(Debug, Clone)]
struct Registered<T> {
    plugin: String,
    item: T,
}

/// Prompts gathered during plugin installation
#[derive(Debug, Default)]
pub struct PromptCollector {
    presets: Vec<Registered<PromptSpec>>,
    modules: Vec<Registered<Choice>>,
}

impl PromptCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freeform prompt, asked after the module selection
    pub fn add_preset_prompt(&mut self, plugin: &str, spec: PromptSpec) {
        if spec.name == MODULE_PROMPT_NAME {
            warn!(
                plugin,
                "ignoring preset prompt named `{}`: the name is reserved for module selection",
                MODULE_PROMPT_NAME
            );
            return;
        }
        if let Some(existing) = self.presets.iter().find(|p| p.item.name == spec.name) {
            warn!(
                plugin,
                first = %existing.plugin,
                prompt = %spec.name,
                "duplicate preset prompt name; the answer map keeps one value"
            );
        }
        self.presets.push(Registered {
            plugin: plugin.to_string(),
            item: spec,
        });
    }

    /// Append one choice to the module-selection checkbox
    pub fn add_module_prompt(&mut self, plugin: &str, choice: Choice) {
        if let Some(existing) = self.modules.iter().find(|m| m.item.name == choice.name) {
            warn!(
                plugin,
                first = %existing.plugin,
                module = %choice.name,
                "duplicate module prompt name"
            );
        }
        self.modules.push(Registered {
            plugin: plugin.to_string(),
            item: choice,
        });
    }

    pub fn preset_count(&self) -> usize {
        self.presets.len()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Plugin that registered the module choice with the given name
    pub fn module_owner(&self, name: &str) -> Option<&str> {
        self.modules
            .iter()
            .find(|m| m.item.name == name)
            .map(|m| m.plugin.as_str())
    }

    /// The combined prompt list for one session: the module checkbox first,
    /// then the preset prompts in registration order.
    ///
    /// Builds a fresh list each time; the collector itself is unchanged.
    pub fn build(&self) -> Vec<PromptSpec> {
        let choices = self.modules.iter().map(|m| m.item.clone()).collect();

        let mut prompts = Vec::with_capacity(self.presets.len() + 1);
        prompts.push(PromptSpec::checkbox(
            MODULE_PROMPT_NAME,
            MODULE_PROMPT_MESSAGE,
            choices,
        ));
        prompts.extend(self.presets.iter().map(|p| p.item.clone()));
        prompts
    }
}
