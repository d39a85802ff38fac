//! Callbacks run once all prompts are answered

use crate::config::ConfigBuilder;
use crate::error::GeneratorError;
use crate::manifest::Manifest;
use crate::prompt::AnswerMap;
use std::fmt;
use tracing::debug;

type CallbackFn =
    Box<dyn FnMut(&AnswerMap, &mut CallbackContext<'_>) -> anyhow::Result<()> + Send>;

/// What a callback may touch while it runs
pub struct CallbackContext<'a> {
    plugin_id: &'a str,
    plugins: &'a [String],
    config: &'a mut ConfigBuilder,
    manifest: &'a mut Manifest,
}

impl<'a> CallbackContext<'a> {
    pub fn new(
        plugin_id: &'a str,
        plugins: &'a [String],
        config: &'a mut ConfigBuilder,
        manifest: &'a mut Manifest,
    ) -> Self {
        Self {
            plugin_id,
            plugins,
            config,
            manifest,
        }
    }

    /// Id of the plugin that registered the running callback
    pub fn plugin_id(&self) -> &str {
        self.plugin_id
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p == id)
    }

    pub fn config(&mut self) -> &mut ConfigBuilder {
        &mut *self.config
    }

    pub fn manifest(&mut self) -> &mut Manifest {
        &mut *self.manifest
    }
}

struct Registered {
    plugin: String,
    callback: CallbackFn,
}

/// Ordered list of callbacks contributed by plugins
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Registered>,
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.callbacks.iter().map(|c| &c.plugin))
            .finish()
    }
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_callback<F>(&mut self, plugin: &str, callback: F)
    where
        F: FnMut(&AnswerMap, &mut CallbackContext<'_>) -> anyhow::Result<()> + Send + 'static,
    {
        self.callbacks.push(Registered {
            plugin: plugin.to_string(),
            callback: Box::new(callback),
        });
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Run every callback in registration order against the same answers.
    ///
    /// Stops at the first failure; mutations made by earlier callbacks stay.
    pub fn run_all(
        &mut self,
        answers: &AnswerMap,
        plugins: &[String],
        config: &mut ConfigBuilder,
        manifest: &mut Manifest,
    ) -> Result<(), GeneratorError> {
        for (index, registered) in self.callbacks.iter_mut().enumerate() {
            debug!(plugin = %registered.plugin, index, "running callback");
            let mut ctx =
                CallbackContext::new(&registered.plugin, plugins, &mut *config, &mut *manifest);
            (registered.callback)(answers, &mut ctx).map_err(|source| {
                GeneratorError::Callback {
                    plugin: registered.plugin.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn run(
        registry: &mut CallbackRegistry,
        answers: &AnswerMap,
    ) -> (Result<(), GeneratorError>, Manifest) {
        let mut config = ConfigBuilder::new();
        let mut manifest = Manifest::new();
        let result = registry.run_all(answers, &[], &mut config, &mut manifest);
        (result, manifest)
    }

    #[test]
    fn test_runs_in_registration_order_with_same_answers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = CallbackRegistry::new();
        for id in ["a", "b", "c"] {
            let seen = Arc::clone(&seen);
            registry.add_callback(id, move |answers, ctx| {
                seen.lock().unwrap().push((ctx.plugin_id().to_string(), answers.clone()));
                Ok(())
            });
        }

        let answers = AnswerMap::new().with("name", "demo");
        let (result, _) = run(&mut registry, &answers);
        result.unwrap();

        let seen = seen.lock().unwrap();
        let order: Vec<&str> = seen.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(seen.iter().all(|(_, a)| *a == answers));
    }

    #[test]
    fn test_failure_stops_remaining_callbacks() {
        let mut registry = CallbackRegistry::new();
        registry.add_callback("first", |_, ctx| {
            ctx.manifest().set("first", true);
            Ok(())
        });
        registry.add_callback("second", |_, _| anyhow::bail!("boom"));
        registry.add_callback("third", |_, ctx| {
            ctx.manifest().set("third", true);
            Ok(())
        });

        let (result, manifest) = run(&mut registry, &AnswerMap::new());
        match result {
            Err(GeneratorError::Callback { plugin, source }) => {
                assert_eq!(plugin, "second");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(manifest.get("first").is_some());
        assert!(manifest.get("third").is_none());
    }

    #[test]
    fn test_empty_registry_is_noop() {
        let mut registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        let (result, manifest) = run(&mut registry, &AnswerMap::new());
        result.unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_context_has_plugin() {
        let mut registry = CallbackRegistry::new();
        registry.add_callback("a", |_, ctx| {
            if ctx.has_plugin("b") {
                ctx.config().set("withB", true);
            }
            Ok(())
        });

        let mut config = ConfigBuilder::new();
        let mut manifest = Manifest::new();
        let plugins = vec!["a".to_string(), "b".to_string()];
        registry
            .run_all(&AnswerMap::new(), &plugins, &mut config, &mut manifest)
            .unwrap();
        assert!(config.get("withB").is_some());
    }
}
