//! Plugins described in YAML instead of code
//!
//! ```yaml
//! id: eslint
//! modules:
//!   - name: eslint
//!     message: ESLint
//! presets:
//!   - name: lint_on_build
//!     type: confirm
//!     message: Run ESLint during builds?
//! actions:
//!   - when: { module: eslint }
//!     dev_dependencies: { eslint: "^9.0.0" }
//!     scripts: { lint: "eslint src" }
//!   - when: { answer: lint_on_build, equals: true }
//!     config: { "stats.errorDetails": true }
//! ```

use super::{Plugin, PluginApi};
use crate::callbacks::CallbackContext;
use crate::prompt::{AnswerMap, AnswerValue, Choice, PromptSpec};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use walkdir::WalkDir;

/// When an action applies. All present fields must match; an empty
/// condition always matches.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    /// The module must be selected in the module checkbox
    #[serde(default)]
    pub module: Option<String>,

    /// The named answer must equal `equals`, or be truthy when `equals` is absent
    #[serde(default)]
    pub answer: Option<String>,

    #[serde(default)]
    pub equals: Option<AnswerValue>,
}

impl Condition {
    pub fn matches(&self, answers: &AnswerMap) -> bool {
        if let Some(module) = &self.module {
            if !answers.has_module(module) {
                return false;
            }
        }
        if let Some(name) = &self.answer {
            let Some(value) = answers.get(name) else {
                return false;
            };
            let matched = match &self.equals {
                Some(expected) => value == expected,
                None => is_truthy(value),
            };
            if !matched {
                return false;
            }
        }
        true
    }
}

fn is_truthy(value: &AnswerValue) -> bool {
    match value {
        AnswerValue::Bool(b) => *b,
        AnswerValue::Text(s) => !s.is_empty(),
        AnswerValue::List(items) => !items.is_empty(),
    }
}

/// Mutations applied after prompting when `when` matches
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Action {
    #[serde(default)]
    pub when: Condition,

    #[serde(default)]
    pub dependencies: Map<String, Value>,

    #[serde(default)]
    pub dev_dependencies: Map<String, Value>,

    #[serde(default)]
    pub scripts: Map<String, Value>,

    /// Dotted config path to value
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl Action {
    fn apply(&self, ctx: &mut CallbackContext<'_>) {
        let manifest = ctx.manifest();
        for (name, version) in &self.dependencies {
            manifest.set_in("dependencies", name, version.clone());
        }
        for (name, version) in &self.dev_dependencies {
            manifest.set_in("devDependencies", name, version.clone());
        }
        for (name, command) in &self.scripts {
            manifest.set_in("scripts", name, command.clone());
        }
        let config = ctx.config();
        for (path, value) in &self.config {
            config.set(path, value.clone());
        }
    }
}

/// A plugin loaded from a YAML document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarativePlugin {
    pub id: String,

    #[serde(default)]
    pub presets: Vec<PromptSpec>,

    #[serde(default)]
    pub modules: Vec<Choice>,

    /// Dotted config path to value, applied during installation
    #[serde(default)]
    pub config: Map<String, Value>,

    #[serde(default)]
    pub actions: Vec<Action>,
}

impl DeclarativePlugin {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let plugin: DeclarativePlugin = serde_yaml::from_str(content)?;
        if plugin.id.trim().is_empty() {
            anyhow::bail!("plugin id must not be empty");
        }
        for (index, action) in plugin.actions.iter().enumerate() {
            if action.when.equals.is_some() && action.when.answer.is_none() {
                anyhow::bail!("action {}: `equals` requires `answer`", index);
            }
        }
        Ok(plugin)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse plugin {}", path.display()))
    }
}

impl Plugin for DeclarativePlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, api: &mut PluginApi<'_>) -> Result<()> {
        for spec in &self.presets {
            api.add_preset_prompt(spec.clone());
        }
        for choice in &self.modules {
            api.add_module_prompt(choice.clone());
        }
        for (path, value) in &self.config {
            api.config().set(path, value.clone());
        }

        if !self.actions.is_empty() {
            let actions = self.actions.clone();
            api.on_answers(move |answers, ctx| {
                for action in actions.iter().filter(|a| a.when.matches(answers)) {
                    action.apply(ctx);
                }
                Ok(())
            });
        }
        Ok(())
    }
}

/// Load every `*.yaml` / `*.yml` plugin under `dir`, in sorted path order
pub fn load_plugin_dir(dir: &Path) -> Result<Vec<DeclarativePlugin>> {
    if !dir.is_dir() {
        anyhow::bail!("Plugin directory not found: {}", dir.display());
    }

    let mut plugins = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "yaml" || e == "yml");
        if entry.file_type().is_file() && is_yaml {
            plugins.push(DeclarativePlugin::from_file(path)?);
        }
    }
    Ok(plugins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{PromptKind, MODULE_PROMPT_NAME};

    const ESLINT: &str = r#"
id: eslint
modules:
  - name: eslint
    message: ESLint
presets:
  - name: strict
    type: confirm
    message: Strict rules?
    default: true
config:
  devtool: source-map
actions:
  - when: { module: eslint }
    dev_dependencies: { eslint: "^9.0.0" }
    scripts: { lint: "eslint src" }
  - when: { answer: strict, equals: true }
    config: { "stats.errorDetails": true }
  - dependencies: { "core-js": "^3.36.0" }
"#;

    #[test]
    fn test_parse_yaml() {
        let plugin = DeclarativePlugin::from_yaml(ESLINT).unwrap();
        assert_eq!(plugin.id, "eslint");
        assert_eq!(plugin.modules, vec![Choice::new("eslint", "ESLint")]);
        assert_eq!(plugin.presets[0].kind, PromptKind::Confirm { default: true });
        assert_eq!(plugin.actions.len(), 3);
        assert_eq!(plugin.actions[2].when, Condition::default());
        assert_eq!(
            plugin.actions[1].when.equals,
            Some(AnswerValue::Bool(true))
        );
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(DeclarativePlugin::from_yaml("id: ' '\n").is_err());
        assert!(DeclarativePlugin::from_yaml("modules: []\n").is_err());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let typo = "id: x\nactions:\n  - when: { anwser: strict, equals: true }\n    scripts: { lint: eslint }\n";
        assert!(DeclarativePlugin::from_yaml(typo).is_err());

        let action_typo = "id: x\nactions:\n  - dev_dependency: { eslint: '^9.0.0' }\n";
        assert!(DeclarativePlugin::from_yaml(action_typo).is_err());

        let plugin_typo = "id: x\nmodule: []\n";
        assert!(DeclarativePlugin::from_yaml(plugin_typo).is_err());
    }

    #[test]
    fn test_equals_without_answer_rejected() {
        let yaml = "id: x\nactions:\n  - scripts: { a: b }\n  - when: { equals: true }\n    scripts: { lint: eslint }\n";
        let err = DeclarativePlugin::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("action 1"));
    }

    #[test]
    fn test_condition_matching() {
        let answers = AnswerMap::new()
            .with(MODULE_PROMPT_NAME, vec!["eslint"])
            .with("strict", false)
            .with("name", "demo");

        let module = Condition {
            module: Some("eslint".into()),
            ..Condition::default()
        };
        assert!(module.matches(&answers));

        let other_module = Condition {
            module: Some("ts".into()),
            ..Condition::default()
        };
        assert!(!other_module.matches(&answers));

        let truthy = Condition {
            answer: Some("strict".into()),
            ..Condition::default()
        };
        assert!(!truthy.matches(&answers));

        let equals = Condition {
            answer: Some("name".into()),
            equals: Some("demo".into()),
            ..Condition::default()
        };
        assert!(equals.matches(&answers));

        let missing = Condition {
            answer: Some("nope".into()),
            ..Condition::default()
        };
        assert!(!missing.matches(&answers));
        assert!(Condition::default().matches(&answers));
    }

    #[test]
    fn test_load_plugin_dir_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.yaml"), "id: b\n").unwrap();
        std::fs::write(dir.path().join("a.yml"), "id: a\n").unwrap();
        std::fs::write(dir.path().join("nested/c.yaml"), "id: c\n").unwrap();
        std::fs::write(dir.path().join("README.md"), "# not a plugin\n").unwrap();

        let plugins = load_plugin_dir(dir.path()).unwrap();
        let ids: Vec<&str> = plugins.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_plugin_dir_names_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.yaml"), "id: [unclosed\n").unwrap();

        let err = load_plugin_dir(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.yaml"));
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_plugin_dir(&dir.path().join("missing")).is_err());
    }
}
