//! Question descriptors contributed by plugins

use serde::{Deserialize, Serialize};

/// One selectable option of a `select` or `checkbox` prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Value recorded in the answer map when selected
    pub name: String,

    /// Label shown to the user
    pub message: String,

    /// Pre-selected (checkbox only)
    #[serde(default)]
    pub checked: bool,
}

impl Choice {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            checked: false,
        }
    }

    /// Mark the choice as selected by default
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }
}

/// Question type and its type-specific options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptKind {
    /// Freeform text
    Input {
        #[serde(default)]
        default: Option<String>,
    },

    /// Yes/no
    Confirm {
        #[serde(default)]
        default: bool,
    },

    /// Exactly one of `choices`
    Select {
        choices: Vec<Choice>,
        #[serde(default)]
        default: Option<String>,
    },

    /// Any subset of `choices`
    Checkbox { choices: Vec<Choice> },
}

/// A question presented to the user during `create()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSpec {
    /// Key of the answer in the resulting answer map
    pub name: String,

    /// Question text
    pub message: String,

    #[serde(flatten)]
    pub kind: PromptKind,
}

impl PromptSpec {
    pub fn input(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            kind: PromptKind::Input { default: None },
        }
    }

    pub fn confirm(name: impl Into<String>, message: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            kind: PromptKind::Confirm { default },
        }
    }

    pub fn select(
        name: impl Into<String>,
        message: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            kind: PromptKind::Select {
                choices,
                default: None,
            },
        }
    }

    pub fn checkbox(
        name: impl Into<String>,
        message: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            kind: PromptKind::Checkbox { choices },
        }
    }

    /// Set the default answer for `input` and `select` prompts.
    /// Has no effect on other prompt types.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        match &mut self.kind {
            PromptKind::Input { default } | PromptKind::Select { default, .. } => {
                *default = Some(value.into());
            }
            PromptKind::Confirm { .. } | PromptKind::Checkbox { .. } => {}
        }
        self
    }

    /// Choices offered by `select` and `checkbox` prompts
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            PromptKind::Select { choices, .. } | PromptKind::Checkbox { choices } => choices,
            PromptKind::Input { .. } | PromptKind::Confirm { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prompt_from_yaml() {
        let yaml = r#"
name: framework
message: Pick a framework
type: select
choices:
  - name: react
    message: React
  - name: vue
    message: Vue
default: vue
"#;
        let spec: PromptSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.name, "framework");
        assert_eq!(spec.choices().len(), 2);
        assert_eq!(
            spec.kind,
            PromptKind::Select {
                choices: vec![Choice::new("react", "React"), Choice::new("vue", "Vue")],
                default: Some("vue".to_string()),
            }
        );
    }

    #[test]
    fn test_confirm_default_is_false_when_omitted() {
        let spec: PromptSpec =
            serde_yaml::from_str("name: lint\nmessage: Lint?\ntype: confirm\n").unwrap();
        assert_eq!(spec.kind, PromptKind::Confirm { default: false });
    }

    #[test]
    fn test_with_default_ignored_for_confirm() {
        let spec = PromptSpec::confirm("ok", "Ok?", true).with_default("no");
        assert_eq!(spec.kind, PromptKind::Confirm { default: true });
    }
}
