//! Prompt descriptors, answer maps, and the prompt capability
//!
//! This module provides:
//! - `PromptSpec` / `Choice` question descriptors
//! - `PromptCollector`, which merges plugin contributions into one session
//! - `AnswerMap`, the result of a session
//! - the `Prompter` trait the generator awaits on, plus a non-interactive implementation

pub mod answers;
pub mod collector;
pub mod spec;

use async_trait::async_trait;

pub use answers::{AnswerMap, AnswerValue};
pub use collector::{PromptCollector, MODULE_PROMPT_MESSAGE, MODULE_PROMPT_NAME};
pub use spec::{Choice, PromptKind, PromptSpec};

/// Capability that presents prompts to the user and collects their answers
///
/// Implementations must answer every prompt; the generator rejects an
/// answer map with missing names.
#[async_trait]
pub trait Prompter: Send {
    async fn prompt(&mut self, prompts: &[PromptSpec]) -> anyhow::Result<AnswerMap>;
}

/// Answers every prompt with its default, without user interaction
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPrompter;

impl DefaultPrompter {
    /// Default answer for a single prompt
    pub fn default_answer(spec: &PromptSpec) -> AnswerValue {
        match &spec.kind {
            PromptKind::Input { default } => {
                AnswerValue::Text(default.clone().unwrap_or_default())
            }
            PromptKind::Confirm { default } => AnswerValue::Bool(*default),
            PromptKind::Select { choices, default } => AnswerValue::Text(
                default
                    .clone()
                    .or_else(|| choices.first().map(|c| c.name.clone()))
                    .unwrap_or_default(),
            ),
            PromptKind::Checkbox { choices } => AnswerValue::List(
                choices
                    .iter()
                    .filter(|c| c.checked)
                    .map(|c| c.name.clone())
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl Prompter for DefaultPrompter {
    async fn prompt(&mut self, prompts: &[PromptSpec]) -> anyhow::Result<AnswerMap> {
        let mut answers = AnswerMap::new();
        for spec in prompts {
            answers.insert(spec.name.clone(), Self::default_answer(spec));
        }
        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_prompter_answers_everything() {
        let prompts = vec![
            PromptSpec::checkbox(
                MODULE_PROMPT_NAME,
                MODULE_PROMPT_MESSAGE,
                vec![Choice::new("ts", "TypeScript").checked(), Choice::new("css", "CSS")],
            ),
            PromptSpec::input("name", "Name?").with_default("demo"),
            PromptSpec::input("description", "Description?"),
            PromptSpec::confirm("lint", "Lint?", true),
            PromptSpec::select(
                "mode",
                "Mode?",
                vec![
                    Choice::new("development", "Development"),
                    Choice::new("production", "Production"),
                ],
            ),
        ];

        let answers = DefaultPrompter.prompt(&prompts).await.unwrap();
        assert_eq!(answers.len(), prompts.len());
        assert_eq!(answers.modules(), &["ts".to_string()]);
        assert_eq!(answers.get_str("name"), Some("demo"));
        assert_eq!(answers.get_str("description"), Some(""));
        assert_eq!(answers.get_bool("lint"), Some(true));
        assert_eq!(answers.get_str("mode"), Some("development"));
    }

    #[test]
    fn test_default_for_empty_select_is_empty_text() {
        let spec = PromptSpec::select("mode", "Mode?", vec![]);
        assert_eq!(
            DefaultPrompter::default_answer(&spec),
            AnswerValue::Text(String::new())
        );
    }
}
