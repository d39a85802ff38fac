//! Interactive prompter backed by cliclack

use crate::prompt::{AnswerMap, AnswerValue, DefaultPrompter, PromptKind, PromptSpec, Prompter};
use anyhow::Result;
use async_trait::async_trait;

/// Asks each prompt inline on the terminal, in order
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

impl ClackPrompter {
    fn ask(spec: &PromptSpec) -> Result<AnswerValue> {
        let value = match &spec.kind {
            PromptKind::Input { default } => {
                let mut input = cliclack::input(&spec.message).required(false);
                if let Some(default) = default {
                    input = input.placeholder(default).default_input(default);
                }
                let text: String = input.interact()?;
                AnswerValue::Text(text)
            }
            PromptKind::Confirm { default } => {
                let confirmed: bool = cliclack::confirm(&spec.message)
                    .initial_value(*default)
                    .interact()?;
                AnswerValue::Bool(confirmed)
            }
            PromptKind::Select { choices, .. } if choices.is_empty() => {
                DefaultPrompter::default_answer(spec)
            }
            PromptKind::Select { choices, default } => {
                let mut select = cliclack::select(&spec.message);
                for choice in choices {
                    select = select.item(choice.name.clone(), &choice.message, "");
                }
                if let Some(default) = default {
                    select = select.initial_value(default.clone());
                }
                let selected: String = select.interact()?;
                AnswerValue::Text(selected)
            }
            PromptKind::Checkbox { choices } if choices.is_empty() => AnswerValue::List(Vec::new()),
            PromptKind::Checkbox { choices } => {
                let mut multi = cliclack::multiselect(&spec.message);
                for choice in choices {
                    multi = multi.item(choice.name.clone(), &choice.message, "");
                }
                let checked: Vec<String> = choices
                    .iter()
                    .filter(|c| c.checked)
                    .map(|c| c.name.clone())
                    .collect();
                let selected: Vec<String> =
                    multi.initial_values(checked).required(false).interact()?;
                AnswerValue::List(selected)
            }
        };
        Ok(value)
    }
}

#[async_trait]
impl Prompter for ClackPrompter {
    async fn prompt(&mut self, prompts: &[PromptSpec]) -> Result<AnswerMap> {
        let mut answers = AnswerMap::new();
        for spec in prompts {
            answers.insert(spec.name.clone(), Self::ask(spec)?);
        }
        Ok(answers)
    }
}
