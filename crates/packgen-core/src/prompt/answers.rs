//! Answers returned by the prompt capability

use super::collector::MODULE_PROMPT_NAME;
use super::spec::PromptSpec;
use crate::error::GeneratorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single answer value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::List(value)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(value: Vec<&str>) -> Self {
        AnswerValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Mapping from prompt name to the user's answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style insert, handy for scripted answers
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AnswerValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(AnswerValue::as_bool)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AnswerValue::as_str)
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(AnswerValue::as_list)
    }

    /// Modules selected in the synthesized module checkbox
    pub fn modules(&self) -> &[String] {
        self.get_list(MODULE_PROMPT_NAME).unwrap_or(&[])
    }

    /// Whether the user selected the module with the given name
    pub fn has_module(&self, name: &str) -> bool {
        self.modules().iter().any(|m| m == name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check that every presented prompt has an answer
    pub(crate) fn ensure_complete(&self, prompts: &[PromptSpec]) -> Result<(), GeneratorError> {
        match prompts.iter().find(|p| !self.contains(&p.name)) {
            Some(missing) => Err(GeneratorError::MissingAnswer(missing.name.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_module() {
        let answers = AnswerMap::new().with(MODULE_PROMPT_NAME, vec!["ts", "css"]);
        assert!(answers.has_module("ts"));
        assert!(answers.has_module("css"));
        assert!(!answers.has_module("babel"));
    }

    #[test]
    fn test_modules_empty_without_module_answer() {
        let answers = AnswerMap::new().with("name", "demo");
        assert!(answers.modules().is_empty());
        assert!(!answers.has_module("ts"));
    }

    #[test]
    fn test_typed_getters() {
        let answers = AnswerMap::new()
            .with("lint", true)
            .with("name", "demo")
            .with("langs", vec!["a"]);
        assert_eq!(answers.get_bool("lint"), Some(true));
        assert_eq!(answers.get_str("name"), Some("demo"));
        assert_eq!(answers.get_list("langs").map(<[String]>::len), Some(1));
        assert_eq!(answers.get_str("lint"), None);
    }

    #[test]
    fn test_ensure_complete_reports_first_missing() {
        let prompts = vec![
            PromptSpec::input("name", "Name?"),
            PromptSpec::confirm("lint", "Lint?", false),
        ];
        let answers = AnswerMap::new().with("name", "demo");
        match answers.ensure_complete(&prompts) {
            Err(GeneratorError::MissingAnswer(name)) => assert_eq!(name, "lint"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_untagged_deserialization() {
        let answers: AnswerMap =
            serde_json::from_str(r#"{"a": true, "b": "x", "c": ["y"]}"#).unwrap();
        assert_eq!(answers.get("a"), Some(&AnswerValue::Bool(true)));
        assert_eq!(answers.get("b"), Some(&AnswerValue::Text("x".into())));
        assert_eq!(answers.get_list("c"), Some(&["y".to_string()][..]));
    }
}
