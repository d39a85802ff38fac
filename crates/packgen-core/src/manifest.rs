//! The package manifest (`package.json`) plugins mutate alongside the config

use crate::dotted;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// A mutable key/value package descriptor. Key order is kept as inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// A minimal private package with the given name
    pub fn named(name: &str) -> Self {
        let mut manifest = Self::new();
        manifest
            .set("name", name)
            .set("version", "0.1.0")
            .set("private", true);
        manifest
    }

    /// Load an existing `package.json`
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => anyhow::bail!("package manifest must be a JSON object, found {}", kind(&other)),
        }
    }

    /// Set a field at a dotted path (`scripts.build`)
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        dotted::set(&mut self.fields, path, value.into());
        self
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        dotted::get(&self.fields, path)
    }

    pub fn remove(&mut self, path: &str) -> Option<Value> {
        dotted::remove(&mut self.fields, path)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn dependency(&mut self, name: &str, version: &str) -> &mut Self {
        self.set_in("dependencies", name, version)
    }

    pub fn dev_dependency(&mut self, name: &str, version: &str) -> &mut Self {
        self.set_in("devDependencies", name, version)
    }

    pub fn script(&mut self, name: &str, command: &str) -> &mut Self {
        self.set_in("scripts", name, command)
    }

    /// Set `key` inside the top-level object `section`, creating it if needed.
    /// Unlike [`set`](Self::set), `key` is taken literally: package names may
    /// contain dots (`lodash.merge`).
    pub fn set_in(&mut self, section: &str, key: &str, value: impl Into<Value>) -> &mut Self {
        let entry = self
            .fields
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Pretty JSON with two-space indentation and a trailing newline
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(&self.fields)?;
        out.push('\n');
        Ok(out)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
