//! Chainable webpack configuration builder

use super::js::JsExpr;
use crate::dotted;
use serde_json::{Map, Value};

/// A loader entry of a rule's `use` list
#[derive(Debug, Clone, PartialEq)]
pub struct Loader {
    pub loader: String,
    pub options: Option<Value>,
}

/// A named `module.rules` entry
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    name: String,
    test: Option<String>,
    include: Option<String>,
    exclude: Option<String>,
    uses: Vec<Loader>,
}

impl Rule {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            test: None,
            include: None,
            exclude: None,
            uses: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regex source matched against resource paths
    pub fn test(&mut self, regex: &str) -> &mut Self {
        self.test = Some(regex.to_string());
        self
    }

    pub fn include(&mut self, regex: &str) -> &mut Self {
        self.include = Some(regex.to_string());
        self
    }

    pub fn exclude(&mut self, regex: &str) -> &mut Self {
        self.exclude = Some(regex.to_string());
        self
    }

    /// Append a loader; a loader already in the list keeps its position
    /// and has its options replaced.
    pub fn loader(&mut self, loader: &str, options: Option<Value>) -> &mut Self {
        match self.uses.iter_mut().find(|l| l.loader == loader) {
            Some(existing) => existing.options = options,
            None => self.uses.push(Loader {
                loader: loader.to_string(),
                options,
            }),
        }
        self
    }

    pub fn loaders(&self) -> &[Loader] {
        &self.uses
    }

    fn to_js(&self) -> JsExpr {
        let mut entries = Vec::new();
        if let Some(test) = &self.test {
            entries.push(("test".to_string(), JsExpr::Regex(test.clone())));
        }
        if let Some(include) = &self.include {
            entries.push(("include".to_string(), JsExpr::Regex(include.clone())));
        }
        if let Some(exclude) = &self.exclude {
            entries.push(("exclude".to_string(), JsExpr::Regex(exclude.clone())));
        }
        let uses = self
            .uses
            .iter()
            .map(|l| {
                let mut entry = vec![(
                    "loader".to_string(),
                    JsExpr::Value(Value::String(l.loader.clone())),
                )];
                if let Some(options) = &l.options {
                    entry.push(("options".to_string(), JsExpr::from_value(options)));
                }
                JsExpr::Object(entry)
            })
            .collect();
        entries.push(("use".to_string(), JsExpr::Array(uses)));
        JsExpr::Object(entries)
    }
}

/// A `plugins` entry, emitted as `new Class(args...)` with a matching `require`
#[derive(Debug, Clone, PartialEq)]
pub struct WebpackPlugin {
    name: String,
    class: String,
    module: String,
    args: Vec<Value>,
}

impl WebpackPlugin {
    /// `name` identifies the entry within the builder; `class` is bound by
    /// `const <class> = require('<module>')`.
    pub fn new(name: &str, class: &str, module: &str) -> Self {
        Self {
            name: name.to_string(),
            class: class.to_string(),
            module: module.to_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: Value) -> Self {
        self.args.push(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// `path` is `scope` or lies below it
fn is_within(path: &str, scope: &str) -> bool {
    path.strip_prefix(scope)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Writing at one path replaces whatever the other one holds
fn overlaps(a: &str, b: &str) -> bool {
    is_within(a, b) || is_within(b, a)
}

/// The shared build configuration plugins mutate during a session
///
/// Plain fields are addressed with dotted paths (`output.filename`).
/// Rules, webpack plugins, and raw expressions are kept aside and merged
/// into the tree at [`serialize`](Self::serialize) time.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    fields: Map<String, Value>,
    raw: Vec<(String, String)>,
    requires: Vec<(String, String)>,
    rules: Vec<Rule>,
    plugins: Vec<WebpackPlugin>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing anything previously stored at the same path
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        self.raw.retain(|(p, _)| !overlaps(p, path));
        dotted::set(&mut self.fields, path, value.into());
        self
    }

    /// Set a field to verbatim JavaScript, e.g. `path.resolve(__dirname, 'dist')`
    pub fn set_raw(&mut self, path: &str, code: &str) -> &mut Self {
        dotted::remove(&mut self.fields, path);
        self.raw.retain(|(p, _)| !overlaps(p, path));
        self.raw.push((path.to_string(), code.to_string()));
        self
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        dotted::get(&self.fields, path)
    }

    /// Remove a field and any raw expression at or below `path`
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        self.raw.retain(|(p, _)| !is_within(p, path));
        dotted::remove(&mut self.fields, path)
    }

    pub fn mode(&mut self, mode: &str) -> &mut Self {
        self.set("mode", mode)
    }

    /// Add a file to a named entry point. A second file turns the entry into an array.
    pub fn entry(&mut self, name: &str, file: &str) -> &mut Self {
        let path = format!("entry.{}", name);
        self.raw.retain(|(p, _)| !overlaps(p, &path));
        let file = Value::String(file.to_string());
        match dotted::get_mut(&mut self.fields, &path) {
            Some(Value::Array(files)) => {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
            Some(existing @ Value::String(_)) => {
                if *existing != file {
                    let previous = existing.take();
                    *existing = Value::Array(vec![previous, file]);
                }
            }
            _ => {
                dotted::set(&mut self.fields, &path, file);
            }
        }
        self
    }

    /// Replace every file of a named entry point
    pub fn replace_entry(&mut self, name: &str, file: &str) -> &mut Self {
        self.set(&format!("entry.{}", name), file)
    }

    pub fn resolve_extension(&mut self, extension: &str) -> &mut Self {
        self.raw.retain(|(p, _)| !overlaps(p, "resolve.extensions"));
        dotted::push_unique(
            &mut self.fields,
            "resolve.extensions",
            Value::String(extension.to_string()),
        );
        self
    }

    /// Bind `const <ident> = require('<module>')` at the top of the file
    pub fn require_module(&mut self, ident: &str, module: &str) -> &mut Self {
        if !self.requires.iter().any(|(i, _)| i == ident) {
            self.requires.push((ident.to_string(), module.to_string()));
        }
        self
    }

    /// The named rule, created empty on first access
    pub fn rule(&mut self, name: &str) -> &mut Rule {
        let index = match self.rules.iter().position(|r| r.name == name) {
            Some(index) => index,
            None => {
                self.rules.push(Rule::new(name));
                self.rules.len() - 1
            }
        };
        &mut self.rules[index]
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name == name)
    }

    pub fn remove_rule(&mut self, name: &str) -> Option<Rule> {
        let index = self.rules.iter().position(|r| r.name == name)?;
        Some(self.rules.remove(index))
    }

    /// Add a webpack plugin, replacing one with the same name in place
    pub fn add_plugin(&mut self, plugin: WebpackPlugin) -> &mut Self {
        match self.plugins.iter_mut().find(|p| p.name == plugin.name) {
            Some(existing) => *existing = plugin,
            None => self.plugins.push(plugin),
        }
        self
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name == name)
    }

    pub fn remove_plugin(&mut self, name: &str) -> Option<WebpackPlugin> {
        let index = self.plugins.iter().position(|p| p.name == name)?;
        Some(self.plugins.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.raw.is_empty() && self.rules.is_empty() && self.plugins.is_empty()
    }

    /// Render the configuration as a CommonJS module
    pub fn serialize(&self) -> String {
        let mut tree = JsExpr::from_value(&Value::Object(self.fields.clone()));

        for (path, code) in &self.raw {
            let keys: Vec<&str> = path.split('.').collect();
            tree.set_path(&keys, JsExpr::Raw(code.clone()));
        }

        if !self.rules.is_empty() {
            let rules = self.rules.iter().map(Rule::to_js).collect();
            tree.set_path(&["module", "rules"], JsExpr::Array(rules));
        }

        let mut requires = self.requires.clone();
        if !self.plugins.is_empty() {
            let plugins = self
                .plugins
                .iter()
                .map(|p| {
                    if !requires.iter().any(|(ident, _)| *ident == p.class) {
                        requires.push((p.class.clone(), p.module.clone()));
                    }
                    JsExpr::New {
                        class: p.class.clone(),
                        args: p.args.iter().map(JsExpr::from_value).collect(),
                    }
                })
                .collect();
            tree.set_path(&["plugins"], JsExpr::Array(plugins));
        }

        let mut out = String::new();
        for (ident, module) in &requires {
            out.push_str(&format!(
                "const {} = require({});\n",
                ident,
                JsExpr::Value(Value::String(module.clone())).render(0)
            ));
        }
        if !requires.is_empty() {
            out.push('\n');
        }
        out.push_str("module.exports = ");
        out.push_str(&tree.render(0));
        out.push_str(";\n");
        out
    }
}
