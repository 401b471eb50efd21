//! Layered key/value configuration.
//!
//! Values are collected into layers (defaults, file, environment, flags) and
//! frozen into a [`ResolvedConfig`]. The highest layer holding a key wins.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::loader::FileValues;
use crate::env::EnvBindings;
use crate::error::{Error, Result};

/// Where a resolved value came from, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Source {
    Default,
    File,
    Env,
    Flag,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Default => "default",
            Source::File => "file",
            Source::Env => "env",
            Source::Flag => "flag",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub value: Value,
    pub source: Source,
}

/// Collects configuration layers before resolution.
#[derive(Debug, Default)]
pub struct ConfigPipeline {
    layers: BTreeMap<Source, BTreeMap<String, Value>>,
}

impl ConfigPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defaults(self, values: BTreeMap<String, Value>) -> Self {
        self.layer(Source::Default, values)
    }

    pub fn file(self, values: FileValues) -> Self {
        self.layer(Source::File, values)
    }

    pub fn env(self, bindings: &EnvBindings) -> Self {
        let values = bindings
            .iter()
            .map(|(flag, binding)| (flag.clone(), Value::String(binding.value.clone())))
            .collect();
        self.layer(Source::Env, values)
    }

    pub fn flags(self, values: BTreeMap<String, Value>) -> Self {
        self.layer(Source::Flag, values)
    }

    fn layer(mut self, source: Source, values: BTreeMap<String, Value>) -> Self {
        self.layers.entry(source).or_default().extend(values);
        self
    }

    /// Merge the layers by priority into an immutable snapshot.
    pub fn resolve(self) -> ResolvedConfig {
        let mut entries = BTreeMap::new();
        // BTreeMap iterates sources in ascending priority, later inserts win.
        for (source, values) in self.layers {
            for (key, value) in values {
                entries.insert(key, Entry { value, source });
            }
        }
        ResolvedConfig { entries }
    }
}

/// The final key/value mapping handed to command handlers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    entries: BTreeMap<String, Entry>,
}

impl ResolvedConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(|e| &e.value)
    }

    pub fn source(&self, key: &str) -> Option<Source> {
        self.entries.get(key).map(|e| e.source)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }

    /// Value of `key` as text; empty when unset.
    pub fn get_string(&self, key: &str) -> String {
        self.get(key).map(value_to_string).unwrap_or_default()
    }

    pub fn get_opt_string(&self, key: &str) -> Option<String> {
        Some(self.get_string(key)).filter(|s| !s.is_empty())
    }

    /// Value of `key` as a boolean; `false` when unset.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => {
                let text = value_to_string(other);
                match text.to_ascii_lowercase().as_str() {
                    "true" | "t" | "1" | "yes" => Ok(true),
                    "false" | "f" | "0" | "no" | "" => Ok(false),
                    _ => Err(invalid(key, text)),
                }
            }
        }
    }

    /// Value of `key` as an unsigned integer; `None` when unset.
    pub fn get_u32(&self, key: &str) -> Result<Option<u32>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => {
                let text = value_to_string(value);
                text.trim().parse::<u32>().map(Some).map_err(|_| invalid(key, text))
            }
        }
    }
}

fn invalid(key: &str, value: String) -> Error {
    Error::InvalidFlagValue { flag: key.to_string(), value }
}

/// Render a value the way it would be typed on the command line.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(value_to_string).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
