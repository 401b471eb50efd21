//! Discovery of `OPENSDK_*` variables in the environment.

use std::collections::BTreeMap;

use super::names::{env_to_flag, ENV_PREFIX};

/// Snapshot of the process environment, captured once at start-up.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Capture the current process environment. Entries that are not valid
    /// UTF-8 are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Value of `key`, treating an empty value as unset.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Every entry as a `KEY=VALUE` assignment.
    pub fn assignments(&self) -> impl Iterator<Item = String> + '_ {
        self.vars.iter().map(|(k, v)| format!("{}={}", k, v))
    }
}

/// An environment variable supplying a flag's fallback value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    pub env_key: String,
    pub value: String,
}

/// Flag name -> environment binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvBindings {
    bindings: BTreeMap<String, EnvBinding>,
}

impl EnvBindings {
    pub fn get(&self, flag: &str) -> Option<&EnvBinding> {
        self.bindings.get(flag)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EnvBinding)> {
        self.bindings.iter()
    }
}

/// Bind every `OPENSDK_*` entry of `env` to its flag name.
///
/// Entries that do not split into exactly `KEY` and `VALUE` on `=`, or whose
/// key lacks the prefix, are ignored.
pub fn scan_environment(env: &Environment) -> EnvBindings {
    let prefix = format!("{}_", ENV_PREFIX);
    let mut bindings = BTreeMap::new();

    for assignment in env.assignments() {
        let parts: Vec<&str> = assignment.split('=').collect();
        if parts.len() != 2 {
            continue;
        }

        let (key, value) = (parts[0], parts[1]);
        if !key.starts_with(&prefix) {
            continue;
        }

        let Ok(flag) = env_to_flag(&assignment) else {
            continue;
        };

        tracing::trace!(flag = %flag, env = %key, "bound flag to environment");
        bindings.insert(flag, EnvBinding { env_key: key.to_string(), value: value.to_string() });
    }

    EnvBindings { bindings }
}
