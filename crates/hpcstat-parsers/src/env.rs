//! Read-only access to environment variables.

use std::collections::HashMap;

/// Source of environment variables.
pub trait Environment {
    /// Value of `key`, or `None` when unset or not valid Unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key`, or an empty string when unset.
    fn var_or_empty(&self, key: &str) -> String {
        self.var(key).unwrap_or_default()
    }
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed set of variables, detached from the process environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
