use std::collections::HashMap;

use crate::engine::error::{Error, Result};
use crate::engine::value::Value;

/// Session-scoped variables plus the read-only "last result" entry.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    vars: HashMap<String, Value>,
    last_result_name: Option<String>,
    last_result: Value,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store where reading `name` yields the most recent statement result.
    pub fn with_last_result(name: impl Into<String>) -> Self {
        Self {
            last_result_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn last_result_name(&self) -> Option<&str> {
        self.last_result_name.as_deref()
    }

    pub fn is_last_result(&self, name: &str) -> bool {
        self.last_result_name.as_deref() == Some(name)
    }

    pub fn last_result(&self) -> &Value {
        &self.last_result
    }

    pub fn record_last_result(&mut self, value: Value) {
        self.last_result = value;
    }

    /// Reads a variable, creating it as `Null` when it has never been set.
    pub fn get_or_create(&mut self, name: &str) -> Value {
        if self.is_last_result(name) {
            return self.last_result.clone();
        }
        self.vars.entry(name.to_string()).or_default().clone()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        if self.is_last_result(name) {
            return Some(&self.last_result);
        }
        self.vars.get(name)
    }

    pub fn assign(&mut self, name: &str, value: Value) -> Result<()> {
        if self.is_last_result(name) {
            return Err(Error::ReadOnlyVariable {
                name: name.to_string(),
            });
        }
        self.vars.insert(name.to_string(), value);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Number of user variables; the last-result entry is not counted.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }
}
