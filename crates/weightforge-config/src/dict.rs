//! Serialized form of a single constraint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// JSON-compatible representation of a constraint: its registered class
/// name plus the constructor parameters.
///
/// ```json
/// {"className": "MaxNorm", "config": {"maxValue": 2.0, "axis": 0}}
/// ```
///
/// A missing `config` means every parameter takes its default. Keys other
/// than `className` and `config` are rejected.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigDict {
    /// Registered class name of the constraint.
    pub class_name: String,

    /// Constructor parameters, keyed by camelCase field name.
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl ConfigDict {
    /// Creates a config dictionary from a class name and parameters.
    pub fn new(class_name: impl Into<String>, config: Map<String, Value>) -> Self {
        Self {
            class_name: class_name.into(),
            config,
        }
    }

    /// Creates a config dictionary with no parameters (all defaults).
    pub fn from_class_name(class_name: impl Into<String>) -> Self {
        Self::new(class_name, Map::new())
    }

    /// Sets a single parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Returns a parameter value, if present.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Parses a config dictionary from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Encodes this config dictionary as compact JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
