//! Constraint registry and configuration system for WeightForge.
//!
//! Resolve constraints from names or config dictionaries, serialize them
//! back, and load per-parameter constraint sets from TOML, YAML or JSON.
//!
//! # Examples
//!
//! Resolve a constraint by name and serialize it:
//!
//! ```
//! use weightforge_config::{get_constraint, serialize_constraint};
//!
//! let constraint = get_constraint("MaxNorm").unwrap();
//! let dict = serialize_constraint(&constraint).unwrap();
//!
//! assert_eq!(dict.class_name, "MaxNorm");
//! assert_eq!(dict.config["maxValue"].as_f64(), Some(2.0));
//! assert_eq!(dict.config["axis"].as_i64(), Some(0));
//! ```
//!
//! Load a constraint set and project a layer's weights:
//!
//! ```
//! use std::collections::BTreeMap;
//! use ndarray::arr1;
//! use weightforge_config::ConstraintSetConfig;
//!
//! let config = ConstraintSetConfig::from_toml_str(r#"
//!     [constraints]
//!     bias = "NonNeg"
//!
//!     [constraints.kernel]
//!     className = "MaxNorm"
//!     config = { maxValue = 1.0, axis = 0 }
//! "#).unwrap();
//!
//! let set = config.resolve().unwrap();
//! let mut params = BTreeMap::new();
//! params.insert("bias".to_string(), arr1(&[-1.0_f64, 1.0]).into_dyn());
//! params.insert("kernel".to_string(), arr1(&[3.0_f64, 4.0]).into_dyn());
//!
//! set.apply_all(&mut params).unwrap();
//! assert_eq!(params["bias"].as_slice().unwrap(), &[0.0, 1.0]);
//! ```

mod dict;
mod registry;
mod set;

#[cfg(test)]
mod tests;

use thiserror::Error;
use weightforge_core::WeightForgeError;

pub use dict::ConfigDict;
pub use registry::{
    canonical_name, deserialize_constraint, get_constraint, get_constraint_opt,
    serialize_constraint, ConstraintIdentifier,
};
pub use set::{ConstraintSet, ConstraintSetConfig, ConstraintSpec};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown constraint: {0}")]
    UnknownIdentifier(String),

    #[error("Invalid configuration for {class_name}: {message}")]
    Invalid { class_name: String, message: String },

    #[error("Constraint on parameter '{parameter}' failed: {source}")]
    Constraint {
        parameter: String,
        #[source]
        source: WeightForgeError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
