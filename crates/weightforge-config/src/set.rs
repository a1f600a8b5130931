//! Per-parameter constraint sets loaded from configuration files.

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::ArrayD;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use weightforge_core::{Constraint, WeightConstraint};

use crate::registry::{get_constraint, serialize_constraint, ConstraintIdentifier};
use crate::{ConfigDict, ConfigError, Result};

/// A constraint as written in a configuration file: either a bare name or a
/// full config dictionary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConstraintSpec {
    /// Registered class name or alias, default parameters.
    Name(String),

    /// Class name plus parameters.
    Config(ConfigDict),
}

impl From<ConstraintSpec> for ConstraintIdentifier {
    fn from(spec: ConstraintSpec) -> Self {
        match spec {
            ConstraintSpec::Name(name) => ConstraintIdentifier::Name(name),
            ConstraintSpec::Config(dict) => ConstraintIdentifier::Config(dict),
        }
    }
}

/// Constraint set configuration, keyed by parameter name.
///
/// # Example
///
/// ```
/// use weightforge_config::ConstraintSetConfig;
///
/// let config = ConstraintSetConfig::from_yaml_str(r#"
///     constraints:
///       bias: NonNeg
///       kernel:
///         className: MinMaxNorm
///         config:
///           minValue: 0.5
///           maxValue: 1.5
/// "#).unwrap();
///
/// assert_eq!(config.constraints.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConstraintSetConfig {
    /// Constraint per parameter name.
    #[serde(default)]
    pub constraints: BTreeMap<String, ConstraintSpec>,
}

impl ConstraintSetConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constraint for `parameter`.
    pub fn with_constraint(mut self, parameter: impl Into<String>, spec: ConstraintSpec) -> Self {
        self.constraints.insert(parameter.into(), spec);
        self
    }

    /// Loads configuration from a file, picking the format from the
    /// extension (`.yaml`/`.yml`, `.json`, anything else is TOML).
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or doesn't parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Loads configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Encodes this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Encodes this configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Encodes this configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolves every entry through the registry.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that does not resolve.
    pub fn resolve(&self) -> Result<ConstraintSet> {
        let constraints = self
            .constraints
            .iter()
            .map(|(parameter, spec)| -> Result<(String, WeightConstraint)> {
                Ok((parameter.clone(), get_constraint(spec.clone())?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(ConstraintSet { constraints })
    }
}

/// Resolved constraints keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    constraints: BTreeMap<String, WeightConstraint>,
}

impl ConstraintSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the constraint for `parameter`.
    pub fn with_constraint(
        mut self,
        parameter: impl Into<String>,
        constraint: impl Into<WeightConstraint>,
    ) -> Self {
        self.constraints.insert(parameter.into(), constraint.into());
        self
    }

    /// Returns the constraint for `parameter`, if any.
    pub fn get(&self, parameter: &str) -> Option<&WeightConstraint> {
        self.constraints.get(parameter)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterates over `(parameter, constraint)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WeightConstraint)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Projects every named array that has a constraint, in place.
    ///
    /// Arrays without a constraint are left alone. Constraints whose
    /// parameter is missing from `params` are skipped. Every constraint is
    /// checked against its array before any array is modified, so on error
    /// `params` is unchanged.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Constraint`] if a constraint cannot be applied to its
    /// array (e.g. the norm axis exceeds the array's rank).
    pub fn apply_all<A: Float>(&self, params: &mut BTreeMap<String, ArrayD<A>>) -> Result<()> {
        for (parameter, constraint) in &self.constraints {
            if let Some(weights) = params.get(parameter) {
                constraint
                    .check_rank(weights.ndim())
                    .map_err(|source| ConfigError::Constraint {
                        parameter: parameter.clone(),
                        source,
                    })?;
            }
        }

        let mut applied = 0usize;
        for (parameter, constraint) in &self.constraints {
            let Some(weights) = params.get_mut(parameter) else {
                warn!(
                    event = "constraint_missing_parameter",
                    parameter = parameter.as_str(),
                    class_name = constraint.class_name(),
                );
                continue;
            };
            constraint
                .apply_mut(weights)
                .map_err(|source| ConfigError::Constraint {
                    parameter: parameter.clone(),
                    source,
                })?;
            applied += 1;
        }

        info!(
            event = "constraint_set_applied",
            applied = applied,
            skipped = self.constraints.len() - applied,
        );
        Ok(())
    }

    /// Serializes the set back into configuration, every entry as a full
    /// config dictionary.
    ///
    /// # Errors
    ///
    /// Same as [`serialize_constraint`].
    pub fn to_config(&self) -> Result<ConstraintSetConfig> {
        let constraints = self
            .constraints
            .iter()
            .map(|(parameter, constraint)| -> Result<(String, ConstraintSpec)> {
                Ok((
                    parameter.clone(),
                    ConstraintSpec::Config(serialize_constraint(constraint)?),
                ))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(ConstraintSetConfig { constraints })
    }
}
