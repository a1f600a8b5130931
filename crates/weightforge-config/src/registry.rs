//! Name and config-dictionary lookup for the built-in constraints.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use weightforge_core::{Constraint, MaxNorm, MinMaxNorm, NonNeg, UnitNorm, WeightConstraint};

use crate::{ConfigDict, ConfigError, Result};

/// Lower-camel-case spellings accepted as string identifiers.
const ALIASES: [(&str, &str); 4] = [
    ("nonNeg", NonNeg::CLASS_NAME),
    ("maxNorm", MaxNorm::CLASS_NAME),
    ("unitNorm", UnitNorm::CLASS_NAME),
    ("minMaxNorm", MinMaxNorm::CLASS_NAME),
];

/// Anything [`get_constraint`] can turn into a constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintIdentifier {
    /// Registered class name or alias.
    Name(String),
    /// Serialized constraint.
    Config(ConfigDict),
    /// Already constructed constraint.
    Instance(WeightConstraint),
}

impl From<&str> for ConstraintIdentifier {
    fn from(name: &str) -> Self {
        ConstraintIdentifier::Name(name.to_string())
    }
}

impl From<String> for ConstraintIdentifier {
    fn from(name: String) -> Self {
        ConstraintIdentifier::Name(name)
    }
}

impl From<ConfigDict> for ConstraintIdentifier {
    fn from(dict: ConfigDict) -> Self {
        ConstraintIdentifier::Config(dict)
    }
}

impl From<WeightConstraint> for ConstraintIdentifier {
    fn from(constraint: WeightConstraint) -> Self {
        ConstraintIdentifier::Instance(constraint)
    }
}

macro_rules! impl_instance_identifier {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ConstraintIdentifier {
                fn from(constraint: $ty) -> Self {
                    ConstraintIdentifier::Instance(constraint.into())
                }
            }
        )*
    };
}

impl_instance_identifier!(NonNeg, MaxNorm, UnitNorm, MinMaxNorm);

/// Maps a class name or alias to the registered class name.
///
/// Lookup is case-sensitive.
///
/// ```
/// use weightforge_config::canonical_name;
///
/// assert_eq!(canonical_name("MaxNorm"), Some("MaxNorm"));
/// assert_eq!(canonical_name("maxNorm"), Some("MaxNorm"));
/// assert_eq!(canonical_name("maxnorm"), None);
/// ```
pub fn canonical_name(name: &str) -> Option<&'static str> {
    WeightConstraint::CLASS_NAMES
        .iter()
        .copied()
        .find(|class_name| *class_name == name)
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| *alias == name)
                .map(|(_, class_name)| *class_name)
        })
}

/// Resolves an identifier into a constraint.
///
/// - An existing constraint is returned unchanged.
/// - A name is looked up among the registered class names and aliases and
///   constructed with default parameters.
/// - A config dictionary is dispatched on its `className`.
///
/// # Errors
///
/// [`ConfigError::UnknownIdentifier`] for an unregistered name or class
/// name, [`ConfigError::Invalid`] for parameters of the wrong type or with
/// unknown keys.
///
/// # Examples
///
/// ```
/// use weightforge_config::{get_constraint, ConfigError};
/// use weightforge_core::{NonNeg, WeightConstraint};
///
/// assert_eq!(
///     get_constraint("NonNeg").unwrap(),
///     WeightConstraint::NonNeg(NonNeg::new())
/// );
/// assert!(matches!(
///     get_constraint("UnknownName"),
///     Err(ConfigError::UnknownIdentifier(_))
/// ));
/// ```
pub fn get_constraint(identifier: impl Into<ConstraintIdentifier>) -> Result<WeightConstraint> {
    match identifier.into() {
        ConstraintIdentifier::Instance(constraint) => Ok(constraint),
        ConstraintIdentifier::Name(name) => {
            let class_name =
                canonical_name(&name).ok_or(ConfigError::UnknownIdentifier(name))?;
            deserialize_constraint(&ConfigDict::from_class_name(class_name))
        }
        ConstraintIdentifier::Config(dict) => deserialize_constraint(&dict),
    }
}

/// Like [`get_constraint`], mapping `None` to `None`.
pub fn get_constraint_opt<I>(identifier: Option<I>) -> Result<Option<WeightConstraint>>
where
    I: Into<ConstraintIdentifier>,
{
    identifier.map(get_constraint).transpose()
}

/// Serializes a constraint into its config dictionary.
///
/// Every constructor parameter is present, defaults included.
///
/// # Errors
///
/// [`ConfigError::Invalid`] if a parameter is NaN or infinite, since JSON
/// has no encoding for it that would deserialize back.
pub fn serialize_constraint(constraint: &WeightConstraint) -> Result<ConfigDict> {
    let class_name = constraint.class_name();
    let config = match constraint {
        WeightConstraint::NonNeg(c) => to_config_map(class_name, c)?,
        WeightConstraint::MaxNorm(c) => to_config_map(class_name, c)?,
        WeightConstraint::UnitNorm(c) => to_config_map(class_name, c)?,
        WeightConstraint::MinMaxNorm(c) => to_config_map(class_name, c)?,
    };
    Ok(ConfigDict::new(class_name, config))
}

/// Reconstructs a constraint from its config dictionary.
///
/// # Errors
///
/// Same as [`get_constraint`] for a config dictionary.
pub fn deserialize_constraint(dict: &ConfigDict) -> Result<WeightConstraint> {
    let class_name = dict.class_name.as_str();
    let constraint: WeightConstraint = match class_name {
        NonNeg::CLASS_NAME => parse_params::<NonNeg>(dict)?.into(),
        MaxNorm::CLASS_NAME => parse_params::<MaxNorm>(dict)?.into(),
        UnitNorm::CLASS_NAME => parse_params::<UnitNorm>(dict)?.into(),
        MinMaxNorm::CLASS_NAME => parse_params::<MinMaxNorm>(dict)?.into(),
        _ => return Err(ConfigError::UnknownIdentifier(dict.class_name.clone())),
    };

    debug!(
        event = "constraint_resolved",
        class_name = class_name,
        params = dict.config.len(),
    );
    Ok(constraint)
}

fn parse_params<T: DeserializeOwned>(dict: &ConfigDict) -> Result<T> {
    serde_json::from_value(Value::Object(dict.config.clone())).map_err(|e| {
        ConfigError::Invalid {
            class_name: dict.class_name.clone(),
            message: e.to_string(),
        }
    })
}

fn to_config_map<T: Serialize>(class_name: &str, params: &T) -> Result<Map<String, Value>> {
    let map = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        other => {
            return Err(ConfigError::Invalid {
                class_name: class_name.to_string(),
                message: format!("parameters serialized to {other}, expected an object"),
            })
        }
    };

    // serde_json writes non-finite floats as null.
    if let Some((key, _)) = map.iter().find(|(_, value)| value.is_null()) {
        return Err(ConfigError::Invalid {
            class_name: class_name.to_string(),
            message: format!("parameter `{key}` is not a finite number"),
        });
    }
    Ok(map)
}
