//! WeightForge - Weight constraints for neural-network layers in Rust
//!
//! Project layer weights back onto a feasible set after each optimizer
//! step, and persist the constraints alongside a model definition.
//!
//! # Example
//!
//! ```rust
//! use weightforge::prelude::*;
//!
//! let constraint = get_constraint("UnitNorm").unwrap();
//! let w = ndarray::arr1(&[3.0_f64, 4.0]).into_dyn();
//! let out = constraint.apply(w.view()).unwrap();
//!
//! let norm = out.iter().map(|x| x * x).sum::<f64>().sqrt();
//! assert!((norm - 1.0).abs() < 1e-6);
//!
//! let dict = serialize_constraint(&constraint).unwrap();
//! assert_eq!(deserialize_constraint(&dict).unwrap(), constraint);
//! ```

// Constraint types
pub use weightforge_core::{
    Constraint, MaxNorm, MinMaxNorm, NonNeg, UnitNorm, WeightConstraint, WeightForgeError,
    EPSILON,
};

// Registry and serialization
pub use weightforge_config::{
    canonical_name, deserialize_constraint, get_constraint, get_constraint_opt,
    serialize_constraint, ConfigDict, ConfigError, ConstraintIdentifier,
};

// Constraint sets
pub use weightforge_config::{ConstraintSet, ConstraintSetConfig, ConstraintSpec};

#[cfg(feature = "console")]
pub use weightforge_console as console;

pub mod prelude {
    pub use super::{Constraint, MaxNorm, MinMaxNorm, NonNeg, UnitNorm, WeightConstraint};
    pub use super::{deserialize_constraint, get_constraint, serialize_constraint, ConfigDict};
    pub use super::{ConstraintSet, ConstraintSetConfig};
}
