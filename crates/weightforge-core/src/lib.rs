//! WeightForge Core - Weight constraint transforms
//!
//! This crate provides the projections applied to layer weights after each
//! optimizer step:
//! - [`NonNeg`] clamps every weight to be non-negative
//! - [`MaxNorm`] bounds the L2 norm of each slice along an axis
//! - [`UnitNorm`] bounds the L2 norm of each slice by 1
//! - [`MinMaxNorm`] pulls each slice norm into a `[min, max]` band
//!
//! All constraints operate on [`ndarray::ArrayD`] of any float type.
//!
//! # Example
//!
//! ```
//! use ndarray::{arr1, ArrayD};
//! use weightforge_core::{Constraint, NonNeg};
//!
//! let w: ArrayD<f32> = arr1(&[-1.0, 2.0, -3.0]).into_dyn();
//! let projected = NonNeg::new().apply(w.view()).unwrap();
//! assert_eq!(projected.as_slice().unwrap(), &[0.0, 2.0, 0.0]);
//! ```

pub mod constraint;
pub mod error;

pub use constraint::{
    Constraint, MaxNorm, MinMaxNorm, NonNeg, UnitNorm, WeightConstraint, EPSILON,
};
pub use error::{Result, WeightForgeError};
