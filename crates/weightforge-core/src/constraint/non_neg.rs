//! NonNeg - clamp weights to be non-negative

use ndarray::ArrayD;
use num_traits::Float;

use super::Constraint;
use crate::error::Result;

/// Constrains every weight to be non-negative.
///
/// Negative entries become zero; everything else, NaN included, is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct NonNeg {}

impl NonNeg {
    /// Registered class name.
    pub const CLASS_NAME: &'static str = "NonNeg";

    /// Creates the constraint.
    pub const fn new() -> Self {
        NonNeg {}
    }
}

impl Constraint for NonNeg {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn apply_mut<A: Float>(&self, w: &mut ArrayD<A>) -> Result<()> {
        w.mapv_inplace(|x| if x < A::zero() { A::zero() } else { x });
        Ok(())
    }
}
