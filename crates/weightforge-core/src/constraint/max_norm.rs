//! MaxNorm - cap the L2 norm of each weight slice

use ndarray::ArrayD;
use num_traits::Float;

use super::norm::{cast, clip, rescale_lanes, resolve_axis};
use super::Constraint;
use crate::error::Result;

/// Constrains the L2 norm of every lane along `axis` to at most `max_value`.
///
/// Lanes already within the bound are left (almost) unchanged; longer lanes
/// are scaled down onto the bound. For a dense kernel of shape
/// `[input_dim, output_dim]`, `axis = 0` bounds each unit's incoming weights.
///
/// # Example
///
/// ```
/// use weightforge_core::MaxNorm;
///
/// let c = MaxNorm::default();
/// assert_eq!(c.max_value(), 2.0);
/// assert_eq!(c.axis(), 0);
///
/// let c = MaxNorm::new(3.0, 0).with_axis(-1);
/// assert_eq!(c.axis(), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", default, deny_unknown_fields)
)]
pub struct MaxNorm {
    #[cfg_attr(feature = "serde", serde(alias = "max_value"))]
    max_value: f64,
    axis: isize,
}

impl MaxNorm {
    /// Registered class name.
    pub const CLASS_NAME: &'static str = "MaxNorm";

    /// Default upper bound on the norm.
    pub const DEFAULT_MAX_VALUE: f64 = 2.0;

    /// Creates the constraint.
    pub const fn new(max_value: f64, axis: isize) -> Self {
        MaxNorm { max_value, axis }
    }

    /// Returns a copy reducing along `axis`.
    pub fn with_axis(mut self, axis: isize) -> Self {
        self.axis = axis;
        self
    }

    /// Returns a copy with a different upper bound.
    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = max_value;
        self
    }

    pub const fn max_value(&self) -> f64 {
        self.max_value
    }

    pub const fn axis(&self) -> isize {
        self.axis
    }
}

impl Default for MaxNorm {
    fn default() -> Self {
        MaxNorm::new(Self::DEFAULT_MAX_VALUE, 0)
    }
}

impl Constraint for MaxNorm {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn check_rank(&self, ndim: usize) -> Result<()> {
        resolve_axis(self.axis, ndim).map(|_| ())
    }

    fn apply_mut<A: Float>(&self, w: &mut ArrayD<A>) -> Result<()> {
        let max_value = cast::<A>(self.max_value);
        rescale_lanes(w, self.axis, |norm| clip(norm, A::zero(), max_value))
    }
}
