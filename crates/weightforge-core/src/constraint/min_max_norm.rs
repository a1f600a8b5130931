//! MinMaxNorm - pull the L2 norm of each weight slice into a band

use ndarray::ArrayD;
use num_traits::Float;

use super::norm::{cast, clip, rescale_lanes, resolve_axis};
use super::Constraint;
use crate::error::Result;

/// Constrains the L2 norm of every lane along `axis` into
/// `[min_value, max_value]`.
///
/// `rate` interpolates between the clipped norm and the current one:
///
/// ```text
/// desired = rate * clip(norm, min_value, max_value) + (1 - rate) * norm
/// ```
///
/// With `rate = 1` the norm is clipped outright; with `rate = 0` the weights
/// pass through unchanged (up to the epsilon in the divisor). Values in
/// between move the norm part of the way each step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", default, deny_unknown_fields)
)]
pub struct MinMaxNorm {
    #[cfg_attr(feature = "serde", serde(alias = "min_value"))]
    min_value: f64,
    #[cfg_attr(feature = "serde", serde(alias = "max_value"))]
    max_value: f64,
    rate: f64,
    axis: isize,
}

impl MinMaxNorm {
    /// Registered class name.
    pub const CLASS_NAME: &'static str = "MinMaxNorm";

    /// Creates the constraint.
    pub const fn new(min_value: f64, max_value: f64, rate: f64, axis: isize) -> Self {
        MinMaxNorm {
            min_value,
            max_value,
            rate,
            axis,
        }
    }

    /// Returns a copy with a different band.
    pub fn with_bounds(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    /// Returns a copy with a different enforcement rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Returns a copy reducing along `axis`.
    pub fn with_axis(mut self, axis: isize) -> Self {
        self.axis = axis;
        self
    }

    pub const fn min_value(&self) -> f64 {
        self.min_value
    }

    pub const fn max_value(&self) -> f64 {
        self.max_value
    }

    pub const fn rate(&self) -> f64 {
        self.rate
    }

    pub const fn axis(&self) -> isize {
        self.axis
    }
}

impl Default for MinMaxNorm {
    fn default() -> Self {
        MinMaxNorm::new(0.0, 1.0, 1.0, 0)
    }
}

impl Constraint for MinMaxNorm {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn check_rank(&self, ndim: usize) -> Result<()> {
        resolve_axis(self.axis, ndim).map(|_| ())
    }

    fn apply_mut<A: Float>(&self, w: &mut ArrayD<A>) -> Result<()> {
        let min_value = cast::<A>(self.min_value);
        let max_value = cast::<A>(self.max_value);
        let rate = cast::<A>(self.rate);
        rescale_lanes(w, self.axis, |norm| {
            rate * clip(norm, min_value, max_value) + (A::one() - rate) * norm
        })
    }
}
