//! Weight constraint types
//!
//! Each constraint is an immutable value carrying its parameters. Applying a
//! constraint is a pure function of the input array and those parameters.

mod max_norm;
mod min_max_norm;
mod non_neg;
mod norm;
mod unit_norm;


use std::fmt::Debug;

use ndarray::{ArrayD, ArrayViewD};
use num_traits::Float;
use tracing::trace;

use crate::error::Result;

pub use max_norm::MaxNorm;
pub use min_max_norm::MinMaxNorm;
pub use non_neg::NonNeg;
pub use unit_norm::UnitNorm;

/// Fuzz factor added to norms before dividing.
pub const EPSILON: f64 = 1e-7;

/// A projection applied to a weight array after each optimizer step.
///
/// Implementors only provide [`apply_mut`](Constraint::apply_mut); the
/// out-of-place [`apply`](Constraint::apply) copies the input first.
pub trait Constraint: Debug + Clone + Send + Sync {
    /// Registered class name of this constraint.
    fn class_name(&self) -> &'static str;

    /// Projects `w` in place.
    ///
    /// # Errors
    ///
    /// Returns [`AxisOutOfBounds`](crate::WeightForgeError::AxisOutOfBounds)
    /// if the constraint reduces along an axis `w` does not have.
    fn apply_mut<A: Float>(&self, w: &mut ArrayD<A>) -> Result<()>;

    /// Checks that the constraint can be applied to an array of rank `ndim`
    /// without touching any data.
    ///
    /// `apply_mut` fails exactly when this does.
    fn check_rank(&self, _ndim: usize) -> Result<()> {
        Ok(())
    }

    /// Returns the projection of `w`, leaving the input untouched.
    fn apply<A: Float>(&self, w: ArrayViewD<'_, A>) -> Result<ArrayD<A>> {
        let mut out = w.to_owned();
        self.apply_mut(&mut out)?;
        Ok(out)
    }
}

/// Closed set of built-in weight constraints.
///
/// # Example
///
/// ```
/// use ndarray::arr1;
/// use weightforge_core::{Constraint, MaxNorm, WeightConstraint};
///
/// let c = WeightConstraint::from(MaxNorm::new(1.0, 0));
/// let w = arr1(&[3.0_f64, 4.0]).into_dyn();
/// let out = c.apply(w.view()).unwrap();
/// let out = out.as_slice().unwrap();
///
/// assert!((out[0] - 0.6).abs() < 1e-6);
/// assert!((out[1] - 0.8).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum WeightConstraint {
    /// Clamp negative weights to zero.
    NonNeg(NonNeg),
    /// Cap the per-slice L2 norm.
    MaxNorm(MaxNorm),
    /// Cap the per-slice L2 norm at 1.
    UnitNorm(UnitNorm),
    /// Pull the per-slice L2 norm into a band.
    MinMaxNorm(MinMaxNorm),
}

impl WeightConstraint {
    /// Class names of every built-in constraint, in declaration order.
    pub const CLASS_NAMES: [&'static str; 4] = [
        NonNeg::CLASS_NAME,
        MaxNorm::CLASS_NAME,
        UnitNorm::CLASS_NAME,
        MinMaxNorm::CLASS_NAME,
    ];
}

impl Constraint for WeightConstraint {
    fn class_name(&self) -> &'static str {
        match self {
            WeightConstraint::NonNeg(c) => c.class_name(),
            WeightConstraint::MaxNorm(c) => c.class_name(),
            WeightConstraint::UnitNorm(c) => c.class_name(),
            WeightConstraint::MinMaxNorm(c) => c.class_name(),
        }
    }

    fn check_rank(&self, ndim: usize) -> Result<()> {
        match self {
            WeightConstraint::NonNeg(c) => c.check_rank(ndim),
            WeightConstraint::MaxNorm(c) => c.check_rank(ndim),
            WeightConstraint::UnitNorm(c) => c.check_rank(ndim),
            WeightConstraint::MinMaxNorm(c) => c.check_rank(ndim),
        }
    }

    fn apply_mut<A: Float>(&self, w: &mut ArrayD<A>) -> Result<()> {
        trace!(
            event = "constraint_applied",
            class_name = self.class_name(),
            shape = ?w.shape(),
        );
        match self {
            WeightConstraint::NonNeg(c) => c.apply_mut(w),
            WeightConstraint::MaxNorm(c) => c.apply_mut(w),
            WeightConstraint::UnitNorm(c) => c.apply_mut(w),
            WeightConstraint::MinMaxNorm(c) => c.apply_mut(w),
        }
    }
}

impl From<NonNeg> for WeightConstraint {
    fn from(c: NonNeg) -> Self {
        WeightConstraint::NonNeg(c)
    }
}

impl From<MaxNorm> for WeightConstraint {
    fn from(c: MaxNorm) -> Self {
        WeightConstraint::MaxNorm(c)
    }
}

impl From<UnitNorm> for WeightConstraint {
    fn from(c: UnitNorm) -> Self {
        WeightConstraint::UnitNorm(c)
    }
}

impl From<MinMaxNorm> for WeightConstraint {
    fn from(c: MinMaxNorm) -> Self {
        WeightConstraint::MinMaxNorm(c)
    }
}
