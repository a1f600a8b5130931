//! UnitNorm - cap the L2 norm of each weight slice at 1

use ndarray::ArrayD;
use num_traits::Float;

use super::norm::{clip, rescale_lanes, resolve_axis};
use super::Constraint;
use crate::error::Result;

/// Constrains the L2 norm of every lane along `axis` to at most 1.
///
/// Same projection as [`MaxNorm`](super::MaxNorm) with `max_value = 1`:
/// longer lanes land on the unit sphere, shorter ones are left (almost)
/// unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", default, deny_unknown_fields)
)]
pub struct UnitNorm {
    axis: isize,
}

impl UnitNorm {
    /// Registered class name.
    pub const CLASS_NAME: &'static str = "UnitNorm";

    /// Creates the constraint.
    pub const fn new(axis: isize) -> Self {
        UnitNorm { axis }
    }

    pub const fn axis(&self) -> isize {
        self.axis
    }
}

impl Constraint for UnitNorm {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn check_rank(&self, ndim: usize) -> Result<()> {
        resolve_axis(self.axis, ndim).map(|_| ())
    }

    fn apply_mut<A: Float>(&self, w: &mut ArrayD<A>) -> Result<()> {
        rescale_lanes(w, self.axis, |norm| clip(norm, A::zero(), A::one()))
    }
}
