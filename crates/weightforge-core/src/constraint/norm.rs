//! Axis-wise L2 norm helpers shared by the norm constraints.

use ndarray::{ArrayD, ArrayViewD, Axis};
use num_traits::Float;

use super::EPSILON;
use crate::error::{Result, WeightForgeError};

/// Converts a configured parameter into the array's element type.
#[inline]
pub(crate) fn cast<A: Float>(value: f64) -> A {
    A::from(value).unwrap_or_else(A::nan)
}

/// Resolves a possibly negative axis against an array of rank `ndim`.
pub(crate) fn resolve_axis(axis: isize, ndim: usize) -> Result<Axis> {
    let rank = ndim as isize;
    let resolved = if axis < 0 { axis + rank } else { axis };
    if resolved < 0 || resolved >= rank {
        return Err(WeightForgeError::AxisOutOfBounds { axis, ndim });
    }
    Ok(Axis(resolved as usize))
}

/// L2 norms of every lane along `axis`, keeping the reduced axis with
/// length 1 so the result broadcasts against `w`.
pub(crate) fn l2_norms<A: Float>(w: &ArrayViewD<'_, A>, axis: Axis) -> ArrayD<A> {
    w.map_axis(axis, |lane| {
        lane.iter().fold(A::zero(), |acc, &x| acc + x * x).sqrt()
    })
    .insert_axis(axis)
}

/// Rescales each lane of `w` along `axis` from its current norm to the norm
/// returned by `desired`.
///
/// The factor is `desired(norm) / (EPSILON + norm)`, so all-zero lanes stay
/// zero.
pub(crate) fn rescale_lanes<A, F>(w: &mut ArrayD<A>, axis: isize, desired: F) -> Result<()>
where
    A: Float,
    F: Fn(A) -> A,
{
    let axis = resolve_axis(axis, w.ndim())?;
    let eps = cast::<A>(EPSILON);
    let scale = l2_norms(&w.view(), axis).mapv(|norm| desired(norm) / (eps + norm));
    w.zip_mut_with(&scale, |x, &s| *x = *x * s);
    Ok(())
}

/// Clamps `x` into `[lo, hi]`, letting NaN through.
#[inline]
pub(crate) fn clip<A: Float>(x: A, lo: A, hi: A) -> A {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}
