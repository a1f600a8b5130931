//! Tolerance-based array comparison.

use ndarray::ArrayD;
use num_traits::Float;

/// Default absolute/relative tolerance for float32 comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Asserts that `actual` holds as many entries as `expected` and that every
/// pair, in logical (row-major) order, differs by at most
/// `tol * max(1, |expected|)`.
///
/// Only the length is checked; compare `actual.shape()` separately when the
/// shape matters.
///
/// # Panics
///
/// Panics with the first offending index when the arrays differ.
pub fn assert_arrays_close<A: Float + std::fmt::Debug>(
    actual: &ArrayD<A>,
    expected: &[A],
    tol: f64,
) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: got {:?}, expected {:?}",
        actual,
        expected
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let a = a.to_f64().unwrap_or(f64::NAN);
        let e = e.to_f64().unwrap_or(f64::NAN);
        let bound = tol * e.abs().max(1.0);
        assert!(
            (a - e).abs() <= bound,
            "entry {} differs: got {}, expected {} (tolerance {})",
            i,
            a,
            e,
            bound
        );
    }
}
