//! Reference weight vector and its expected projections.
//!
//! The expected values were computed in double precision with an epsilon
//! of `1e-7` in the norm divisor.

use ndarray::{arr1, ArrayD};

/// Raw values of the reference weight vector.
pub const INITIAL_VALUES: [f32; 6] = [-1.0, 2.0, 0.0, 4.0, -5.0, 6.0];

/// `NonNeg` applied to [`INITIAL_VALUES`].
pub const NON_NEG_EXPECTED: [f32; 6] = [0.0, 2.0, 0.0, 4.0, 0.0, 6.0];

/// `MaxNorm` (max value 2, axis 0) applied to [`INITIAL_VALUES`].
pub const MAX_NORM_EXPECTED: [f32; 6] = [
    -0.220_863_05,
    0.441_726_1,
    0.0,
    0.883_452_2,
    -1.104_315_3,
    1.325_178_3,
];

/// `UnitNorm` and default `MinMaxNorm` applied to [`INITIAL_VALUES`]:
/// exactly half of [`MAX_NORM_EXPECTED`].
pub const UNIT_NORM_EXPECTED: [f32; 6] = [
    -0.110_431_53,
    0.220_863_05,
    0.0,
    0.441_726_1,
    -0.552_157_6,
    0.662_589_16,
];

/// The reference weight vector as a dynamic-rank array.
pub fn initial_weights() -> ArrayD<f32> {
    arr1(&INITIAL_VALUES).into_dyn()
}
