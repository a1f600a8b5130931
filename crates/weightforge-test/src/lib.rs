//! Shared test fixtures for WeightForge crates.
//!
//! This crate provides reference data and helpers for testing.
//! It does NOT depend on `weightforge-core` to avoid circular dependencies.
//!
//! - [`reference`] - Reference weight vector and expected projections
//! - [`assert`] - Tolerance-based array comparison
//! - [`random`] - Seeded random weight arrays
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! weightforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use weightforge_test::reference::{initial_weights, MAX_NORM_EXPECTED};
//! use weightforge_test::assert_arrays_close;
//! ```

pub mod assert;
pub mod random;
pub mod reference;

pub use assert::{assert_arrays_close, DEFAULT_TOLERANCE};
pub use random::{random_weights, seeded_rng};
pub use reference::{initial_weights, MAX_NORM_EXPECTED, NON_NEG_EXPECTED, UNIT_NORM_EXPECTED};
