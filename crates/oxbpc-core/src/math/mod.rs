//! Mathematical operations for black point detection
//!
//! - 3x3 matrix operations and the exact linear solve
//! - Chromatic adaptation (Bradford)
//! - Least-squares quadratic fit and monotonicity check for round-trip ramps

pub mod chromatic_adaptation;
pub mod fit;
pub mod matrix;

pub use chromatic_adaptation::{adapt_to_illuminant, bradford_matrix};
pub use fit::{QuadraticFit, ResponseSample, is_monotonic, root_of_least_squares_quadratic};
pub use matrix::Matrix3x3;
