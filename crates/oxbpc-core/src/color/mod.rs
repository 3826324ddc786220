//! Color space types and conversions
//!
//! This module provides:
//! - CIE XYZ color space
//! - CIELAB (L*a*b*) color space
//! - The D50 profile connection space white point

pub mod lab;
pub mod white_point;
pub mod xyz;

pub use lab::Lab;
pub use white_point::{D50, WhitePoint};
pub use xyz::Xyz;
