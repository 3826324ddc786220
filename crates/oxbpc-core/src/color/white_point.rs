//! White points
//!
//! The estimators only ever work in the ICC profile connection space, so D50
//! is the single illuminant defined here. Media white points read from
//! profiles are plain [`WhitePoint`] values built with [`WhitePoint::from_xyz`].

use crate::color::Xyz;

/// A white point definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitePoint {
    /// Name of the illuminant
    pub name: &'static str,
    /// CIE XYZ coordinates (Y normalized to 1.0)
    pub xyz: Xyz,
}

impl WhitePoint {
    /// Create a new white point
    pub const fn new(name: &'static str, x: f64, y: f64, z: f64) -> Self {
        Self {
            name,
            xyz: Xyz::new(x, y, z),
        }
    }

    /// Wrap a measured white, such as a profile's `wtpt` tag
    pub const fn from_xyz(xyz: Xyz) -> Self {
        Self { name: "media", xyz }
    }

    /// Get the chromaticity coordinates (x, y)
    pub fn chromaticity(&self) -> (f64, f64) {
        let sum = self.xyz.x + self.xyz.y + self.xyz.z;
        if sum > 0.0 {
            (self.xyz.x / sum, self.xyz.y / sum)
        } else {
            (0.0, 0.0)
        }
    }
}

/// CIE Standard Illuminant D50, as encoded in the ICC PCS
///
/// ICC.1:2022 uses Z = 0.8249 for the PCS illuminant; all Lab <-> XYZ
/// conversions in this crate are relative to this value.
pub const D50: WhitePoint = WhitePoint::new("D50", 0.9642, 1.0, 0.8249);
