//! Black point estimation
//!
//! Two entry points, both total over their inputs:
//!
//! - [`detect_black_point`] picks one of a zero result, the fixed v4
//!   perceptual black, the (optional) `bkpt` tag, a perceptual round trip for
//!   output CMYK profiles, or the profile's darkest colorant.
//! - [`detect_destination_black_point`] implements the destination black
//!   point procedure Adobe published with its black point compensation
//!   method. It inspects the L* response of a Lab -> profile -> Lab round trip
//!   and fits the shadow toe with a quadratic when the response misbehaves.
//!
//! Every successful result is achromatic with L* <= 50. An `Err` stands for
//! the zero triplet; `Ok(Xyz::ZERO)` is a legitimate "no black" answer.

mod colorant;
mod destination;
mod detect;
mod roundtrip;

pub use colorant::DeviceEndPoints;
pub use destination::detect_destination_black_point;
pub use detect::detect_black_point;

use thiserror::Error;

use crate::color::Xyz;
use crate::error::EngineError;
use crate::types::{ColorSpace, IntentDirection, RenderingIntent};

/// Black of the v4 perceptual reference medium, D50 XYZ
pub const PERCEPTUAL_BLACK: Xyz = Xyz::new(0.00336, 0.0034731, 0.00287);

/// Per-call detection options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectFlags {
    /// Trust the `bkpt` tag for relative colorimetric intent
    ///
    /// Off by default: the tag is wrong in a large share of real-world
    /// profiles. When on, the tag is still adapted to D50 and forced neutral.
    pub use_black_point_tag: bool,
}

impl DetectFlags {
    /// Flags with the `bkpt` tag path enabled
    pub const fn with_black_point_tag() -> Self {
        Self {
            use_black_point_tag: true,
        }
    }
}

/// Why no black point could be estimated
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BlackPointError {
    /// Device links connect two devices and have no black of their own
    #[error("Device link profiles have no black point")]
    DeviceLink,

    /// The destination algorithm only handles perceptual, relative
    /// colorimetric and saturation intents
    #[error("Unsupported rendering intent: {0:?}")]
    UnsupportedIntent(RenderingIntent),

    /// The profile cannot be used with this intent
    #[error("Profile does not support {intent:?} as {direction}")]
    IntentNotSupported {
        intent: RenderingIntent,
        direction: IntentDirection,
    },

    /// No darkest colorant is known for the color space
    #[error("No darker colorant for color space {0:?}")]
    UnsupportedColorSpace(ColorSpace),

    /// Profile formatter and end point table disagree on the channel count
    #[error("Channel mismatch: end points have {expected}, profile has {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    /// A probe transform or auxiliary profile failed
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result of a black point estimate
pub type BlackPointResult = std::result::Result<Xyz, BlackPointError>;

/// Triplet view of a [`BlackPointResult`]
pub trait BlackPointResultExt {
    /// The estimate, or the zero triplet on failure
    fn or_zero(self) -> Xyz;
}

impl BlackPointResultExt for BlackPointResult {
    fn or_zero(self) -> Xyz {
        self.unwrap_or(Xyz::ZERO)
    }
}
