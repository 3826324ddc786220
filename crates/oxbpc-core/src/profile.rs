//! Read-only profile access
//!
//! The estimators never parse or modify a profile. They only ask the
//! questions below, so any profile representation (a parsed ICC file, an
//! lcms2 handle, a synthetic test profile) can be plugged in.

use crate::color::{D50, WhitePoint, Xyz};
use crate::types::{ColorSpace, IntentDirection, ProfileClass, ProfileVersion, RenderingIntent};

/// Profile introspection needed by black point detection
pub trait ProfileInfo {
    /// Device class from the header
    fn device_class(&self) -> ProfileClass;

    /// Data color space from the header
    fn color_space(&self) -> ColorSpace;

    /// Channels of the profile's native 16-bit formatter
    fn channels(&self) -> usize {
        self.color_space().channels()
    }

    /// Header version
    fn version(&self) -> ProfileVersion;

    /// Whether the profile can be used with `intent` in `direction`
    fn is_intent_supported(&self, intent: RenderingIntent, direction: IntentDirection) -> bool;

    /// Matrix/TRC profile (same black for all intents)
    fn is_matrix_shaper(&self) -> bool;

    /// Whether `intent` in `direction` is implemented by a lookup table
    fn is_clut(&self, intent: RenderingIntent, direction: IntentDirection) -> bool;

    /// `bkpt` tag contents, absolute XYZ
    fn media_black_point(&self) -> Option<Xyz> {
        None
    }

    /// `wtpt` tag contents, absolute XYZ
    fn media_white_point_tag(&self) -> Option<Xyz> {
        None
    }
}

/// Media white the profile was measured under
///
/// Version 2 display profiles always report D50, since their `wtpt` is the
/// display white rather than the PCS adaptation source. A missing tag is D50
/// as well.
pub fn media_white_point<P: ProfileInfo + ?Sized>(profile: &P) -> WhitePoint {
    if profile.device_class() == ProfileClass::Display && !profile.version().is_v4_or_later() {
        return D50;
    }

    profile
        .media_white_point_tag()
        .map_or(D50, WhitePoint::from_xyz)
}
