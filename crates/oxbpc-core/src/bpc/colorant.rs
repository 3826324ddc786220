//! Black from the darkest colorant
//!
//! Assumes more colorant means a darker color and no ink limit, which holds
//! for relative colorimetric on well behaved profiles.

use tracing::{debug, trace};

use super::{BlackPointError, BlackPointResult, DetectFlags};
use crate::color::{Lab, Xyz};
use crate::profile::ProfileInfo;
use crate::transform::{
    ChainStage, ColorTransform, LabEncoding, PixelFormat, TransformEngine, TransformFlags,
};
use crate::types::{ColorSpace, IntentDirection, RenderingIntent};

const GRAY_BLACK: [u16; 1] = [0];
const GRAY_WHITE: [u16; 1] = [0xffff];
const RGB_BLACK: [u16; 3] = [0; 3];
const RGB_WHITE: [u16; 3] = [0xffff; 3];
const LAB_BLACK: [u16; 3] = [0, 0x8080, 0x8080];
const LAB_WHITE: [u16; 3] = [0xffff, 0x8080, 0x8080];
const CMYK_BLACK: [u16; 4] = [0xffff; 4];
const CMYK_WHITE: [u16; 4] = [0; 4];
const CMY_BLACK: [u16; 3] = [0xffff; 3];
const CMY_WHITE: [u16; 3] = [0; 3];

/// Device values of the lightest and darkest colorant, 16-bit encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceEndPoints {
    /// Paper or full emission
    pub white: &'static [u16],
    /// Full colorant (400% ink for CMYK)
    pub black: &'static [u16],
}

impl DeviceEndPoints {
    /// End points for a color space, `None` when the space has no fixed ones
    ///
    /// Lab uses the v4 16-bit encoding, where a* = b* = 0 is `0x8080`.
    pub fn for_space(space: ColorSpace) -> Option<Self> {
        let (white, black): (&'static [u16], &'static [u16]) = match space {
            ColorSpace::Gray => (&GRAY_WHITE, &GRAY_BLACK),
            ColorSpace::Rgb => (&RGB_WHITE, &RGB_BLACK),
            ColorSpace::Lab => (&LAB_WHITE, &LAB_BLACK),
            ColorSpace::Cmyk => (&CMYK_WHITE, &CMYK_BLACK),
            ColorSpace::Cmy => (&CMY_WHITE, &CMY_BLACK),
            _ => return None,
        };
        Some(Self { white, black })
    }

    /// Channels per end point
    pub fn channels(&self) -> usize {
        self.black.len()
    }
}

/// Run the profile's darkest colorant through profile -> Lab
///
/// The Lab side is a v2 Lab profile, so the engine does not come back here
/// while linking.
pub(super) fn black_point_as_darker_colorant<E: TransformEngine>(
    engine: &E,
    profile: &E::Profile,
    intent: RenderingIntent,
    _flags: DetectFlags,
) -> BlackPointResult {
    if !profile.is_intent_supported(intent, IntentDirection::Input) {
        debug!(?intent, "darker colorant: intent not supported as input");
        return Err(BlackPointError::IntentNotSupported {
            intent,
            direction: IntentDirection::Input,
        });
    }

    let input = PixelFormat::for_profile(profile);
    let space = profile.color_space();

    let end_points =
        DeviceEndPoints::for_space(space).ok_or(BlackPointError::UnsupportedColorSpace(space))?;

    if end_points.channels() != input.channels() {
        return Err(BlackPointError::ChannelMismatch {
            expected: end_points.channels(),
            actual: input.channels(),
        });
    }

    let lab_profile = engine.create_lab_profile(LabEncoding::V2)?;
    let xform = engine.create_transform(
        &[
            ChainStage::probe(profile, intent),
            ChainStage::probe(&lab_profile, intent),
        ],
        input,
        PixelFormat::LabDouble,
        TransformFlags::PROBE,
    )?;
    drop(lab_profile);

    let lab = xform.transform_device_to_lab(end_points.black)?;
    trace!(?space, l = lab.l, a = lab.a, b = lab.b, "darkest colorant");

    Ok(neutral_black(lab))
}

/// Force a probed Lab neutral, cap it at L* 50 and take it to D50 XYZ
pub(super) fn neutral_black(lab: Lab) -> Xyz {
    lab.neutral_clipped().to_xyz()
}
