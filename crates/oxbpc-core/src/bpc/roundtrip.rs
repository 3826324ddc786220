//! Lab -> profile -> profile -> Lab probes

use tracing::{debug, trace};

use super::colorant::neutral_black;
use super::BlackPointResult;
use crate::color::{Lab, Xyz};
use crate::error::Result;
use crate::profile::ProfileInfo;
use crate::transform::{
    ChainStage, ColorTransform, LabEncoding, PixelFormat, TransformEngine, TransformFlags,
};
use crate::types::{IntentDirection, RenderingIntent};

/// Round trip through `profile`, entering it with `intent`
///
/// The way back into Lab is always relative colorimetric. No stage uses
/// black point compensation.
pub(super) fn create_round_trip<E: TransformEngine>(
    engine: &E,
    profile: &E::Profile,
    intent: RenderingIntent,
) -> Result<E::Transform> {
    let lab = engine.create_lab_profile(LabEncoding::V4)?;
    let relative = RenderingIntent::RelativeColorimetric;

    engine.create_transform(
        &[
            ChainStage::probe(&lab, relative),
            ChainStage::probe(profile, intent),
            ChainStage::probe(profile, relative),
            ChainStage::probe(&lab, relative),
        ],
        PixelFormat::LabDouble,
        PixelFormat::LabDouble,
        TransformFlags::PROBE,
    )
}

/// Black of an output CMYK profile with its ink limit discounted
///
/// Lab (0, 0, 0) goes into the profile perceptually and comes back out
/// relative colorimetric. A profile without a perceptual input table yields
/// `Ok(Xyz::ZERO)`.
pub(super) fn black_point_using_perceptual_black<E: TransformEngine>(
    engine: &E,
    profile: &E::Profile,
) -> BlackPointResult {
    if !profile.is_intent_supported(RenderingIntent::Perceptual, IntentDirection::Input) {
        debug!("perceptual black: no perceptual input intent, black is zero");
        return Ok(Xyz::ZERO);
    }

    let round_trip = create_round_trip(engine, profile, RenderingIntent::Perceptual)?;
    let lab = round_trip.transform_lab(Lab::default())?;
    trace!(l = lab.l, a = lab.a, b = lab.b, "perceptual black round trip");

    Ok(neutral_black(lab))
}
