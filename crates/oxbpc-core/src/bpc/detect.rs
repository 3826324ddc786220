use tracing::debug;

use super::colorant::black_point_as_darker_colorant;
use super::roundtrip::black_point_using_perceptual_black;
use super::{BlackPointError, BlackPointResult, DetectFlags, PERCEPTUAL_BLACK};
use crate::color::{D50, Lab, Xyz};
use crate::math::adapt_to_illuminant;
use crate::profile::{ProfileInfo, media_white_point};
use crate::transform::TransformEngine;
use crate::types::{ColorSpace, ProfileClass, RenderingIntent};

/// Black point of a profile for one rendering intent, D50 XYZ
///
/// Dispatch, first match wins:
///
/// 1. Device links fail with [`BlackPointError::DeviceLink`].
/// 2. v4 profiles under perceptual or saturation: matrix shapers use their
///    relative colorimetric darkest colorant, everything else the fixed
///    [`PERCEPTUAL_BLACK`].
/// 3. With [`DetectFlags::use_black_point_tag`] and relative colorimetric,
///    a present `bkpt` tag, adapted to D50 and forced neutral.
/// 4. Output CMYK profiles under relative colorimetric: a perceptual round
///    trip, which discounts ink limiting.
/// 5. The darkest colorant under `intent`.
pub fn detect_black_point<E: TransformEngine>(
    engine: &E,
    profile: &E::Profile,
    intent: RenderingIntent,
    flags: DetectFlags,
) -> BlackPointResult {
    if profile.device_class() == ProfileClass::DeviceLink {
        debug!("device link has no black point");
        return Err(BlackPointError::DeviceLink);
    }

    if let Some(black) = v4_perceptual_black(engine, profile, intent) {
        return black;
    }

    if flags.use_black_point_tag && intent == RenderingIntent::RelativeColorimetric {
        if let Some(black) = profile.media_black_point() {
            let trusted = trusted_black_point_tag(profile, black);
            debug!(?trusted, "using black point tag");
            return Ok(trusted);
        }
    }

    if intent == RenderingIntent::RelativeColorimetric
        && profile.device_class() == ProfileClass::Output
        && profile.color_space() == ColorSpace::Cmyk
    {
        debug!("output CMYK, discounting ink limit");
        return black_point_using_perceptual_black(engine, profile);
    }

    black_point_as_darker_colorant(engine, profile, intent, flags)
}

/// Step 2 of the dispatch, shared with the destination resolver
///
/// v4 perceptual and saturation renderings map to the v4 perceptual
/// reference medium, whose black is fixed. `None` when the rule does not apply.
pub(super) fn v4_perceptual_black<E: TransformEngine>(
    engine: &E,
    profile: &E::Profile,
    intent: RenderingIntent,
) -> Option<BlackPointResult> {
    if !profile.version().is_v4_or_later() || !intent.is_perceptual_like() {
        return None;
    }

    if profile.is_matrix_shaper() {
        debug!(?intent, "v4 matrix shaper, using relative colorimetric colorant");
        return Some(black_point_as_darker_colorant(
            engine,
            profile,
            RenderingIntent::RelativeColorimetric,
            DetectFlags::default(),
        ));
    }

    debug!(?intent, "v4 perceptual reference medium black");
    Some(Ok(PERCEPTUAL_BLACK))
}

/// `bkpt` is absolute and often tinted: bring it to D50, then keep only L*
fn trusted_black_point_tag<P: ProfileInfo + ?Sized>(profile: &P, black: Xyz) -> Xyz {
    let media_white = media_white_point(profile);
    let untrusted = adapt_to_illuminant(black, &media_white, &D50);

    Lab::from_xyz(untrusted).neutral_clipped().to_xyz()
}
