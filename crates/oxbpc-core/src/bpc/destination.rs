//! Destination black point, after the procedure Adobe published with its
//! black point compensation implementation
//!
//! A well behaved output profile sends Lab (L, a, b) -> device -> Lab close to
//! the identity above the shadows. Near black the response flattens into a
//! toe where more darkness is requested than the device delivers; the black
//! point is where the toe begins. When the response is straight enough the
//! first guess stands. Otherwise the lower part of the normalized response is
//! fitted with a quadratic whose root marks the toe.

use tracing::{debug, trace};

use super::detect::{detect_black_point, v4_perceptual_black};
use super::roundtrip::create_round_trip;
use super::{BlackPointError, BlackPointResult, DetectFlags};
use crate::color::Lab;
use crate::color::lab::MAX_BLACK_LIGHTNESS;
use crate::error::Result;
use crate::math::{ResponseSample, is_monotonic, root_of_least_squares_quadratic};
use crate::profile::ProfileInfo;
use crate::transform::{ColorTransform, TransformEngine};
use crate::types::{IntentDirection, RenderingIntent};

/// Largest |L*out - L*in| a straight midrange may show
const STRAIGHT_TOLERANCE: f64 = 4.0;

/// Fraction of the [MinL, MaxL] span treated as shadows by the straightness test
const SHADOW_FRACTION: f64 = 0.2;

/// Normalized response band `[lo, hi)` sampled for the fit
fn fit_band(intent: RenderingIntent) -> (f64, f64) {
    if intent == RenderingIntent::RelativeColorimetric {
        (0.1, 0.5)
    } else {
        (0.03, 0.25)
    }
}

/// Black point of a profile used as the destination of a transform
///
/// Only perceptual, relative colorimetric and saturation are accepted.
/// Profiles that are not LUT based in the output direction, or whose space is
/// not gray, RGB or CMYK, are handled by [`detect_black_point`], which is also
/// the fallback when the shadow response gives nothing to fit.
pub fn detect_destination_black_point<E: TransformEngine>(
    engine: &E,
    profile: &E::Profile,
    intent: RenderingIntent,
    flags: DetectFlags,
) -> BlackPointResult {
    if intent == RenderingIntent::AbsoluteColorimetric {
        return Err(BlackPointError::UnsupportedIntent(intent));
    }

    if let Some(black) = v4_perceptual_black(engine, profile, intent) {
        return black;
    }

    let space = profile.color_space();
    if !profile.is_clut(intent, IntentDirection::Output) || !space.is_adobe_bpc_space() {
        debug!(?space, "not a LUT based gray/RGB/CMYK output, using direct detection");
        return detect_black_point(engine, profile, intent, flags);
    }

    let initial = if intent == RenderingIntent::RelativeColorimetric {
        Lab::from_xyz(detect_black_point(engine, profile, intent, flags)?)
    } else {
        Lab::default()
    };

    let round_trip = create_round_trip(engine, profile, intent)?;
    let probe = |l: f64| -> Result<f64> {
        Ok(round_trip.transform_lab(initial.with_lightness(l))?.l)
    };

    let min_l = probe(0.0)?;
    let max_l = probe(100.0)?;
    trace!(min_l, max_l, ?initial, "round trip span");

    if intent == RenderingIntent::RelativeColorimetric
        && is_straight_midrange(&probe, min_l, max_l)?
    {
        debug!("round trip is straight in the midrange, keeping initial guess");
        return Ok(initial.to_xyz());
    }

    let (lo, hi) = fit_band(intent);
    let mut samples = Vec::new();
    for l in 0..=100 {
        let lightness = f64::from(l);
        let response = (probe(lightness)? - min_l) / (max_l - min_l);
        if response >= lo && response < hi {
            samples.push(ResponseSample {
                lightness,
                response,
            });
        }
    }
    trace!(count = samples.len(), lo, hi, "shadow samples");

    if samples.is_empty() {
        debug!("no samples in the shadow band, using direct detection");
        drop(round_trip);
        return detect_black_point(engine, profile, intent, flags);
    }

    let responses: Vec<f64> = samples.iter().map(|s| s.response).collect();
    if is_monotonic(&responses) {
        debug!("shadow response is monotonic, keeping initial guess");
        return Ok(initial.to_xyz());
    }

    let Some(root) = root_of_least_squares_quadratic(&samples) else {
        debug!(count = samples.len(), "degenerate quadratic fit, using direct detection");
        drop(round_trip);
        return detect_black_point(engine, profile, intent, flags);
    };
    trace!(root, "fitted toe");

    let l = if (0.0..=MAX_BLACK_LIGHTNESS).contains(&root) {
        root
    } else {
        0.0
    };

    Ok(initial.with_lightness(l).to_xyz())
}

/// Whether L*out tracks L*in within the tolerance above the shadows
///
/// Sweeps L* 0..=100 and stops at the first sample that strays.
fn is_straight_midrange(
    probe: &impl Fn(f64) -> Result<f64>,
    min_l: f64,
    max_l: f64,
) -> Result<bool> {
    let shadow_limit = min_l + SHADOW_FRACTION * (max_l - min_l);

    for l in 0..=100 {
        let lightness = f64::from(l);
        let out = probe(lightness)?;
        if out > shadow_limit && (out - lightness).abs() > STRAIGHT_TOLERANCE {
            trace!(lightness, out, "midrange not straight");
            return Ok(false);
        }
    }

    Ok(true)
}
