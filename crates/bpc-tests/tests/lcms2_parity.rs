//! Parity with lcms2's own black point detectors
//!
//! lcms2 built-in matrix/TRC profiles are mirrored as synthetic profiles:
//! header fields come from lcms2, and the darkest colorant per intent is
//! measured through an lcms2 transform into v2 Lab. Both implementations
//! then run on the same profile.

use bpc_tests::reference::{
    d50_xyy, lcms2_black_point, lcms2_destination_black_point, lcms2_gray_black_lab,
    lcms2_rgb_black_lab, mirror_matrix_shaper,
};
use bpc_tests::{SyntheticEngine, SyntheticProfile, init_logging};
use lcms2::{Profile, ToneCurve};
use oxbpc_core::{
    BlackPointResult, ColorSpace, DetectFlags, ProfileClass, ProfileVersion, RenderingIntent,
    Xyz, detect_black_point, detect_destination_black_point,
};

const TOLERANCE: f64 = 1e-4;

const INTENTS: [RenderingIntent; 3] = [
    RenderingIntent::Perceptual,
    RenderingIntent::RelativeColorimetric,
    RenderingIntent::Saturation,
];

fn srgb() -> (Profile, SyntheticProfile) {
    let profile = Profile::new_srgb();
    let mirror = mirror_matrix_shaper(&profile, ColorSpace::Rgb, lcms2_rgb_black_lab)
        .expect("sRGB black should convert to Lab");
    (profile, mirror)
}

fn gray() -> (Profile, SyntheticProfile) {
    let profile = Profile::new_gray(&d50_xyy(), &ToneCurve::new(2.2))
        .expect("Gray profile creation failed");
    let mirror = mirror_matrix_shaper(&profile, ColorSpace::Gray, lcms2_gray_black_lab)
        .expect("gray black should convert to Lab");
    (profile, mirror)
}

/// lcms2 reports failure as `None` and we report it as `Err`
fn assert_same(ours: BlackPointResult, theirs: Option<Xyz>, context: &str) {
    match (ours, theirs) {
        (Ok(ours), Some(theirs)) => {
            assert!(
                ours.approx_eq(&theirs, TOLERANCE),
                "{context}: oxbpc {ours:?}, lcms2 {theirs:?}"
            );
        }
        (Err(_), None) => {}
        (ours, theirs) => panic!("{context}: oxbpc {ours:?}, lcms2 {theirs:?}"),
    }
}

#[test]
fn test_mirror_headers() {
    let (_, srgb) = srgb();
    assert_eq!(srgb.class, ProfileClass::Display);
    assert!(srgb.version >= ProfileVersion::V2_1);
    assert!(srgb.matrix_shaper);
    assert!(!srgb.clut_output);

    let (_, gray) = gray();
    assert_eq!(gray.space, ColorSpace::Gray);
    assert_eq!(gray.channels, 1);
}

#[test]
fn test_detect_black_point_matches_lcms2() {
    init_logging();

    for (name, (profile, mirror)) in [("sRGB", srgb()), ("gray 2.2", gray())] {
        for intent in INTENTS {
            let engine = SyntheticEngine::new();
            let ours = detect_black_point(&engine, &mirror, intent, DetectFlags::default());
            let theirs = lcms2_black_point(&profile, intent);
            assert_same(ours, theirs, &format!("{name} {intent:?}"));
        }
    }
}

#[test]
fn test_destination_black_point_matches_lcms2() {
    init_logging();

    for (name, (profile, mirror)) in [("sRGB", srgb()), ("gray 2.2", gray())] {
        for intent in INTENTS {
            let engine = SyntheticEngine::new();
            let ours =
                detect_destination_black_point(&engine, &mirror, intent, DetectFlags::default());
            let theirs = lcms2_destination_black_point(&profile, intent);
            assert_same(ours, theirs, &format!("{name} {intent:?}"));

            // Matrix/TRC profiles never take the round trip
            assert!(engine.chains().iter().all(|c| !c.is_round_trip()));
        }
    }
}

#[test]
fn test_display_black_is_near_zero() {
    let (profile, _) = srgb();
    let black = lcms2_black_point(&profile, RenderingIntent::RelativeColorimetric)
        .expect("lcms2 should detect a black point for sRGB");
    assert!(black.y < 0.01, "sRGB black {black:?}");
}
