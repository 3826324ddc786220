//! Direct black point detection against synthetic profiles
//!
//! Each test drives one branch of the dispatch and checks both the estimate
//! and the probe chains the engine was asked to link.

use bpc_tests::curves;
use bpc_tests::{ProfileRole, SyntheticEngine, SyntheticProfile, init_logging};
use oxbpc_core::{
    BlackPointError, BlackPointResultExt, ColorSpace, DetectFlags, IntentDirection, Lab,
    LabEncoding, PERCEPTUAL_BLACK, PixelFormat, ProfileClass, ProfileVersion, RenderingIntent,
    TransformFlags, Xyz, detect_black_point,
};

const EPS: f64 = 1e-9;

fn neutral(l: f64) -> Xyz {
    Lab::new(l, 0.0, 0.0).to_xyz()
}

fn assert_xyz_eq(actual: Xyz, expected: Xyz) {
    assert!(
        actual.approx_eq(&expected, EPS),
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn test_device_link_has_no_black() {
    init_logging();
    let engine = SyntheticEngine::new();
    let link = SyntheticProfile::device_link();

    for intent in [
        RenderingIntent::Perceptual,
        RenderingIntent::RelativeColorimetric,
        RenderingIntent::Saturation,
        RenderingIntent::AbsoluteColorimetric,
    ] {
        let result = detect_black_point(&engine, &link, intent, DetectFlags::default());
        assert_eq!(result, Err(BlackPointError::DeviceLink));
        assert_eq!(result.or_zero(), Xyz::ZERO);
    }

    assert!(engine.chains().is_empty());
    assert_eq!(engine.counters().profiles_created(), 0);
}

#[test]
fn test_v4_matrix_shaper_uses_relative_colorant() {
    init_logging();
    let engine = SyntheticEngine::new();
    let display = SyntheticProfile::matrix_display()
        .with_colorant_for(RenderingIntent::RelativeColorimetric, Lab::new(1.5, 0.4, -0.3))
        .with_colorant_for(RenderingIntent::Perceptual, Lab::new(20.0, 0.0, 0.0))
        .with_colorant_for(RenderingIntent::Saturation, Lab::new(30.0, 0.0, 0.0));

    let relative = detect_black_point(
        &engine,
        &display,
        RenderingIntent::RelativeColorimetric,
        DetectFlags::default(),
    )
    .unwrap();
    assert_xyz_eq(relative, neutral(1.5));

    for intent in [RenderingIntent::Perceptual, RenderingIntent::Saturation] {
        let black = detect_black_point(&engine, &display, intent, DetectFlags::default()).unwrap();
        assert_eq!(black, relative, "{intent:?}");
    }

    for chain in engine.chains() {
        assert_eq!(chain.device_intent(), Some(RenderingIntent::RelativeColorimetric));
    }
}

#[test]
fn test_v4_lut_profile_uses_perceptual_reference_black() {
    init_logging();
    let engine = SyntheticEngine::new();

    for profile in [
        SyntheticProfile::cmyk_printer().with_version(ProfileVersion::V4_3),
        SyntheticProfile::rgb_printer()
            .with_version(ProfileVersion::V4_0)
            .with_colorant(Lab::new(25.0, 5.0, 5.0)),
        SyntheticProfile::new(ProfileClass::Input, ColorSpace::Rgb, ProfileVersion::V4_4),
    ] {
        for intent in [RenderingIntent::Perceptual, RenderingIntent::Saturation] {
            let black = detect_black_point(&engine, &profile, intent, DetectFlags::default());
            assert_eq!(black, Ok(PERCEPTUAL_BLACK), "{profile:?} {intent:?}");
        }
    }

    assert!(engine.chains().is_empty());
}

#[test]
fn test_v4_relative_still_probes() {
    let engine = SyntheticEngine::new();
    let profile = SyntheticProfile::rgb_printer()
        .with_version(ProfileVersion::V4_3)
        .with_colorant(Lab::new(8.0, 2.0, 2.0));

    let black = detect_black_point(
        &engine,
        &profile,
        RenderingIntent::RelativeColorimetric,
        DetectFlags::default(),
    )
    .unwrap();
    assert_xyz_eq(black, neutral(8.0));
    assert_eq!(engine.chains().len(), 1);
}

#[test]
fn test_output_cmyk_relative_discounts_ink_limit() {
    init_logging();
    let engine = SyntheticEngine::new();
    // Darkest colorant would say 30, the perceptual round trip says 6
    let printer = SyntheticProfile::cmyk_printer()
        .with_colorant(Lab::new(30.0, 0.0, 0.0))
        .with_round_trip(curves::clipped_toe(6.0));

    let black = detect_black_point(
        &engine,
        &printer,
        RenderingIntent::RelativeColorimetric,
        DetectFlags::default(),
    )
    .unwrap();
    assert_xyz_eq(black, neutral(6.0));

    let chains = engine.chains();
    assert_eq!(chains.len(), 1);
    let chain = &chains[0];
    assert!(chain.is_round_trip());
    assert_eq!(chain.input, PixelFormat::LabDouble);
    assert_eq!(chain.output, PixelFormat::LabDouble);

    let intents: Vec<_> = chain.stages.iter().map(|s| s.intent).collect();
    assert_eq!(
        intents,
        [
            RenderingIntent::RelativeColorimetric,
            RenderingIntent::Perceptual,
            RenderingIntent::RelativeColorimetric,
            RenderingIntent::RelativeColorimetric,
        ]
    );
    assert_eq!(chain.stages[0].role, ProfileRole::LabPcs(LabEncoding::V4));
    assert_eq!(chain.stages[3].role, ProfileRole::LabPcs(LabEncoding::V4));
}

#[test]
fn test_output_cmyk_without_perceptual_is_zero() {
    let engine = SyntheticEngine::new();
    let printer = SyntheticProfile::cmyk_printer()
        .with_colorant(Lab::new(12.0, 0.0, 0.0))
        .without_intent(RenderingIntent::Perceptual, IntentDirection::Input);

    let black = detect_black_point(
        &engine,
        &printer,
        RenderingIntent::RelativeColorimetric,
        DetectFlags::default(),
    );
    assert_eq!(black, Ok(Xyz::ZERO));
    assert!(engine.chains().is_empty());
}

#[test]
fn test_cmyk_non_output_uses_colorant() {
    let engine = SyntheticEngine::new();
    let proofer = SyntheticProfile::cmyk_printer()
        .with_class(ProfileClass::Input)
        .with_colorant(Lab::new(14.0, 3.0, -2.0))
        .with_round_trip(curves::clipped_toe(40.0));

    let black = detect_black_point(
        &engine,
        &proofer,
        RenderingIntent::RelativeColorimetric,
        DetectFlags::default(),
    )
    .unwrap();
    assert_xyz_eq(black, neutral(14.0));
}

#[test]
fn test_darker_colorant_probe_chain() {
    let engine = SyntheticEngine::new();
    let printer = SyntheticProfile::cmyk_printer()
        .with_colorant_for(RenderingIntent::Saturation, Lab::new(18.0, 10.0, 10.0));

    let black = detect_black_point(
        &engine,
        &printer,
        RenderingIntent::Saturation,
        DetectFlags::default(),
    )
    .unwrap();
    assert_xyz_eq(black, neutral(18.0));

    let chains = engine.chains();
    assert_eq!(chains.len(), 1);
    let chain = &chains[0];
    assert_eq!(
        chain.input,
        PixelFormat::Device {
            space: ColorSpace::Cmyk,
            channels: 4
        }
    );
    assert_eq!(chain.output, PixelFormat::LabDouble);
    assert_eq!(chain.flags, TransformFlags::PROBE);
    assert_eq!(chain.stages[0].role, ProfileRole::Device);
    assert_eq!(chain.stages[1].role, ProfileRole::LabPcs(LabEncoding::V2));
    assert!(chain.stages.iter().all(|s| s.intent == RenderingIntent::Saturation));
    assert!(chain.stages.iter().all(|s| !s.black_point_compensation));
    assert!(chain.stages.iter().all(|s| s.adaptation_state == 1.0));
}

#[test]
fn test_light_colorant_is_clipped() {
    let engine = SyntheticEngine::new();
    let washed_out = SyntheticProfile::rgb_printer().with_colorant(Lab::new(72.0, -6.0, 9.0));

    let black = detect_black_point(
        &engine,
        &washed_out,
        RenderingIntent::Perceptual,
        DetectFlags::default(),
    )
    .unwrap();
    assert_xyz_eq(black, neutral(50.0));
}

#[test]
fn test_unsupported_input_intent() {
    let engine = SyntheticEngine::new();
    let scanner = SyntheticProfile::new(ProfileClass::Input, ColorSpace::Rgb, ProfileVersion::V2_1)
        .without_intent(RenderingIntent::Saturation, IntentDirection::Input);

    let result = detect_black_point(
        &engine,
        &scanner,
        RenderingIntent::Saturation,
        DetectFlags::default(),
    );
    assert_eq!(
        result,
        Err(BlackPointError::IntentNotSupported {
            intent: RenderingIntent::Saturation,
            direction: IntentDirection::Input,
        })
    );
    assert!(engine.chains().is_empty());
}

#[test]
fn test_space_without_end_points() {
    let engine = SyntheticEngine::new();
    let xyz = SyntheticProfile::new(ProfileClass::ColorSpace, ColorSpace::Xyz, ProfileVersion::V2_1);

    let result = detect_black_point(
        &engine,
        &xyz,
        RenderingIntent::RelativeColorimetric,
        DetectFlags::default(),
    );
    assert_eq!(result, Err(BlackPointError::UnsupportedColorSpace(ColorSpace::Xyz)));
    assert_eq!(engine.counters().profiles_created(), 0);
}

#[test]
fn test_channel_mismatch() {
    let engine = SyntheticEngine::new();
    let odd = SyntheticProfile::rgb_printer().with_channels(4);

    let result = detect_black_point(
        &engine,
        &odd,
        RenderingIntent::Perceptual,
        DetectFlags::default(),
    );
    assert_eq!(
        result,
        Err(BlackPointError::ChannelMismatch {
            expected: 3,
            actual: 4
        })
    );
}

#[test]
fn test_black_point_tag_ignored_by_default() {
    let engine = SyntheticEngine::new();
    let tagged = SyntheticProfile::rgb_printer()
        .with_colorant(Lab::new(4.0, 0.0, 0.0))
        .with_black_tag(neutral(20.0));

    let black = detect_black_point(
        &engine,
        &tagged,
        RenderingIntent::RelativeColorimetric,
        DetectFlags::default(),
    )
    .unwrap();
    assert_xyz_eq(black, neutral(4.0));
}

#[test]
fn test_black_point_tag_when_enabled() {
    init_logging();
    let engine = SyntheticEngine::new();
    let tag = Lab::new(9.0, 4.0, -3.0).to_xyz();
    let tagged = SyntheticProfile::rgb_printer()
        .with_colorant(Lab::new(4.0, 0.0, 0.0))
        .with_black_tag(tag);
    let flags = DetectFlags::with_black_point_tag();

    let black =
        detect_black_point(&engine, &tagged, RenderingIntent::RelativeColorimetric, flags).unwrap();
    let lab = Lab::from_xyz(black);
    assert!((lab.l - 9.0).abs() < 1e-9, "L* = {}", lab.l);
    assert!(lab.a.abs() < 1e-9 && lab.b.abs() < 1e-9);
    assert!(engine.chains().is_empty());

    // Only relative colorimetric reads the tag
    let perceptual =
        detect_black_point(&engine, &tagged, RenderingIntent::Perceptual, flags).unwrap();
    assert_xyz_eq(perceptual, neutral(4.0));
}

#[test]
fn test_black_point_tag_adapted_from_media_white() {
    let engine = SyntheticEngine::new();
    let d65 = Xyz::new(0.9505, 1.0, 1.089);
    let tag = Xyz::new(0.0095, 0.01, 0.0109);
    let flags = DetectFlags::with_black_point_tag();

    let printer = SyntheticProfile::rgb_printer()
        .with_black_tag(tag)
        .with_white_tag(d65);
    let black =
        detect_black_point(&engine, &printer, RenderingIntent::RelativeColorimetric, flags).unwrap();

    // Bradford keeps Y of a neutral under the source white
    let lab = Lab::from_xyz(black);
    assert!((lab.l - Lab::from_xyz(Xyz::new(0.0, 0.01, 0.0)).l).abs() < 0.05);
    assert!(lab.a.abs() < 1e-9 && lab.b.abs() < 1e-9);
    assert!(lab.l <= 50.0);

    // v2 display profiles keep D50 as media white, so the tag is not adapted
    let display = SyntheticProfile::new(ProfileClass::Display, ColorSpace::Rgb, ProfileVersion::V2_1)
        .with_black_tag(tag)
        .with_white_tag(d65);
    let black =
        detect_black_point(&engine, &display, RenderingIntent::RelativeColorimetric, flags).unwrap();
    assert_xyz_eq(black, Lab::from_xyz(tag).neutral_clipped().to_xyz());
}

#[test]
fn test_engine_errors_surface() {
    let printer = SyntheticProfile::rgb_printer();

    let engine = SyntheticEngine::new().failing_lab_profile(LabEncoding::V2);
    let result = detect_black_point(
        &engine,
        &printer,
        RenderingIntent::Perceptual,
        DetectFlags::default(),
    );
    assert!(matches!(result, Err(BlackPointError::Engine(_))));

    let engine = SyntheticEngine::new().failing_chain(2);
    let result = detect_black_point(
        &engine,
        &printer,
        RenderingIntent::Perceptual,
        DetectFlags::default(),
    );
    assert!(matches!(result, Err(BlackPointError::Engine(_))));
    assert_eq!(result.or_zero(), Xyz::ZERO);
}
