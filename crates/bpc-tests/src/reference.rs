//! lcms2 reference helpers
//!
//! lcms2 ships its own black point detectors. These helpers run them, and
//! build synthetic mirrors of lcms2 built-in profiles (header fields read
//! from lcms2, darkest colorant measured through an lcms2 transform) so both
//! implementations can be compared on the same profile.

use std::slice;

use lcms2::{CIExyY, GlobalContext, Intent, PixelFormat, Profile, ProfileClassSignature, Transform};
use oxbpc_core::{ColorSpace, Lab, ProfileClass, ProfileVersion, RenderingIntent, Xyz};

use crate::synthetic::SyntheticProfile;

/// D50 as xyY, for lcms2 Lab and gray profiles
pub fn d50_xyy() -> CIExyY {
    CIExyY {
        x: 0.3457,
        y: 0.3585,
        Y: 1.0,
    }
}

pub fn to_lcms2_intent(intent: RenderingIntent) -> Intent {
    match intent {
        RenderingIntent::Perceptual => Intent::Perceptual,
        RenderingIntent::RelativeColorimetric => Intent::RelativeColorimetric,
        RenderingIntent::Saturation => Intent::Saturation,
        RenderingIntent::AbsoluteColorimetric => Intent::AbsoluteColorimetric,
    }
}

fn from_lcms2_class(class: ProfileClassSignature) -> ProfileClass {
    match class {
        ProfileClassSignature::InputClass => ProfileClass::Input,
        ProfileClassSignature::DisplayClass => ProfileClass::Display,
        ProfileClassSignature::OutputClass => ProfileClass::Output,
        ProfileClassSignature::LinkClass => ProfileClass::DeviceLink,
        ProfileClassSignature::AbstractClass => ProfileClass::Abstract,
        ProfileClassSignature::ColorSpaceClass => ProfileClass::ColorSpace,
        ProfileClassSignature::NamedColorClass => ProfileClass::NamedColor,
        _ => ProfileClass::Unknown,
    }
}

/// lcms2 reports the version as a float, e.g. `4.3`
fn from_lcms2_version(version: f64) -> ProfileVersion {
    let major = version.trunc();
    let minor = ((version - major) * 10.0).round();
    ProfileVersion::new(major as u8, minor as u8, 0)
}

/// `cmsDetectBlackPoint`
pub fn lcms2_black_point(profile: &Profile, intent: RenderingIntent) -> Option<Xyz> {
    profile
        .detect_black_point(to_lcms2_intent(intent))
        .map(|xyz| Xyz::new(xyz.X, xyz.Y, xyz.Z))
}

/// `cmsDetectDestinationBlackPoint`
pub fn lcms2_destination_black_point(profile: &Profile, intent: RenderingIntent) -> Option<Xyz> {
    profile
        .detect_destination_black_point(to_lcms2_intent(intent))
        .map(|xyz| Xyz::new(xyz.X, xyz.Y, xyz.Z))
}

fn lab2() -> Option<Profile> {
    Profile::new_lab2_context(GlobalContext::new(), &d50_xyy()).ok()
}

/// RGB (0, 0, 0) through an RGB profile into v2 Lab
pub fn lcms2_rgb_black_lab(profile: &Profile, intent: RenderingIntent) -> Option<Lab> {
    let lab = lab2()?;
    let xform = Transform::<[u16; 3], [f64; 3]>::new(
        profile,
        PixelFormat::RGB_16,
        &lab,
        PixelFormat::Lab_DBL,
        to_lcms2_intent(intent),
    )
    .ok()?;

    let mut out = [0.0f64; 3];
    xform.transform_pixels(slice::from_ref(&[0u16; 3]), slice::from_mut(&mut out));
    Some(Lab::from(out))
}

/// Gray 0 through a gray profile into v2 Lab
pub fn lcms2_gray_black_lab(profile: &Profile, intent: RenderingIntent) -> Option<Lab> {
    let lab = lab2()?;
    let xform = Transform::<u16, [f64; 3]>::new(
        profile,
        PixelFormat::GRAY_16,
        &lab,
        PixelFormat::Lab_DBL,
        to_lcms2_intent(intent),
    )
    .ok()?;

    let mut out = [0.0f64; 3];
    xform.transform_pixels(slice::from_ref(&0u16), slice::from_mut(&mut out));
    Some(Lab::from(out))
}

/// Synthetic profile with the header of an lcms2 matrix/TRC profile and the
/// darkest colorant lcms2 measures for it
pub fn mirror_matrix_shaper(
    profile: &Profile,
    space: ColorSpace,
    measure: impl Fn(&Profile, RenderingIntent) -> Option<Lab>,
) -> Option<SyntheticProfile> {
    let mut mirror = SyntheticProfile::new(
        from_lcms2_class(profile.device_class()),
        space,
        from_lcms2_version(profile.version()),
    )
    .with_matrix_shaper();

    for intent in [
        RenderingIntent::Perceptual,
        RenderingIntent::RelativeColorimetric,
        RenderingIntent::Saturation,
    ] {
        mirror = mirror.with_colorant_for(intent, measure(profile, intent)?);
    }

    Some(mirror)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_mapping() {
        assert_eq!(from_lcms2_version(4.3), ProfileVersion::V4_3);
        assert_eq!(from_lcms2_version(2.1), ProfileVersion::V2_1);
    }
}
