//! Profile metadata vocabulary
//!
//! The enums the estimators dispatch on. Conversions from the matching
//! moxcms types are provided so metadata of a moxcms-parsed profile can back a
//! [`ProfileInfo`](crate::ProfileInfo) implementation.

/// Color space of profile data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorSpace {
    /// RGB color space
    Rgb,
    /// CMYK color space
    Cmyk,
    /// Grayscale
    Gray,
    /// CIELAB
    Lab,
    /// CIEXYZ
    Xyz,
    /// YCbCr (video)
    YCbCr,
    /// CIELUV
    Luv,
    /// HSV (hue, saturation, value)
    Hsv,
    /// HLS (hue, lightness, saturation)
    Hls,
    /// CMY (without K)
    Cmy,
    /// Multi-channel (5+ channels)
    MultiChannel,
    /// Unknown or unsupported
    Unknown,
}

impl ColorSpace {
    /// Number of channels for this color space
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb
            | Self::Lab
            | Self::Xyz
            | Self::YCbCr
            | Self::Luv
            | Self::Hsv
            | Self::Hls
            | Self::Cmy => 3,
            Self::Cmyk => 4,
            Self::MultiChannel | Self::Unknown => 0, // Variable
        }
    }

    /// Device spaces the destination black point algorithm is defined for
    pub fn is_adobe_bpc_space(&self) -> bool {
        matches!(self, Self::Gray | Self::Rgb | Self::Cmyk)
    }
}

impl From<moxcms::DataColorSpace> for ColorSpace {
    fn from(cs: moxcms::DataColorSpace) -> Self {
        match cs {
            moxcms::DataColorSpace::Rgb => Self::Rgb,
            moxcms::DataColorSpace::Cmyk => Self::Cmyk,
            moxcms::DataColorSpace::Gray => Self::Gray,
            moxcms::DataColorSpace::Lab => Self::Lab,
            moxcms::DataColorSpace::Xyz => Self::Xyz,
            moxcms::DataColorSpace::YCbr => Self::YCbCr,
            moxcms::DataColorSpace::Luv => Self::Luv,
            moxcms::DataColorSpace::Hsv => Self::Hsv,
            moxcms::DataColorSpace::Hls => Self::Hls,
            moxcms::DataColorSpace::Cmy => Self::Cmy,
            _ => Self::MultiChannel,
        }
    }
}

/// ICC profile class (device type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    /// Device link (direct device-to-device)
    DeviceLink,
    /// Color space conversion
    ColorSpace,
    /// Abstract profile
    Abstract,
    /// Named color profile
    NamedColor,
    /// Unknown class
    Unknown,
}

impl From<moxcms::ProfileClass> for ProfileClass {
    fn from(pc: moxcms::ProfileClass) -> Self {
        match pc {
            moxcms::ProfileClass::InputDevice => Self::Input,
            moxcms::ProfileClass::DisplayDevice => Self::Display,
            moxcms::ProfileClass::OutputDevice => Self::Output,
            moxcms::ProfileClass::DeviceLink => Self::DeviceLink,
            moxcms::ProfileClass::ColorSpace => Self::ColorSpace,
            moxcms::ProfileClass::Abstract => Self::Abstract,
            moxcms::ProfileClass::Named => Self::NamedColor,
        }
    }
}

/// ICC profile version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileVersion {
    /// Major version (2 or 4)
    pub major: u8,
    /// Minor version
    pub minor: u8,
    /// Bug-fix version
    pub patch: u8,
}

impl ProfileVersion {
    /// Create a new profile version
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// ICC v2.1
    pub const V2_1: Self = Self::new(2, 1, 0);
    /// ICC v2.4
    pub const V2_4: Self = Self::new(2, 4, 0);
    /// ICC v4.0
    pub const V4_0: Self = Self::new(4, 0, 0);
    /// ICC v4.3
    pub const V4_3: Self = Self::new(4, 3, 0);
    /// ICC v4.4
    pub const V4_4: Self = Self::new(4, 4, 0);

    /// Header encoding: major in the top byte, minor and patch as nibbles
    /// of the next one, e.g. 4.3.0 is `0x0430_0000`.
    pub const fn encoded(&self) -> u32 {
        ((self.major as u32) << 24)
            | (((self.minor & 0x0F) as u32) << 20)
            | (((self.patch & 0x0F) as u32) << 16)
    }

    /// Decode the header version field
    pub const fn from_encoded(value: u32) -> Self {
        Self {
            major: (value >> 24) as u8,
            minor: ((value >> 20) & 0x0F) as u8,
            patch: ((value >> 16) & 0x0F) as u8,
        }
    }

    /// v4 profiles carry a well specified perceptual black
    pub const fn is_v4_or_later(&self) -> bool {
        self.encoded() >= 0x0400_0000
    }
}

impl From<moxcms::ProfileVersion> for ProfileVersion {
    fn from(pv: moxcms::ProfileVersion) -> Self {
        match pv {
            moxcms::ProfileVersion::V2_0 => Self::new(2, 0, 0),
            moxcms::ProfileVersion::V2_1 => Self::new(2, 1, 0),
            moxcms::ProfileVersion::V2_2 => Self::new(2, 2, 0),
            moxcms::ProfileVersion::V2_3 => Self::new(2, 3, 0),
            moxcms::ProfileVersion::V2_4 => Self::new(2, 4, 0),
            moxcms::ProfileVersion::V4_0 => Self::new(4, 0, 0),
            moxcms::ProfileVersion::V4_1 => Self::new(4, 1, 0),
            moxcms::ProfileVersion::V4_2 => Self::new(4, 2, 0),
            moxcms::ProfileVersion::V4_3 => Self::new(4, 3, 0),
            moxcms::ProfileVersion::V4_4 => Self::new(4, 4, 0),
            moxcms::ProfileVersion::Unknown => Self::new(0, 0, 0),
        }
    }
}

impl std::fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Rendering intent for color transformations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderingIntent {
    /// Perceptual - compress gamut to fit, preserve relationships
    #[default]
    Perceptual,
    /// Relative colorimetric - map white point, clip out-of-gamut
    RelativeColorimetric,
    /// Saturation - preserve saturation over accuracy
    Saturation,
    /// Absolute colorimetric - no white point mapping
    AbsoluteColorimetric,
}

impl RenderingIntent {
    /// Convert from ICC rendering intent value
    pub fn from_icc(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Perceptual),
            1 => Some(Self::RelativeColorimetric),
            2 => Some(Self::Saturation),
            3 => Some(Self::AbsoluteColorimetric),
            _ => None,
        }
    }

    /// Convert to ICC rendering intent value
    pub fn to_icc(&self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::RelativeColorimetric => 1,
            Self::Saturation => 2,
            Self::AbsoluteColorimetric => 3,
        }
    }

    /// Perceptual and saturation share the v4 perceptual reference medium
    pub fn is_perceptual_like(&self) -> bool {
        matches!(self, Self::Perceptual | Self::Saturation)
    }
}

impl From<moxcms::RenderingIntent> for RenderingIntent {
    fn from(ri: moxcms::RenderingIntent) -> Self {
        match ri {
            moxcms::RenderingIntent::Perceptual => Self::Perceptual,
            moxcms::RenderingIntent::RelativeColorimetric => Self::RelativeColorimetric,
            moxcms::RenderingIntent::Saturation => Self::Saturation,
            moxcms::RenderingIntent::AbsoluteColorimetric => Self::AbsoluteColorimetric,
        }
    }
}

impl From<RenderingIntent> for moxcms::RenderingIntent {
    fn from(ri: RenderingIntent) -> Self {
        match ri {
            RenderingIntent::Perceptual => Self::Perceptual,
            RenderingIntent::RelativeColorimetric => Self::RelativeColorimetric,
            RenderingIntent::Saturation => Self::Saturation,
            RenderingIntent::AbsoluteColorimetric => Self::AbsoluteColorimetric,
        }
    }
}

/// Direction a profile is used in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentDirection {
    /// Device to PCS (A2B tables)
    Input,
    /// PCS to device (B2A tables)
    Output,
    /// Gamut/proofing
    Proof,
}

impl std::fmt::Display for IntentDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
            Self::Proof => f.write_str("proof"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_space_channels() {
        assert_eq!(ColorSpace::Rgb.channels(), 3);
        assert_eq!(ColorSpace::Cmyk.channels(), 4);
        assert_eq!(ColorSpace::Gray.channels(), 1);
        assert_eq!(ColorSpace::Lab.channels(), 3);
        assert_eq!(ColorSpace::Cmy.channels(), 3);
    }

    #[test]
    fn test_profile_version_display() {
        let v = ProfileVersion::new(4, 3, 0);
        assert_eq!(v.to_string(), "4.3.0");
    }

    #[test]
    fn test_encoded_version() {
        assert_eq!(ProfileVersion::V4_3.encoded(), 0x0430_0000);
        assert_eq!(ProfileVersion::V2_1.encoded(), 0x0210_0000);
        assert_eq!(ProfileVersion::new(4, 2, 1).encoded(), 0x0421_0000);

        let decoded = ProfileVersion::from_encoded(0x0240_0000);
        assert_eq!(decoded, ProfileVersion::V2_4);
    }

    #[test]
    fn test_v4_threshold() {
        assert!(ProfileVersion::V4_0.is_v4_or_later());
        assert!(ProfileVersion::V4_4.is_v4_or_later());
        assert!(!ProfileVersion::V2_4.is_v4_or_later());
        assert!(!ProfileVersion::new(3, 15, 15).is_v4_or_later());
    }

    #[test]
    fn test_render_intent_roundtrip() {
        for i in 0..4 {
            let intent = RenderingIntent::from_icc(i).unwrap();
            assert_eq!(intent.to_icc(), i);
        }
        assert!(RenderingIntent::from_icc(7).is_none());
    }

    #[test]
    fn test_moxcms_interop() {
        assert_eq!(
            ProfileClass::from(moxcms::ProfileClass::DeviceLink),
            ProfileClass::DeviceLink
        );
        assert_eq!(ColorSpace::from(moxcms::DataColorSpace::Cmyk), ColorSpace::Cmyk);
        assert_eq!(
            ProfileVersion::from(moxcms::ProfileVersion::V4_3),
            ProfileVersion::V4_3
        );

        let intent: moxcms::RenderingIntent = RenderingIntent::Saturation.into();
        assert_eq!(RenderingIntent::from(intent), RenderingIntent::Saturation);
    }
}
