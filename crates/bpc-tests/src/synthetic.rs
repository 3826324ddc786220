//! Synthetic profiles
//!
//! A [`SyntheticProfile`] answers the header and tag questions of
//! [`ProfileInfo`] from plain fields and carries two scripted responses the
//! [`SyntheticEngine`](crate::SyntheticEngine) evaluates:
//!
//! - the Lab its darkest colorant maps to, per rendering intent
//! - the L* response of a Lab -> profile -> Lab round trip, per intent
//!
//! Auxiliary Lab profiles handed out by the engine are synthetic profiles
//! too, with [`ProfileRole::LabPcs`] and a live-count token.

use std::collections::{HashMap, HashSet};

use oxbpc_core::{
    ColorSpace, IntentDirection, Lab, LabEncoding, ProfileClass, ProfileInfo, ProfileVersion,
    RenderingIntent, Xyz,
};

use crate::curves::{self, LightnessCurve};
use crate::engine::LiveToken;

/// What a synthetic profile stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRole {
    /// A device profile built by a test
    Device,
    /// Lab connection space created by the engine
    LabPcs(LabEncoding),
}

/// Scripted profile
pub struct SyntheticProfile {
    pub role: ProfileRole,
    pub class: ProfileClass,
    pub space: ColorSpace,
    /// Channels of the native 16-bit formatter
    pub channels: usize,
    pub version: ProfileVersion,
    pub matrix_shaper: bool,
    /// LUT based in the output direction (all intents)
    pub clut_output: bool,
    pub unsupported: HashSet<(RenderingIntent, IntentDirection)>,
    pub black_tag: Option<Xyz>,
    pub white_tag: Option<Xyz>,
    colorant: Lab,
    colorant_by_intent: HashMap<RenderingIntent, Lab>,
    round_trip: LightnessCurve,
    round_trip_by_intent: HashMap<RenderingIntent, LightnessCurve>,
    _token: Option<LiveToken>,
}

impl SyntheticProfile {
    /// Device profile with a black colorant at `Lab(0, 0, 0)` and a straight
    /// round trip
    pub fn new(class: ProfileClass, space: ColorSpace, version: ProfileVersion) -> Self {
        Self {
            role: ProfileRole::Device,
            class,
            space,
            channels: space.channels(),
            version,
            matrix_shaper: false,
            clut_output: true,
            unsupported: HashSet::new(),
            black_tag: None,
            white_tag: None,
            colorant: Lab::default(),
            colorant_by_intent: HashMap::new(),
            round_trip: curves::straight(),
            round_trip_by_intent: HashMap::new(),
            _token: None,
        }
    }

    /// v2 printer profile with CMYK tables
    pub fn cmyk_printer() -> Self {
        Self::new(ProfileClass::Output, ColorSpace::Cmyk, ProfileVersion::V2_4)
    }

    /// v2 RGB printer profile with tables
    pub fn rgb_printer() -> Self {
        Self::new(ProfileClass::Output, ColorSpace::Rgb, ProfileVersion::V2_4)
    }

    /// v4 matrix/TRC display profile
    pub fn matrix_display() -> Self {
        Self::new(ProfileClass::Display, ColorSpace::Rgb, ProfileVersion::V4_3)
            .with_matrix_shaper()
    }

    /// Device link
    pub fn device_link() -> Self {
        Self::new(ProfileClass::DeviceLink, ColorSpace::Rgb, ProfileVersion::V4_3)
    }

    /// Lab connection space handed out by the engine
    pub(crate) fn lab_pcs(encoding: LabEncoding, token: LiveToken) -> Self {
        let version = match encoding {
            LabEncoding::V2 => ProfileVersion::V2_1,
            LabEncoding::V4 => ProfileVersion::V4_3,
        };
        let mut profile = Self::new(ProfileClass::Abstract, ColorSpace::Lab, version);
        profile.role = ProfileRole::LabPcs(encoding);
        profile.clut_output = false;
        profile._token = Some(token);
        profile
    }

    pub fn with_version(mut self, version: ProfileVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_class(mut self, class: ProfileClass) -> Self {
        self.class = class;
        self
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Matrix/TRC: not LUT based in any direction
    pub fn with_matrix_shaper(mut self) -> Self {
        self.matrix_shaper = true;
        self.clut_output = false;
        self
    }

    pub fn with_clut_output(mut self, clut: bool) -> Self {
        self.clut_output = clut;
        self
    }

    /// Darkest colorant under every intent without an override
    pub fn with_colorant(mut self, lab: Lab) -> Self {
        self.colorant = lab;
        self
    }

    pub fn with_colorant_for(mut self, intent: RenderingIntent, lab: Lab) -> Self {
        self.colorant_by_intent.insert(intent, lab);
        self
    }

    /// Round-trip response for every intent without an override
    pub fn with_round_trip(mut self, curve: LightnessCurve) -> Self {
        self.round_trip = curve;
        self
    }

    pub fn with_round_trip_for(mut self, intent: RenderingIntent, curve: LightnessCurve) -> Self {
        self.round_trip_by_intent.insert(intent, curve);
        self
    }

    pub fn without_intent(mut self, intent: RenderingIntent, direction: IntentDirection) -> Self {
        self.unsupported.insert((intent, direction));
        self
    }

    pub fn with_black_tag(mut self, black: Xyz) -> Self {
        self.black_tag = Some(black);
        self
    }

    pub fn with_white_tag(mut self, white: Xyz) -> Self {
        self.white_tag = Some(white);
        self
    }

    /// Lab the darkest colorant maps to under `intent`
    pub fn colorant_for(&self, intent: RenderingIntent) -> Lab {
        self.colorant_by_intent
            .get(&intent)
            .copied()
            .unwrap_or(self.colorant)
    }

    /// L* response of the round trip entered with `intent`
    pub fn round_trip_for(&self, intent: RenderingIntent) -> LightnessCurve {
        self.round_trip_by_intent
            .get(&intent)
            .cloned()
            .unwrap_or_else(|| self.round_trip.clone())
    }
}

impl ProfileInfo for SyntheticProfile {
    fn device_class(&self) -> ProfileClass {
        self.class
    }

    fn color_space(&self) -> ColorSpace {
        self.space
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn version(&self) -> ProfileVersion {
        self.version
    }

    fn is_intent_supported(&self, intent: RenderingIntent, direction: IntentDirection) -> bool {
        !self.unsupported.contains(&(intent, direction))
    }

    fn is_matrix_shaper(&self) -> bool {
        self.matrix_shaper
    }

    fn is_clut(&self, _intent: RenderingIntent, direction: IntentDirection) -> bool {
        direction == IntentDirection::Output && self.clut_output
    }

    fn media_black_point(&self) -> Option<Xyz> {
        self.black_tag
    }

    fn media_white_point_tag(&self) -> Option<Xyz> {
        self.white_tag
    }
}

impl std::fmt::Debug for SyntheticProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntheticProfile")
            .field("role", &self.role)
            .field("class", &self.class)
            .field("space", &self.space)
            .field("version", &self.version)
            .field("matrix_shaper", &self.matrix_shaper)
            .field("clut_output", &self.clut_output)
            .finish_non_exhaustive()
    }
}
