//! Transform engine interface
//!
//! The estimators build short probe transforms (profile -> Lab, or
//! Lab -> profile -> profile -> Lab) and evaluate a handful of samples through
//! them. Building and running pipelines is the engine's job; this module only
//! describes the requests.
//!
//! Transforms and auxiliary profiles are released by `Drop`. An estimator
//! keeps each one in a local binding, so it is gone on every return path.

use crate::color::Lab;
use crate::error::{EngineError, Result};
use crate::profile::ProfileInfo;
use crate::types::{ColorSpace, RenderingIntent};

/// Encoding of an auxiliary Lab connection-space profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabEncoding {
    /// ICC v2 Lab (used for the darker-colorant probe so the engine does not
    /// detect black points on it in turn)
    V2,
    /// ICC v4 Lab (used for round trips)
    V4,
}

/// One profile of a transform chain
pub struct ChainStage<'a, P> {
    /// Profile for this stage
    pub profile: &'a P,
    /// Rendering intent used to link into this stage
    pub intent: RenderingIntent,
    /// Black point compensation on this link
    pub black_point_compensation: bool,
    /// Chromatic adaptation state (1.0 = fully adapted)
    pub adaptation_state: f64,
}

impl<'a, P> ChainStage<'a, P> {
    /// Stage for a probe transform: no black point compensation, full adaptation
    pub fn probe(profile: &'a P, intent: RenderingIntent) -> Self {
        Self {
            profile,
            intent,
            black_point_compensation: false,
            adaptation_state: 1.0,
        }
    }
}

impl<P> Clone for ChainStage<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for ChainStage<'_, P> {}

/// Sample layout at either end of a transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Device values, 16 bits per channel
    Device {
        /// Color space of the values
        space: ColorSpace,
        /// Channels per pixel
        channels: usize,
    },
    /// L*a*b* as three `f64` per pixel
    LabDouble,
}

impl PixelFormat {
    /// 16-bit formatter for a profile's color space
    pub fn for_profile<P: ProfileInfo + ?Sized>(profile: &P) -> Self {
        Self::Device {
            space: profile.color_space(),
            channels: profile.channels(),
        }
    }

    /// Channels per pixel
    pub fn channels(&self) -> usize {
        match self {
            Self::Device { channels, .. } => *channels,
            Self::LabDouble => 3,
        }
    }
}

/// Input samples handed to a transform
#[derive(Debug, Clone, Copy)]
pub enum Samples<'a> {
    /// 16-bit device words
    Words(&'a [u16]),
    /// Floating point values
    Doubles(&'a [f64]),
}

impl Samples<'_> {
    /// Number of values, across all pixels
    pub fn len(&self) -> usize {
        match self {
            Self::Words(w) => w.len(),
            Self::Doubles(d) => d.len(),
        }
    }

    /// True when there are no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Transform creation flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformFlags {
    /// Do not cache the last evaluated color
    pub no_cache: bool,
    /// Evaluate the pipeline as linked, without optimization
    pub no_optimize: bool,
}

impl TransformFlags {
    /// Flags for every probe transform built by the estimators
    pub const PROBE: Self = Self {
        no_cache: true,
        no_optimize: true,
    };
}

/// An executable transform
pub trait ColorTransform {
    /// Transform `count` pixels from `src` into `dst`
    fn transform(&self, src: Samples<'_>, dst: &mut [f64], count: usize) -> Result<()>;

    /// Evaluate one Lab value through a Lab -> Lab transform
    fn transform_lab(&self, lab: Lab) -> Result<Lab> {
        let mut out = Lab::default();
        self.transform(
            Samples::Doubles(bytemuck::cast_slice(std::slice::from_ref(&lab))),
            bytemuck::cast_slice_mut(std::slice::from_mut(&mut out)),
            1,
        )?;
        Ok(out)
    }

    /// Evaluate one device color through a device -> Lab transform
    fn transform_device_to_lab(&self, device: &[u16]) -> Result<Lab> {
        if device.is_empty() {
            return Err(EngineError::BufferSize {
                expected: 1,
                actual: 0,
            });
        }

        let mut out = Lab::default();
        self.transform(
            Samples::Words(device),
            bytemuck::cast_slice_mut(std::slice::from_mut(&mut out)),
            1,
        )?;
        Ok(out)
    }
}

/// Factory for probe transforms and auxiliary profiles
pub trait TransformEngine {
    /// Profile type the engine links
    type Profile: ProfileInfo;
    /// Transform type the engine produces
    type Transform: ColorTransform;

    /// Build a D50 Lab connection-space profile
    fn create_lab_profile(&self, encoding: LabEncoding) -> Result<Self::Profile>;

    /// Link `chain` into a transform from `input` to `output` samples
    fn create_transform(
        &self,
        chain: &[ChainStage<'_, Self::Profile>],
        input: PixelFormat,
        output: PixelFormat,
        flags: TransformFlags,
    ) -> Result<Self::Transform>;
}
