//! # oxbpc - Black Point Detection for ICC Profiles
//!
//! Estimates the black point of a color profile: the darkest neutral color the
//! device can reproduce, expressed as D50 XYZ. The estimates feed black point
//! compensation in a transform pipeline, which is not part of this crate.
//!
//! ## Entry points
//!
//! - [`detect_black_point`]: direct estimation from the profile's darkest
//!   colorant, a round trip that discounts ink limiting, or the fixed v4
//!   perceptual black.
//! - [`detect_destination_black_point`]: the algorithm Adobe published for
//!   destination profiles. It probes an L* round trip through the profile and
//!   fits a quadratic to the shadow region when the response is not straight.
//!
//! ## Collaborators
//!
//! The crate does not parse profiles or evaluate pipelines. Callers provide a
//! [`TransformEngine`] whose profiles implement [`ProfileInfo`]. Every probe
//! transform is created with black point compensation off, no cache and no
//! optimization, and is dropped before the estimator returns.
//!
//! ```ignore
//! use oxbpc_core::{detect_destination_black_point, DetectFlags, RenderingIntent};
//!
//! let black = detect_destination_black_point(
//!     &engine,
//!     &printer_profile,
//!     RenderingIntent::RelativeColorimetric,
//!     DetectFlags::default(),
//! )?;
//! ```

pub mod bpc;
pub mod color;
pub mod error;
pub mod math;
pub mod profile;
pub mod transform;
pub mod types;

pub use bpc::{
    BlackPointError, BlackPointResult, BlackPointResultExt, DetectFlags, DeviceEndPoints,
    PERCEPTUAL_BLACK, detect_black_point, detect_destination_black_point,
};
pub use color::{D50, Lab, WhitePoint, Xyz};
pub use error::{EngineError, Result};
pub use profile::ProfileInfo;
pub use transform::{
    ChainStage, ColorTransform, LabEncoding, PixelFormat, Samples, TransformEngine,
    TransformFlags,
};
pub use types::{ColorSpace, IntentDirection, ProfileClass, ProfileVersion, RenderingIntent};

/// Version of oxbpc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
