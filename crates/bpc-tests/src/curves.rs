//! Round-trip L* response curves
//!
//! Each curve maps the L* fed into a Lab -> profile -> Lab round trip to the
//! L* that comes back. Chroma is passed through unchanged by the synthetic
//! profile, so only lightness is scripted here.

use std::f64::consts::PI;
use std::sync::Arc;

/// Destination L* as a function of source L*
pub type LightnessCurve = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Ideal device: L* out equals L* in
pub fn straight() -> LightnessCurve {
    Arc::new(|l| l)
}

/// Identity above `black`, flat below it
pub fn clipped_toe(black: f64) -> LightnessCurve {
    Arc::new(move |l: f64| l.max(black))
}

/// Linear compression of [0, 100] into [black, 100]
///
/// Monotonic, but bends the midrange away from the identity when `black` is
/// more than a few L* units.
pub fn compressed(black: f64) -> LightnessCurve {
    Arc::new(move |l| black + l * (100.0 - black) / 100.0)
}

/// Parabolic toe up to `knee`, then a line of slope 1
///
/// `l^2 / (2 knee)` below the knee and `l - knee / 2` above it, so the curve
/// and its slope are continuous. The response never reaches the identity.
pub fn convex_toe(knee: f64) -> LightnessCurve {
    Arc::new(move |l| {
        if l < knee {
            l * l / (2.0 * knee)
        } else {
            l - knee / 2.0
        }
    })
}

/// `curve` with a sine ripple added below `cutoff`
///
/// `cutoff` should be a multiple of half the period so the result stays
/// continuous. Ripples steeper than the curve make the shadow response
/// non-monotonic.
pub fn rippled(curve: LightnessCurve, amplitude: f64, period: f64, cutoff: f64) -> LightnessCurve {
    Arc::new(move |l| {
        let ripple = if l < cutoff {
            amplitude * (2.0 * PI * l / period).sin()
        } else {
            0.0
        };
        curve(l) + ripple
    })
}

/// Black up to L* 4, then three out-of-order shadow steps, then a ramp from
/// L* 30 at source L* 8 to 100 at source L* 100
///
/// Only three samples land in the perceptual band, too few for a fit.
pub fn jagged_toe() -> LightnessCurve {
    Arc::new(|l: f64| match l.round() as i64 {
        i64::MIN..=4 => 0.0,
        5 => 20.0,
        6 => 10.0,
        7 => 15.0,
        _ => 30.0 + (l - 8.0) * 70.0 / 92.0,
    })
}

/// Same L* for every input, so the response span is empty
pub fn flat(level: f64) -> LightnessCurve {
    Arc::new(move |_| level)
}

/// Black below `at`, white from `at` on
pub fn step(at: f64) -> LightnessCurve {
    Arc::new(move |l| if l < at { 0.0 } else { 100.0 })
}
