//! Shadow-region curve fitting
//!
//! The destination black point algorithm samples the normalized L* response
//! of a round trip and, when that response is not monotonic, fits
//! `ff = t*L^2 + u*L + c` by least squares. The black point is the root of
//! the fitted parabola on its rising branch.
//!
//! Reference: http://www.personal.psu.edu/jhm/f90/lectures/lsq2.html

use crate::math::Matrix3x3;

/// Fewest samples the fit accepts
pub const MIN_FIT_SAMPLES: usize = 4;

/// One point of a sampled round-trip response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseSample {
    /// Source L* fed into the round trip
    pub lightness: f64,
    /// Destination L* normalized to the [MinL, MaxL] span
    pub response: f64,
}

/// Coefficients of `t*x^2 + u*x + c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticFit {
    pub t: f64,
    pub u: f64,
    pub c: f64,
}

impl QuadraticFit {
    /// Least-squares fit through the normal equations
    ///
    /// Builds the 3x3 system from power sums of x up to x^4 and solves it
    /// once. `None` with fewer than [`MIN_FIT_SAMPLES`] samples or a singular
    /// system.
    pub fn least_squares(samples: &[ResponseSample]) -> Option<Self> {
        if samples.len() < MIN_FIT_SAMPLES {
            return None;
        }

        let mut sum_x = 0.0;
        let mut sum_x2 = 0.0;
        let mut sum_x3 = 0.0;
        let mut sum_x4 = 0.0;
        let mut sum_y = 0.0;
        let mut sum_yx = 0.0;
        let mut sum_yx2 = 0.0;

        for s in samples {
            let x = s.lightness;
            let y = s.response;
            let x2 = x * x;

            sum_x += x;
            sum_x2 += x2;
            sum_x3 += x2 * x;
            sum_x4 += x2 * x2;

            sum_y += y;
            sum_yx += y * x;
            sum_yx2 += y * x2;
        }

        let n = samples.len() as f64;
        let normal = Matrix3x3::new([
            [n, sum_x, sum_x2],
            [sum_x, sum_x2, sum_x3],
            [sum_x2, sum_x3, sum_x4],
        ]);

        // Unknowns come out lowest power first
        let [c, u, t] = normal.solve([sum_y, sum_yx, sum_yx2])?;
        Some(Self { t, u, c })
    }

    /// Root on the rising branch, `(-u + sqrt(u^2 - 4tc)) / 2t`
    ///
    /// `None` unless the parabola opens upwards and crosses zero.
    pub fn rising_root(&self) -> Option<f64> {
        if !(self.t > 1e-10) {
            return None;
        }

        let disc = self.u * self.u - 4.0 * self.t * self.c;
        if disc < 0.0 {
            return None;
        }

        Some((-self.u + disc.sqrt()) / (2.0 * self.t))
    }

    /// Evaluate at x
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        (self.t * x + self.u) * x + self.c
    }
}

/// Fit the samples and return the root, or `None` when the fit is degenerate
pub fn root_of_least_squares_quadratic(samples: &[ResponseSample]) -> Option<f64> {
    QuadraticFit::least_squares(samples)?.rising_root()
}

/// True when the sequence never decreases
pub fn is_monotonic(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
