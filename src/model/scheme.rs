//! Grid sizing and update-equation coefficients.

use thiserror::Error;

use crate::model::StringParams;

/// Fewest grid intervals the 5-point interior stencil can run on: two
/// boundary points on each side plus at least one interior point.
pub const MIN_INTERVALS: usize = 4;

/// The stability bound produced a grid too small for the interior stencil.
///
/// Fatal for the parameter set: the caller has to widen the string or lower
/// the sample rate, there is nothing to retry.
#[derive(Clone, Copy, Debug, Error)]
#[error(
    "stability bound yields a {intervals}-interval grid, need at least 4 \
     (string too short or time step too large)"
)]
pub struct DegenerateGridError {
    /// Interval count the derivation arrived at.
    pub intervals: usize,
}

/// Everything `step()` needs, derived once from [`StringParams`] and a time
/// step.
///
/// The update equation is
///
/// ```text
/// next[l] = b0*cur[l] + b1*(cur[l+1] + cur[l-1]) + b2*(cur[l+2] + cur[l-2])
///         + c0*prev[l] + c1*(prev[l+1] + prev[l-1])
/// ```
///
/// with the implicit damping divisor 1/(1 + σ0·k) already folded into all
/// five coefficients, so the per-sample update stays a pure explicit stencil.
#[derive(Clone, Copy, Debug)]
pub struct Scheme {
    n: usize,
    h: f64,
    pub(crate) b0: f64,
    pub(crate) b1: f64,
    pub(crate) b2: f64,
    pub(crate) c0: f64,
    pub(crate) c1: f64,
}

impl Scheme {
    /// Derive grid and coefficients for a time step `k` (seconds per sample).
    ///
    /// The grid spacing starts at the *minimal* value satisfying the von
    /// Neumann stability bound of the combined wave + stiffness + damping
    /// scheme. Any smaller spacing is unstable, any larger one wastes
    /// spatial resolution. The interval count is then floored and the
    /// spacing recomputed as `1/n`: the grid lives in normalized length
    /// units, the physical length only fixes `n`.
    pub fn derive(params: &StringParams, k: f64) -> Result<Scheme, DegenerateGridError> {
        let c_sq = params.wave_speed_sq();
        let kappa_sq = params.stiffness_sq();

        let stability = c_sq * k * k + 4.0 * params.sigma1 * k;
        let h = (stability + (stability * stability + 16.0 * kappa_sq * k * k).sqrt()).sqrt();

        let intervals = (params.length / h).floor();
        if !(intervals >= MIN_INTERVALS as f64) {
            // NaN from degenerate parameters also lands here.
            let intervals = if intervals.is_finite() && intervals > 0.0 {
                intervals as usize
            } else {
                0
            };
            return Err(DegenerateGridError { intervals });
        }
        let n = intervals as usize;
        let h = 1.0 / n as f64;

        let lambda_sq = c_sq * k * k / (h * h);
        let mu_sq = kappa_sq * k * k / (h * h * h * h);

        let s0 = params.sigma0 * k;
        let s1 = 2.0 * params.sigma1 * k / (h * h);

        let div = 1.0 / (1.0 + s0);

        Ok(Scheme {
            n,
            h,
            b0: (2.0 - 2.0 * lambda_sq - 6.0 * mu_sq - 2.0 * s1) * div,
            b1: (lambda_sq + 4.0 * mu_sq + s1) * div,
            b2: -mu_sq * div,
            c0: (s0 - 1.0 + 2.0 * s1) * div,
            c1: -s1 * div,
        })
    }

    /// Number of grid intervals n (the field holds n+1 points).
    pub fn intervals(&self) -> usize {
        self.n
    }

    /// Grid spacing in normalized length units (always `1/n`).
    pub fn grid_spacing(&self) -> f64 {
        self.h
    }
}
