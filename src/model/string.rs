//! The time-stepping engine.

use std::f64::consts::TAU;
use std::mem;

use tracing::warn;

use crate::model::{DegenerateGridError, Scheme, StringParams};

/// Width of the raised-cosine excitation pulse, in grid points.
const PLUCK_WIDTH: usize = 10;

/// A stiff, damped string advanced by an explicit finite-difference scheme.
///
/// One call to [`step`](StiffString::step) advances the simulation by one
/// audio sample; [`read`](StiffString::read) then picks the displacement off
/// the grid. Both run in bounded time with no allocation, so they are safe to
/// drive from an audio callback. Excitation arrives through
/// [`pluck`](StiffString::pluck), which only records a pending request; the
/// injection itself happens at the top of the next `step`, keeping all field
/// mutation on the stepping path.
///
/// The three time generations (next / current / previous) live in three
/// fixed buffers whose *roles* rotate every step. Rotating the role map is
/// O(1); buffer contents are never copied.
pub struct StiffString {
    scheme: Scheme,
    /// Three generations of the displacement field, each of length n+1.
    states: [Vec<f64>; 3],
    /// Slot indices of the next, current and previous generation, in that
    /// order. Permuted in place by `step`, never aliased.
    roles: [usize; 3],
    /// Pending excitation position, last write wins.
    pending: Option<f64>,
    anomalies: u64,
}

impl StiffString {
    /// Build an engine running at the given sample rate.
    pub fn new(params: &StringParams, sample_rate: u32) -> Result<Self, DegenerateGridError> {
        Self::with_time_step(params, 1.0 / sample_rate as f64)
    }

    /// Build an engine with an explicit time step `k` (seconds per sample).
    pub fn with_time_step(params: &StringParams, k: f64) -> Result<Self, DegenerateGridError> {
        let scheme = Scheme::derive(params, k)?;
        let points = scheme.intervals() + 1;
        Ok(StiffString {
            scheme,
            states: [vec![0.0; points], vec![0.0; points], vec![0.0; points]],
            roles: [0, 1, 2],
            pending: None,
            anomalies: 0,
        })
    }

    /// Request an excitation at a normalized position along the string.
    ///
    /// The position is clamped to [0, 1]. The pulse is injected at the top of
    /// the next [`step`](StiffString::step); a second request before then
    /// replaces the first (no queueing).
    pub fn pluck(&mut self, position: f64) {
        self.pending = Some(position.max(0.0).min(1.0));
    }

    /// Advance the field by one time step.
    ///
    /// Applies any pending excitation, evaluates the interior stencil, and
    /// rotates the generation roles. Indices 0, 1, n−1 and n are never
    /// recomputed: the boundaries are clamped.
    pub fn step(&mut self) {
        if let Some(position) = self.pending.take() {
            self.excite(position);
        }

        let n = self.scheme.intervals();
        let [ni, ci, pi] = self.roles;

        // Take the next-generation buffer out of the slot array so the
        // current and previous generations can be borrowed alongside it.
        // This moves the Vec header only, not its contents.
        let scheme = self.scheme;
        let mut next = mem::take(&mut self.states[ni]);
        {
            let cur = &self.states[ci];
            let prev = &self.states[pi];

            for l in 2..=n - 2 {
                next[l] = scheme.b0 * cur[l]
                    + scheme.b1 * (cur[l + 1] + cur[l - 1])
                    + scheme.b2 * (cur[l + 2] + cur[l - 2])
                    + scheme.c0 * prev[l]
                    + scheme.c1 * (prev[l + 1] + prev[l - 1]);
            }
        }
        self.states[ni] = next;

        // previous <- current, current <- next, next <- old previous.
        self.roles.rotate_right(1);
    }

    /// Add a raised-cosine pulse of unit peak amplitude around `position`.
    ///
    /// The pulse goes into both the current and the previous generation: the
    /// stencil reads two generations back, and seeding only one would start
    /// the string with a violent initial derivative (an audible click).
    /// Samples that would land on or past index n−1 are dropped, so the
    /// clamped boundaries stay untouched.
    fn excite(&mut self, position: f64) {
        let n = self.scheme.intervals();
        let [_, ci, pi] = self.roles;

        let start = (((n + 1) as f64 * position).floor() - (PLUCK_WIDTH as f64 / 2.0).floor())
            .max(1.0) as usize;

        for l in 0..PLUCK_WIDTH {
            let idx = start + l;
            if idx > n - 2 {
                break;
            }
            let v = 0.5 * (1.0 - (TAU * l as f64 / (PLUCK_WIDTH as f64 - 1.0)).cos());
            self.states[ci][idx] += v;
            self.states[pi][idx] += v;
        }
    }

    /// Read the displacement nearest to a normalized position.
    ///
    /// The grid index is `round(n * ratio)` (clamped to n), so `ratio = 0.0`
    /// maps to the left boundary and `ratio = 1.0` to the right one. This is
    /// nearest-point lookup, not interpolation: off-grid reads carry a
    /// quantization error on the order of one grid spacing.
    ///
    /// A non-finite value (a destabilized or misconfigured grid) is
    /// replaced by 0.0 and counted, so garbage never reaches the audio
    /// device.
    pub fn read(&mut self, ratio: f64) -> f64 {
        let n = self.scheme.intervals();
        let idx = ((n as f64 * ratio).round() as usize).min(n);

        let v = self.states[self.roles[1]][idx];
        if v.is_finite() {
            v
        } else {
            if self.anomalies == 0 {
                warn!(index = idx, "non-finite displacement read, substituting 0");
            }
            self.anomalies += 1;
            0.0
        }
    }

    /// Read-only view of the current generation, e.g. for drawing the string
    /// shape. Length is `intervals() + 1`.
    pub fn displacement(&self) -> &[f64] {
        &self.states[self.roles[1]]
    }

    /// Number of grid intervals.
    pub fn intervals(&self) -> usize {
        self.scheme.intervals()
    }

    /// Grid spacing in normalized length units.
    pub fn grid_spacing(&self) -> f64 {
        self.scheme.grid_spacing()
    }

    /// How many non-finite read-outs have been swallowed so far.
    pub fn anomalies(&self) -> u64 {
        self.anomalies
    }
}
