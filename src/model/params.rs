//! Physical description of a string.

use std::f64::consts::PI;

/// Physical parameters of a stiff, damped string.
///
/// All values are in SI units. The set is immutable by convention: changing
/// any of them requires deriving a fresh [`Scheme`](crate::model::Scheme)
/// (and with it a fresh engine): the grid size and update coefficients all
/// depend on every field here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StringParams {
    /// Length L in meters.
    pub length: f64,
    /// Material density ρ in kg/m³.
    pub density: f64,
    /// Cross-sectional area A in m².
    pub area: f64,
    /// Tension T in newtons.
    pub tension: f64,
    /// Young's modulus E in pascals.
    pub youngs_modulus: f64,
    /// Second moment of area I in m⁴.
    pub moment_of_area: f64,
    /// Frequency-independent damping coefficient σ0.
    pub sigma0: f64,
    /// Frequency-dependent damping coefficient σ1.
    pub sigma1: f64,
}

impl StringParams {
    /// A steel wire of the given radius under 300 N of tension.
    ///
    /// Area and second moment of area are derived from the radius assuming a
    /// circular cross section (A = πr², I = πr⁴/4).
    pub fn steel_wire(radius: f64) -> Self {
        StringParams {
            length: 1.0,
            density: 7850.0,
            area: PI * radius * radius,
            tension: 300.0,
            youngs_modulus: 2e11,
            moment_of_area: PI * radius.powi(4) * 0.25,
            sigma0: 1.0,
            sigma1: 0.005,
        }
    }

    /// Wave speed squared, c² = T/(ρA).
    pub(crate) fn wave_speed_sq(&self) -> f64 {
        self.tension / (self.density * self.area)
    }

    /// Stiffness coefficient squared, κ² = EI/(ρA).
    pub(crate) fn stiffness_sq(&self) -> f64 {
        self.youngs_modulus * self.moment_of_area / (self.density * self.area)
    }
}

impl Default for StringParams {
    /// A 1 m steel wire with 0.5 mm radius. Sounds like a dull piano string.
    fn default() -> Self {
        StringParams::steel_wire(0.0005)
    }
}
