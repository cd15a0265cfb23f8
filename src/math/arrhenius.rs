//! Temperature transforms for Arrhenius-style regressions.
//!
//! Boltzmann–Arrhenius kinetics give
//!
//! - `rate ∝ exp(-E / (k T))`, `T` in Kelvin
//!
//! so `ln(rate)` is linear in `1/(kT)` with slope `-E`. The helpers here keep the
//! Celsius -> Kelvin conversion and the constant in one place.

use crate::domain::{BOLTZMANN_EV, KELVIN_OFFSET};

/// `1 / (k (temp + 273.15))` for a temperature in °C.
pub fn inverse_kt(temp_c: f64) -> f64 {
    1.0 / (BOLTZMANN_EV * (temp_c + KELVIN_OFFSET))
}

/// Arrhenius factor `exp(E/k (1/Tref - 1/T))`, both temperatures in °C.
pub fn boltzmann_factor(e: f64, temp_c: f64, tref_c: f64) -> f64 {
    (e * (inverse_kt(tref_c) - inverse_kt(temp_c))).exp()
}

/// Q10 implied by a slope of `ln(rate)` against temperature.
pub fn q10_from_slope(slope: f64) -> f64 {
    (10.0 * slope).exp()
}
