//! Conductor Loading & Sag
//!
//! Effective-weight sag model for a single span. The cable's bare weight is
//! combined with an ice-shell weight and a horizontal wind term as a vector
//! resultant (wind acts horizontally, gravity vertically), then sag follows
//! the parabolic approximation of the catenary:
//!
//! ```text
//! w_eff = sqrt((w_bare + w_ice)^2 + w_wind^2)
//! sag   = w_eff * L^2 / (8 * T)
//! ```
//!
//! Wind pressure uses the standard 0.00256 * V^2 psf velocity-pressure form;
//! ice is a 57 pcf annular shell on the cable diameter (NESC district
//! loading shape).

use serde::{Deserialize, Serialize};

use crate::cables::CableSpec;
use crate::errors::{CalcError, CalcResult};

/// Glaze ice density (lb/ft^3)
const ICE_DENSITY_PCF: f64 = 57.0;

/// Velocity pressure coefficient: q (psf) = 0.00256 * V^2 (mph)
const WIND_PRESSURE_COEFF: f64 = 0.00256;

/// Sag and midspan height for one span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanLoadResult {
    /// Span length (ft)
    pub span_ft: f64,
    /// Low-point sag below the attachment chord (ft)
    pub sag_ft: f64,
    /// Height of the low point above grade (ft); negative values indicate a
    /// physically invalid configuration, flagged by the orchestrator
    pub midspan_ft: f64,
    /// Effective per-foot weight under wind and ice (lb/ft)
    pub effective_weight_lb_per_ft: f64,
}

/// Effective per-foot cable weight under wind and ice loading.
pub fn effective_weight_lb_per_ft(
    weight_lb_per_ft: f64,
    wind_speed_mph: f64,
    cable_diameter_in: f64,
    ice_thickness_in: f64,
) -> f64 {
    let iced_diameter_in = cable_diameter_in + 2.0 * ice_thickness_in;

    // Annular ice shell area in ft^2: pi/4 * (D_iced^2 - D^2), diameters in ft
    let ice_area_sqft = std::f64::consts::FRAC_PI_4
        * ((iced_diameter_in / 12.0).powi(2) - (cable_diameter_in / 12.0).powi(2));
    let ice_weight = ICE_DENSITY_PCF * ice_area_sqft;

    // Wind acts on the iced projected area, per foot of cable
    let wind_pressure_psf = WIND_PRESSURE_COEFF * wind_speed_mph.powi(2);
    let wind_load = wind_pressure_psf * iced_diameter_in / 12.0;

    // Gravity and wind are orthogonal; combine as a resultant
    let vertical = weight_lb_per_ft + ice_weight;
    (vertical.powi(2) + wind_load.powi(2)).sqrt()
}

/// Calculate sag for a span under wind and ice loading.
///
/// Returns a structured error for non-positive span or tension; degenerate
/// inputs are the caller's warning to surface, not a panic.
///
/// # Example
///
/// ```rust
/// use pole_core::calculations::sag::calculate_sag;
///
/// let sag = calculate_sag(200.0, 0.45, 3325.0, 90.0, 1.0, 0.0).unwrap();
/// assert!(sag > 0.0 && sag < 10.0);
/// ```
pub fn calculate_sag(
    span_ft: f64,
    weight_lb_per_ft: f64,
    tension_lb: f64,
    wind_speed_mph: f64,
    cable_diameter_in: f64,
    ice_thickness_in: f64,
) -> CalcResult<f64> {
    if !(span_ft > 0.0) || !span_ft.is_finite() {
        return Err(CalcError::invalid_input(
            "span_ft",
            span_ft.to_string(),
            "Span must be positive and finite",
        ));
    }
    if !(tension_lb > 0.0) || !tension_lb.is_finite() {
        return Err(CalcError::invalid_input(
            "tension_lb",
            tension_lb.to_string(),
            "Tension must be positive and finite",
        ));
    }

    let w_eff = effective_weight_lb_per_ft(
        weight_lb_per_ft.max(0.0),
        wind_speed_mph.abs(),
        cable_diameter_in.max(0.0),
        ice_thickness_in.max(0.0),
    );
    Ok(w_eff * span_ft.powi(2) / (8.0 * tension_lb))
}

/// Sag and midspan height for a span between two attach heights.
///
/// The cable hangs at its working tension (rated tension over a safety
/// factor of 2). Midspan height is the mean of the two attach heights minus
/// sag; a negative result is returned as-is for the orchestrator to flag.
pub fn span_load(
    attach_a_ft: f64,
    attach_b_ft: f64,
    span_ft: f64,
    cable: &CableSpec,
    wind_speed_mph: f64,
    ice_thickness_in: f64,
) -> CalcResult<SpanLoadResult> {
    let sag_ft = calculate_sag(
        span_ft,
        cable.unit_weight_lb_per_ft,
        cable.working_tension_lb(),
        wind_speed_mph,
        cable.diameter_in,
        ice_thickness_in,
    )?;
    let midspan_ft = (attach_a_ft + attach_b_ft) / 2.0 - sag_ft;
    Ok(SpanLoadResult {
        span_ft,
        sag_ft,
        midspan_ft,
        effective_weight_lb_per_ft: effective_weight_lb_per_ft(
            cable.unit_weight_lb_per_ft,
            wind_speed_mph.abs(),
            cable.diameter_in,
            ice_thickness_in.max(0.0),
        ),
    })
}
