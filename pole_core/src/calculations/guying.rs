//! Down-Guy Solver
//!
//! Resolves the tension, geometry and cost of a down guy counteracting the
//! horizontal load a cable attachment puts on a pole, plus the pure
//! pull-distance / included-angle geometry used to autofill a guy direction
//! from two span bearings.
//!
//! The guy is modeled at a representative angle from the pole, clamped to
//! the 30°-60° band linemen actually set anchors in. Horizontal demand is
//! the cable's working tension plus wind on the tributary half-span; guy
//! tension is demand over sin(angle).

use serde::{Deserialize, Serialize};

use crate::cables::CableSpec;
use crate::calculations::sag::effective_weight_lb_per_ft;
use crate::errors::{CalcError, CalcResult};

/// Guy tension above which a down guy is required (lb)
pub const GUY_REQUIRED_THRESHOLD_LB: f64 = 500.0;

/// Flat installation cost of a down guy and anchor ($)
const GUY_BASE_COST: f64 = 250.0;

/// Cost per pound of resolved guy tension ($/lb)
const GUY_COST_PER_LB: f64 = 0.15;

/// Installed-cost cap for a single down guy ($)
const GUY_COST_CAP: f64 = 2000.0;

/// Preferred guy angle from the pole (deg), clamped to [30, 60]
const PREFERRED_GUY_ANGLE_DEG: f64 = 45.0;

/// Down-guy solution for one attachment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuyResult {
    /// True when resolved tension exceeds [`GUY_REQUIRED_THRESHOLD_LB`]
    pub required: bool,
    /// Resolved guy tension (lb)
    pub tension_lb: f64,
    /// Guy angle from the pole (deg)
    pub angle_deg: f64,
    /// Anchor lead distance from the pole base (ft)
    pub lead_distance_ft: f64,
    /// Guy attachment height on the pole (ft)
    pub guy_attach_height_ft: f64,
    /// Compass direction of the pull the guy opposes (deg), when known
    pub pull_direction_deg: Option<f64>,
    /// Installed cost estimate ($)
    pub total_cost: f64,
}

/// Solve the down guy for a cable attachment.
///
/// # Arguments
///
/// * `pole_above_ground_ft` - pole height above grade
/// * `attachment_height_ft` - cable attach height; the guy attaches just
///   below it
/// * `cable` - attached cable spec (tension and wind area)
/// * `span_length_ft` - span the attachment serves
/// * `wind_speed_mph` - design wind speed
/// * `pull_direction_deg` - optional net pull bearing, echoed into the result
pub fn calculate_down_guy(
    pole_above_ground_ft: f64,
    attachment_height_ft: f64,
    cable: &CableSpec,
    span_length_ft: f64,
    wind_speed_mph: f64,
    pull_direction_deg: Option<f64>,
) -> CalcResult<GuyResult> {
    if !(pole_above_ground_ft > 0.0) || !pole_above_ground_ft.is_finite() {
        return Err(CalcError::invalid_input(
            "pole_above_ground_ft",
            pole_above_ground_ft.to_string(),
            "Above-ground pole height must be positive and finite",
        ));
    }
    if !(attachment_height_ft > 0.0) || !attachment_height_ft.is_finite() {
        return Err(CalcError::invalid_input(
            "attachment_height_ft",
            attachment_height_ft.to_string(),
            "Attachment height must be positive and finite",
        ));
    }
    if !(span_length_ft > 0.0) || !span_length_ft.is_finite() {
        return Err(CalcError::invalid_input(
            "span_length_ft",
            span_length_ft.to_string(),
            "Span length must be positive and finite",
        ));
    }

    // Horizontal demand at the attachment: cable working tension plus wind on
    // the tributary half-span. Wind load per foot comes from the same
    // velocity-pressure form the sag model uses (bare cable, no ice).
    let bare = effective_weight_lb_per_ft(0.0, wind_speed_mph.abs(), cable.diameter_in, 0.0);
    let wind_on_half_span = bare * span_length_ft / 2.0;
    let horizontal_load_lb = cable.working_tension_lb() + wind_on_half_span;

    // Guy attaches just below the cable, never above the pole
    let guy_attach_height_ft = attachment_height_ft.min(pole_above_ground_ft) - 0.5;
    let guy_attach_height_ft = guy_attach_height_ft.max(1.0);

    let angle_deg = PREFERRED_GUY_ANGLE_DEG.clamp(30.0, 60.0);
    let angle_rad = angle_deg.to_radians();

    let tension_lb = horizontal_load_lb / angle_rad.sin();
    let lead_distance_ft = guy_attach_height_ft * angle_rad.tan();

    let required = tension_lb > GUY_REQUIRED_THRESHOLD_LB;
    let total_cost = if required {
        (GUY_BASE_COST + GUY_COST_PER_LB * tension_lb).min(GUY_COST_CAP)
    } else {
        0.0
    };

    Ok(GuyResult {
        required,
        tension_lb,
        angle_deg,
        lead_distance_ft,
        guy_attach_height_ft,
        pull_direction_deg: pull_direction_deg.filter(|d| d.is_finite()),
        total_cost,
    })
}

// ============================================================================
// Pull / angle geometry
// ============================================================================

/// Pull distance for an included angle between two spans at a pole.
///
/// The pull is the bisector offset measured against a base span:
/// `pull = base * cos(theta / 2)`. A straight-through pole (theta = 180°)
/// has zero pull; doubled-back spans (theta = 0°) pull the full base span.
pub fn pull_from_angle_deg(theta_deg: f64, base_span_ft: f64) -> f64 {
    base_span_ft * (theta_deg.to_radians() / 2.0).cos()
}

/// Exact inverse of [`pull_from_angle_deg`] on [0°, 180°].
pub fn angle_deg_from_pull(pull_ft: f64, base_span_ft: f64) -> f64 {
    if base_span_ft == 0.0 {
        return 180.0;
    }
    let ratio = (pull_ft / base_span_ft).clamp(-1.0, 1.0);
    2.0 * ratio.acos().to_degrees()
}

/// Unsigned included angle between two compass bearings, in [0°, 180°].
/// Invariant under adding or subtracting whole turns to either bearing.
pub fn normalize_included_angle_deg(bearing_a_deg: f64, bearing_b_deg: f64) -> f64 {
    let diff = (bearing_a_deg - bearing_b_deg).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Autofilled guy pull suggestion from two span bearings at a pole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PullAutofill {
    /// Included angle between the spans (deg)
    pub theta_deg: f64,
    /// Suggested pull distance (ft)
    pub pull_ft: f64,
}

/// Suggest a guy pull distance from the bearings of the incoming and
/// outgoing spans at a pole.
///
/// # Example
///
/// ```rust
/// use pole_core::calculations::guying::compute_pull_autofill;
///
/// // Directly opposite spans: no net pull
/// let fill = compute_pull_autofill(0.0, 180.0, 100.0);
/// assert_eq!(fill.theta_deg, 180.0);
/// assert!(fill.pull_ft.abs() < 1e-9);
/// ```
pub fn compute_pull_autofill(
    incoming_bearing_deg: f64,
    outgoing_bearing_deg: f64,
    base_span_ft: f64,
) -> PullAutofill {
    let theta_deg = normalize_included_angle_deg(incoming_bearing_deg, outgoing_bearing_deg);
    PullAutofill {
        theta_deg,
        pull_ft: pull_from_angle_deg(theta_deg, base_span_ft),
    }
}
