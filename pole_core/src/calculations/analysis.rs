//! Attachment Analysis Orchestrator
//!
//! Single-pass pipeline that validates the job inputs, resolves the
//! effective clearance profile, derives pole geometry, arbitrates the
//! controlling clearance for the proposed attachment, computes span loading,
//! assesses make-ready on existing lines, optionally solves a down guy, and
//! rolls warnings, notes and costs into one report.
//!
//! The orchestrator never throws for expected validation failures: missing
//! or unparseable required measurements come back as a field-keyed
//! [`ValidationErrors`]. Degenerate optional inputs (zero span, non-finite
//! wind) are dropped as "not applicable" and surfaced as warnings, so a
//! best-effort report is always produced when the required fields parse.
//!
//! ## Example
//!
//! ```rust
//! use pole_core::calculations::analysis::{compute_analysis, AnalysisInput, ConstructionType};
//!
//! let input = AnalysisInput {
//!     pole_height: "45".to_string(),
//!     pole_class: "Class 3".to_string(),
//!     construction: ConstructionType::Existing,
//!     existing_power_height: "30' 0\"".to_string(),
//!     span_length_ft: Some(200.0),
//!     ..Default::default()
//! };
//!
//! let report = compute_analysis(&input).expect("valid job");
//! assert!(report.proposed_attach_ft > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::cables::{AttachmentType, CableSpec};
use crate::calculations::guying::{calculate_down_guy, GuyResult};
use crate::calculations::make_ready::{analyze_make_ready_impact, MakeReadyItem};
use crate::calculations::pole::{pole_burial_data, PoleGeometry};
use crate::calculations::sag::{span_load, SpanLoadResult};
use crate::clearances::{resolve_clearances, ClearanceOverrides, ClearanceProfile, Environment, Voltage};
use crate::errors::ValidationErrors;
use crate::units::{format_feet_inches, parse_feet, MeasurementStyle};

/// Flat fee for installing the new attachment ($)
const BASE_CONSTRUCTION_COST: f64 = 350.0;

/// Surcharge when the pole carries a transformer ($)
const TRANSFORMER_SURCHARGE: f64 = 500.0;

/// Span length above which the long-span surcharge applies (ft)
const LONG_SPAN_THRESHOLD_FT: f64 = 300.0;

/// Long-span construction surcharge ($)
const LONG_SPAN_SURCHARGE: f64 = 250.0;

/// Default design wind speed when none is supplied (mph)
const DEFAULT_WIND_SPEED_MPH: f64 = 90.0;

/// Whether the pole is newly set or already carries facilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionType {
    /// New pole; no existing power to clear against
    New,
    /// Existing pole; the power attachment height is a required input
    #[default]
    Existing,
}

/// Facility class of an existing line on the pole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Supply conductor (separation per the job's voltage class)
    Supply,
    /// Communication attachment of another attacher
    #[default]
    Communication,
    /// Secondary/neutral, cleared like communication
    Neutral,
}

impl LineKind {
    fn display_name(&self) -> &'static str {
        match self {
            LineKind::Supply => "supply",
            LineKind::Communication => "communication",
            LineKind::Neutral => "neutral",
        }
    }
}

/// One existing line on the pole, as collected in the field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExistingLine {
    /// Owning company (for make-ready notes)
    #[serde(default)]
    pub company: String,
    /// Facility class
    #[serde(default)]
    pub line_type: LineKind,
    /// Voltage tier of a supply line; defaults to the job's voltage
    #[serde(default)]
    pub voltage: Option<Voltage>,
    /// Measured attach height, free-form text
    pub height: String,
    /// True when the field tech flagged this line for make-ready
    #[serde(default)]
    pub make_ready: bool,
    /// Optional tech-supplied target height after the move
    #[serde(default)]
    pub make_ready_height: Option<String>,
}

/// All inputs for one attachment analysis.
///
/// Only `pole_height` (and `existing_power_height` on existing construction)
/// are hard-required; every other field has a documented default and is
/// tolerated blank or partially filled, so the analysis can be re-run on
/// every keystroke of an editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisInput {
    /// Total pole length, free-form text. Required, must parse positive.
    pub pole_height: String,
    /// ANSI pole class label (default: empty, reported as unrecognized)
    pub pole_class: String,
    /// New or existing construction (default: existing)
    pub construction: ConstructionType,
    /// Power attach height, free-form text. Required on existing poles.
    pub existing_power_height: String,
    /// Supply voltage class on the pole (default: distribution)
    pub voltage: Voltage,
    /// Primary environment under the span (default: road)
    pub environment: Environment,
    /// Cable family of the proposed attachment (default: communication)
    pub attachment_type: AttachmentType,
    /// Span length to the far pole (ft); span load is skipped when absent
    pub span_length_ft: Option<f64>,
    /// Far-pole attach height, free-form text (default: same as proposed)
    pub far_side_attach_height: Option<String>,
    /// Design wind speed (default: 90 mph)
    pub wind_speed_mph: Option<f64>,
    /// Radial ice thickness (default: 0 in)
    pub ice_thickness_in: Option<f64>,
    /// Existing lines on the pole
    pub existing_lines: Vec<ExistingLine>,
    /// Utility preset key; unknown keys resolve to baseline
    pub preset: Option<String>,
    /// Job-level clearance overrides (highest precedence)
    pub overrides: ClearanceOverrides,
    /// Solve a down guy for the new attachment
    pub include_guying: bool,
    /// Net pull bearing the guy opposes (deg)
    pub pull_direction_deg: Option<f64>,
    /// Pole carries a transformer (construction surcharge)
    pub has_transformer: bool,
}

/// The clearance candidate that forced the proposed attach height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllingClearance {
    /// What the candidate is (e.g., "ground clearance (Road (truck traffic))")
    pub basis: String,
    /// Attach height the candidate requires (ft)
    pub required_ft: f64,
    /// Numeric justification for the record
    pub detail: String,
}

/// Aggregated result of one attachment analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Derived pole geometry
    pub pole: PoleGeometry,
    /// Effective clearance profile used
    pub clearances: ClearanceProfile,
    /// Cable spec of the proposed attachment
    pub cable: CableSpec,
    /// Recommended attach height (ft), rounded up to the next inch
    pub proposed_attach_ft: f64,
    /// Which clearance candidate controlled, and why
    pub controlling: ControllingClearance,
    /// Span loading, when a span length was supplied
    pub span: Option<SpanLoadResult>,
    /// Make-ready determinations for flagged existing lines
    pub make_ready: Vec<MakeReadyItem>,
    /// Down-guy solution, when requested
    pub guy: Option<GuyResult>,
    /// Conditions an engineer must review
    pub warnings: Vec<String>,
    /// Informational line items
    pub notes: Vec<String>,
    /// Total estimated cost ($)
    pub total_cost: f64,
}

/// Parse an optional numeric input, dropping non-finite and non-positive
/// values as "not applicable".
fn positive_or_none(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn fmt_ft(value: f64) -> String {
    format_feet_inches(value, MeasurementStyle::TickMarks)
}

/// Run the full attachment analysis.
///
/// Returns `Err(ValidationErrors)` naming every missing or unparseable
/// required field; otherwise a best-effort [`AnalysisReport`] whose numeric
/// fields are all finite, with degenerate conditions reported as warnings.
pub fn compute_analysis(input: &AnalysisInput) -> Result<AnalysisReport, ValidationErrors> {
    // --- 1. Validate required inputs -------------------------------------
    let mut errors = ValidationErrors::new();

    let pole_height_ft = match parse_feet(&input.pole_height) {
        Some(h) if h > 0.0 => Some(h),
        Some(_) => {
            errors.add("pole_height", "Pole height must be positive");
            None
        }
        None => {
            errors.add("pole_height", "Pole height is required (e.g., \"45\" or \"45' 0\\\"\")");
            None
        }
    };

    let existing_power_ft = match input.construction {
        ConstructionType::New => None,
        ConstructionType::Existing => match parse_feet(&input.existing_power_height) {
            Some(h) if h > 0.0 => Some(h),
            Some(_) => {
                errors.add("existing_power_height", "Existing power height must be positive");
                None
            }
            None => {
                errors.add(
                    "existing_power_height",
                    "Existing power height is required for existing construction",
                );
                None
            }
        },
    };

    errors.into_result()?;
    let pole_height_ft = pole_height_ft.expect("validated above");

    let mut warnings: Vec<String> = Vec::new();
    let mut notes: Vec<String> = Vec::new();

    // Scrub optional environmental inputs up front
    let wind_speed_mph = input
        .wind_speed_mph
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(DEFAULT_WIND_SPEED_MPH);
    let ice_thickness_in = input
        .ice_thickness_in
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0);
    let span_length_ft = positive_or_none(input.span_length_ft);

    // --- 2. Resolve clearances -------------------------------------------
    let clearances = resolve_clearances(
        input.voltage,
        input.environment,
        input.preset.as_deref(),
        &input.overrides,
    );

    // --- 3. Pole geometry -------------------------------------------------
    let pole = pole_burial_data(pole_height_ft, &input.pole_class);
    if pole.above_ground_ft <= 0.0 {
        warnings.push(format!(
            "Pole length {} leaves no height above grade after {} of burial",
            fmt_ft(pole.input_height_ft),
            fmt_ft(pole.buried_ft)
        ));
    }

    let cable = CableSpec::lookup(input.attachment_type);

    // --- 4. Controlling clearance arbitration -----------------------------
    // Lower-bound candidates push the attachment up; the one demanding the
    // greatest height controls. Separation and pole-top space cap it from
    // above afterwards.
    let mut candidates: Vec<ControllingClearance> = vec![ControllingClearance {
        basis: format!("ground clearance ({})", input.environment),
        required_ft: clearances.ground_clearance_ft,
        detail: format!(
            "{} target over {}",
            fmt_ft(clearances.ground_clearance_ft),
            input.environment
        ),
    }];
    if input.environment != Environment::Road {
        candidates.push(ControllingClearance {
            basis: "road clearance".to_string(),
            required_ft: clearances.road_clearance_ft,
            detail: format!(
                "{} target over roads subject to truck traffic",
                fmt_ft(clearances.road_clearance_ft)
            ),
        });
    }

    let controlling = candidates
        .into_iter()
        .max_by(|a, b| {
            a.required_ft
                .partial_cmp(&b.required_ft)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("at least the ground candidate exists");

    // Snap up to the next whole inch
    let mut proposed_attach_ft = (controlling.required_ft * 12.0).ceil() / 12.0;

    // Cap: stay the resolved separation below the power space
    if let Some(power_ft) = existing_power_ft {
        let separation_ft = clearances.comm_to_supply_in / 12.0;
        let power_cap_ft = power_ft - separation_ft;
        if proposed_attach_ft > power_cap_ft {
            proposed_attach_ft = (power_cap_ft * 12.0).floor() / 12.0;
            warnings.push(format!(
                "Attachment lowered to {} to hold {:.0}\" separation below power at {}; {} is not met",
                fmt_ft(proposed_attach_ft),
                clearances.comm_to_supply_in,
                fmt_ft(power_ft),
                controlling.basis
            ));
        }
    }

    // Cap: pole-top working space
    let pole_top_cap_ft = pole.above_ground_ft - clearances.pole_top_space_ft;
    if proposed_attach_ft > pole_top_cap_ft {
        proposed_attach_ft = (pole_top_cap_ft * 12.0).floor() / 12.0;
        warnings.push(format!(
            "Pole-top space violated: attachment lowered to {} to keep {} below the pole top",
            fmt_ft(proposed_attach_ft.max(0.0)),
            fmt_ft(clearances.pole_top_space_ft)
        ));
    }

    // --- 5. Span load ------------------------------------------------------
    let far_attach_ft = input
        .far_side_attach_height
        .as_deref()
        .and_then(parse_feet)
        .filter(|v| *v > 0.0)
        .unwrap_or(proposed_attach_ft);

    let span = match span_length_ft {
        None => {
            notes.push("No span length provided; span load not evaluated".to_string());
            None
        }
        Some(span_ft) => match span_load(
            proposed_attach_ft,
            far_attach_ft,
            span_ft,
            &cable,
            wind_speed_mph,
            ice_thickness_in,
        ) {
            Ok(result) => {
                if result.midspan_ft < 0.0 {
                    warnings.push(
                        "Midspan height is below grade; check attach heights and span length"
                            .to_string(),
                    );
                } else if result.midspan_ft < clearances.ground_clearance_ft {
                    warnings.push(format!(
                        "Midspan clearance {} is below the {} target over {}",
                        fmt_ft(result.midspan_ft),
                        fmt_ft(clearances.ground_clearance_ft),
                        input.environment
                    ));
                }
                Some(result)
            }
            Err(e) => {
                warnings.push(format!("Span load not evaluated: {}", e));
                None
            }
        },
    };

    // --- 6. Make-ready on existing lines -----------------------------------
    let mut make_ready: Vec<MakeReadyItem> = Vec::new();
    let mut make_ready_cost = 0.0;

    for (index, line) in input.existing_lines.iter().enumerate() {
        let Some(line_height_ft) = parse_feet(&line.height).filter(|v| *v > 0.0) else {
            warnings.push(format!(
                "Existing line {} ({}) has no parseable height; skipped",
                index + 1,
                line.company
            ));
            continue;
        };

        // A supply line clears against its own tier's separation, not the
        // job's
        let separation_ft = match line.line_type {
            LineKind::Supply => {
                clearances.separation_for(line.voltage.unwrap_or(input.voltage)) / 12.0
            }
            LineKind::Communication | LineKind::Neutral => clearances.comm_to_comm_in / 12.0,
        };

        let mut item =
            analyze_make_ready_impact(line_height_ft, proposed_attach_ft, separation_ft);

        if !line.make_ready {
            if item.required {
                warnings.push(format!(
                    "{} {} line at {} is within the required {:.0}\" separation but is not flagged for make-ready",
                    line.company,
                    line.line_type.display_name(),
                    fmt_ft(line_height_ft),
                    separation_ft * 12.0
                ));
            }
            continue;
        }

        // A tech-supplied target height supersedes the computed one and is a
        // directed move, required even when the line already clears
        if let Some(target_ft) = line
            .make_ready_height
            .as_deref()
            .and_then(parse_feet)
            .filter(|v| *v > 0.0)
        {
            let adjustment_in = ((line_height_ft - target_ft).abs() * 12.0).round();
            item.required = adjustment_in > 0.0;
            item.recommended_height_ft = target_ft;
            item.adjustment_in = adjustment_in;
            item.estimated_cost =
                adjustment_in * crate::calculations::make_ready::MAKE_READY_COST_PER_IN;
        }

        if item.required {
            notes.push(format!(
                "Make-ready: move {} {} line from {} to {} ({:.0}\" adjustment, ${:.0})",
                line.company,
                line.line_type.display_name(),
                fmt_ft(line_height_ft),
                fmt_ft(item.recommended_height_ft),
                item.adjustment_in,
                item.estimated_cost
            ));
            make_ready_cost += item.estimated_cost;
        } else {
            notes.push(format!(
                "{} {} line at {} already clears the proposed attachment",
                line.company,
                line.line_type.display_name(),
                fmt_ft(line_height_ft)
            ));
        }
        make_ready.push(item);
    }

    // --- 7. Guying ----------------------------------------------------------
    let guy = if !input.include_guying {
        None
    } else {
        match span_length_ft {
            None => {
                warnings.push("Guying requested but no span length provided; skipped".to_string());
                None
            }
            Some(span_ft) => match calculate_down_guy(
                pole.above_ground_ft,
                proposed_attach_ft,
                &cable,
                span_ft,
                wind_speed_mph,
                input.pull_direction_deg,
            ) {
                Ok(result) => {
                    if result.required {
                        notes.push(format!(
                            "Down guy required: {:.0} lb at {:.0}°, {:.1} ft lead (${:.0})",
                            result.tension_lb,
                            result.angle_deg,
                            result.lead_distance_ft,
                            result.total_cost
                        ));
                    }
                    Some(result)
                }
                Err(e) => {
                    warnings.push(format!("Guying not evaluated: {}", e));
                    None
                }
            },
        }
    };

    // --- 8/9. Cost rollup and report ----------------------------------------
    let mut total_cost = BASE_CONSTRUCTION_COST + make_ready_cost;
    if let Some(g) = &guy {
        total_cost += g.total_cost;
    }
    if input.has_transformer {
        total_cost += TRANSFORMER_SURCHARGE;
        notes.push(format!("Transformer pole surcharge ${:.0}", TRANSFORMER_SURCHARGE));
    }
    if let Some(span_ft) = span_length_ft {
        if span_ft > LONG_SPAN_THRESHOLD_FT {
            total_cost += LONG_SPAN_SURCHARGE;
            notes.push(format!(
                "Long span ({:.0} ft > {:.0} ft) surcharge ${:.0}",
                span_ft, LONG_SPAN_THRESHOLD_FT, LONG_SPAN_SURCHARGE
            ));
        }
    }

    Ok(AnalysisReport {
        pole,
        clearances,
        cable,
        proposed_attach_ft,
        controlling,
        span,
        make_ready,
        guy,
        warnings,
        notes,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn baseline_input() -> AnalysisInput {
        AnalysisInput {
            pole_height: "45".to_string(),
            pole_class: "Class 3".to_string(),
            construction: ConstructionType::Existing,
            existing_power_height: "30' 0\"".to_string(),
            voltage: Voltage::Distribution,
            environment: Environment::Road,
            span_length_ft: Some(200.0),
            wind_speed_mph: Some(90.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let report = compute_analysis(&baseline_input()).unwrap();

        let span = report.span.as_ref().unwrap();
        assert_eq!(span.span_ft, 200.0);
        assert!(span.midspan_ft.is_finite());

        // The proposed attachment sits at least the resolved separation
        // below the existing power space
        let separation_ft = report.clearances.comm_to_supply_in / 12.0;
        assert!(report.proposed_attach_ft <= 30.0 - separation_ft);
        assert!(report.proposed_attach_ft < 30.0);

        assert!(!report.controlling.basis.is_empty());
        assert!(!report.controlling.detail.is_empty());
        assert!(report.total_cost >= 350.0);
    }

    #[test]
    fn test_missing_pole_height_is_structured_error() {
        let input = AnalysisInput::default();
        let errors = compute_analysis(&input).unwrap_err();
        assert!(errors.fields.contains_key("pole_height"));
    }

    #[test]
    fn test_existing_construction_requires_power_height() {
        let mut input = baseline_input();
        input.existing_power_height = String::new();
        let errors = compute_analysis(&input).unwrap_err();
        assert!(errors.fields.contains_key("existing_power_height"));

        // New construction drops the requirement
        input.construction = ConstructionType::New;
        assert!(compute_analysis(&input).is_ok());
    }

    #[test]
    fn test_both_errors_reported_together() {
        let input = AnalysisInput {
            pole_height: "tall".to_string(),
            existing_power_height: "no idea".to_string(),
            ..Default::default()
        };
        let errors = compute_analysis(&input).unwrap_err();
        assert_eq!(errors.fields.len(), 2);
    }

    #[test]
    fn test_controlling_clearance_recorded() {
        let mut input = baseline_input();
        input.environment = Environment::Pedestrian;
        let report = compute_analysis(&input).unwrap();
        // Road target (18.5) beats the pedestrian target, so it controls
        assert_eq!(report.controlling.basis, "road clearance");
        assert!(report.proposed_attach_ft >= report.clearances.road_clearance_ft);
    }

    #[test]
    fn test_separation_caps_attachment() {
        let mut input = baseline_input();
        // Power so low the ground target cannot be met below it
        input.existing_power_height = "19'".to_string();
        let report = compute_analysis(&input).unwrap();
        let separation_ft = report.clearances.comm_to_supply_in / 12.0;
        assert!(report.proposed_attach_ft <= 19.0 - separation_ft + 1e-9);
        assert!(report.warnings.iter().any(|w| w.contains("separation")));
    }

    #[test]
    fn test_pole_top_space_warning() {
        let mut input = baseline_input();
        input.pole_height = "20".to_string();
        input.construction = ConstructionType::New;
        let report = compute_analysis(&input).unwrap();
        // 20 ft pole: 15 ft above ground, 4 ft pole-top space, 18.5 target
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("Pole-top space violated")));
    }

    #[test]
    fn test_make_ready_flagged_line() {
        let mut input = baseline_input();
        input.existing_lines = vec![ExistingLine {
            company: "Acme Telecom".to_string(),
            line_type: LineKind::Communication,
            voltage: None,
            height: "19'".to_string(),
            make_ready: true,
            make_ready_height: None,
        }];
        let report = compute_analysis(&input).unwrap();
        assert_eq!(report.make_ready.len(), 1);
        let item = &report.make_ready[0];
        assert!(item.required);
        assert!(report.notes.iter().any(|n| n.contains("Acme Telecom")));
        assert!(report.total_cost >= 350.0 + item.estimated_cost);
    }

    #[test]
    fn test_unflagged_conflict_warns() {
        let mut input = baseline_input();
        input.existing_lines = vec![ExistingLine {
            company: "Acme Telecom".to_string(),
            line_type: LineKind::Communication,
            voltage: None,
            height: "19'".to_string(),
            make_ready: false,
            make_ready_height: None,
        }];
        let report = compute_analysis(&input).unwrap();
        assert!(report.make_ready.is_empty());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("not flagged for make-ready")));
    }

    #[test]
    fn test_tech_supplied_make_ready_height_wins() {
        let mut input = baseline_input();
        input.existing_lines = vec![ExistingLine {
            company: "Acme Telecom".to_string(),
            line_type: LineKind::Communication,
            voltage: None,
            height: "19'".to_string(),
            make_ready: true,
            make_ready_height: Some("21' 6\"".to_string()),
        }];
        let report = compute_analysis(&input).unwrap();
        assert_eq!(report.make_ready[0].recommended_height_ft, 21.5);
        assert_eq!(report.make_ready[0].adjustment_in, 30.0);
    }

    #[test]
    fn test_supply_line_clears_against_its_own_tier() {
        // Distribution job, proposed attach at 18.5. A line 4 ft above the
        // proposal clears the 40" distribution separation but not the 60"
        // transmission separation.
        let mut input = baseline_input();
        input.existing_lines = vec![ExistingLine {
            company: "Grid Co".to_string(),
            line_type: LineKind::Supply,
            voltage: Some(Voltage::Transmission),
            height: "22' 6\"".to_string(),
            make_ready: true,
            make_ready_height: None,
        }];
        let report = compute_analysis(&input).unwrap();
        let item = &report.make_ready[0];
        assert!(item.required);
        assert_eq!(item.recommended_height_ft, 18.5 + 60.0 / 12.0);

        // The same line at the job's own tier is compliant
        input.existing_lines[0].voltage = None;
        let report = compute_analysis(&input).unwrap();
        assert!(!report.make_ready[0].required);
    }

    #[test]
    fn test_tech_height_on_clear_line_counts_as_move() {
        // The line at 26' already clears the proposal, but a directed move to
        // 24' is still a move: required, costed, and in the total
        let mut input = baseline_input();
        input.existing_lines = vec![ExistingLine {
            company: "Acme Telecom".to_string(),
            line_type: LineKind::Communication,
            voltage: None,
            height: "26'".to_string(),
            make_ready: true,
            make_ready_height: Some("24'".to_string()),
        }];
        let report = compute_analysis(&input).unwrap();
        let item = &report.make_ready[0];
        assert!(item.required);
        assert_eq!(item.adjustment_in, 24.0);
        assert_eq!(item.recommended_height_ft, 24.0);
        assert!(report.total_cost >= 350.0 + item.estimated_cost);
        assert!(report.notes.iter().any(|n| n.contains("move Acme Telecom")));
    }

    #[test]
    fn test_guying_included_on_request() {
        let mut input = baseline_input();
        input.include_guying = true;
        input.pull_direction_deg = Some(135.0);
        let report = compute_analysis(&input).unwrap();
        let guy = report.guy.unwrap();
        assert!(guy.tension_lb.is_finite());
        assert_eq!(guy.pull_direction_deg, Some(135.0));
    }

    #[test]
    fn test_guying_without_span_is_skipped() {
        let mut input = baseline_input();
        input.include_guying = true;
        input.span_length_ft = None;
        let report = compute_analysis(&input).unwrap();
        assert!(report.guy.is_none());
        assert!(report.warnings.iter().any(|w| w.contains("Guying requested")));
    }

    #[test]
    fn test_surcharges() {
        let mut input = baseline_input();
        input.has_transformer = true;
        input.span_length_ft = Some(350.0);
        let report = compute_analysis(&input).unwrap();
        assert!(report.total_cost >= 350.0 + 500.0 + 250.0);
        assert!(report.notes.iter().any(|n| n.contains("Transformer")));
        assert!(report.notes.iter().any(|n| n.contains("Long span")));
    }

    #[test]
    fn test_non_finite_optionals_fall_back() {
        let mut input = baseline_input();
        input.wind_speed_mph = Some(f64::NAN);
        input.ice_thickness_in = Some(f64::INFINITY);
        input.span_length_ft = Some(f64::NAN);
        let report = compute_analysis(&input).unwrap();
        assert!(report.span.is_none());
        assert!(report.total_cost.is_finite());
    }

    #[test]
    fn test_preset_flows_into_report() {
        let mut input = baseline_input();
        input.preset = Some("duke-energy".to_string());
        let report = compute_analysis(&input).unwrap();
        assert_eq!(report.clearances.comm_to_supply_in, 44.0);
    }

    #[test]
    fn test_report_serialization() {
        let report = compute_analysis(&baseline_input()).unwrap();
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("proposed_attach_ft"));
        let roundtrip: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, roundtrip);
    }

    /// Every numeric leaf of a report must be finite
    fn assert_finite_report(report: &AnalysisReport) {
        assert!(report.pole.buried_ft.is_finite());
        assert!(report.pole.above_ground_ft.is_finite());
        assert!(report.proposed_attach_ft.is_finite());
        assert!(report.controlling.required_ft.is_finite());
        if let Some(span) = &report.span {
            assert!(span.sag_ft.is_finite());
            assert!(span.midspan_ft.is_finite());
        }
        if let Some(guy) = &report.guy {
            assert!(guy.tension_lb.is_finite());
            assert!(guy.lead_distance_ft.is_finite());
            assert!(guy.total_cost.is_finite());
        }
        for item in &report.make_ready {
            assert!(item.adjustment_in.is_finite());
            assert!(item.recommended_height_ft.is_finite());
            assert!(item.estimated_cost.is_finite());
        }
        assert!(report.total_cost.is_finite());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn prop_realistic_inputs_never_panic(
            pole_height in 20.0..90.0f64,
            power_height in 15.0..60.0f64,
            span in 50.0..400.0f64,
            wind in 40.0..120.0f64,
            ice in 0.0..1.0f64,
            include_guying in proptest::bool::ANY,
            has_transformer in proptest::bool::ANY,
            voltage_idx in 0usize..3,
            env_idx in 0usize..13,
            line_height in 5.0..60.0f64,
            flag_line in proptest::bool::ANY,
        ) {
            let input = AnalysisInput {
                pole_height: format!("{pole_height:.1}"),
                pole_class: "Class 4".to_string(),
                construction: ConstructionType::Existing,
                existing_power_height: format!("{power_height:.1}"),
                voltage: Voltage::ALL[voltage_idx],
                environment: Environment::ALL[env_idx],
                span_length_ft: Some(span),
                wind_speed_mph: Some(wind),
                ice_thickness_in: Some(ice),
                include_guying,
                has_transformer,
                existing_lines: vec![ExistingLine {
                    company: "Attacher".to_string(),
                    line_type: LineKind::Communication,
                    voltage: None,
                    height: format!("{line_height:.1}"),
                    make_ready: flag_line,
                    make_ready_height: None,
                }],
                ..Default::default()
            };

            let report = compute_analysis(&input).unwrap();
            assert_finite_report(&report);
        }
    }
}
