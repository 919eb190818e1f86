//! Make-Ready Assessment
//!
//! Determines whether an existing line must be relocated to clear a proposed
//! attachment, by how much, and at what cost. Separation is always evaluated
//! as an absolute vertical distance; the conflicting line is pushed away from
//! the proposed attachment, never through it.

use serde::{Deserialize, Serialize};

/// Relocation cost per inch of adjustment ($/in)
pub const MAKE_READY_COST_PER_IN: f64 = 15.0;

/// Make-ready determination for one existing line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeReadyItem {
    /// True when the existing line must move
    pub required: bool,
    /// Magnitude of the move, rounded to the nearest inch
    pub adjustment_in: f64,
    /// Recommended new height for the existing line (ft)
    pub recommended_height_ft: f64,
    /// Relocation cost estimate ($)
    pub estimated_cost: f64,
}

/// Assess whether an existing line conflicts with a proposed attachment.
///
/// `required` when the absolute vertical distance between the two is less
/// than `min_separation_ft`. The recommended height repositions the existing
/// line on its own side of the proposed attachment, exactly the minimum
/// separation away; a line at the same height as the proposal moves up.
///
/// # Example
///
/// ```rust
/// use pole_core::calculations::make_ready::analyze_make_ready_impact;
///
/// // Existing comm at 21.0 ft, proposal at 20.0 ft, 40 in required
/// let item = analyze_make_ready_impact(21.0, 20.0, 40.0 / 12.0);
/// assert!(item.required);
/// assert_eq!(item.adjustment_in, 28.0);
/// ```
pub fn analyze_make_ready_impact(
    existing_height_ft: f64,
    proposed_height_ft: f64,
    min_separation_ft: f64,
) -> MakeReadyItem {
    let gap_ft = (existing_height_ft - proposed_height_ft).abs();

    if gap_ft >= min_separation_ft {
        return MakeReadyItem {
            required: false,
            adjustment_in: 0.0,
            recommended_height_ft: existing_height_ft,
            estimated_cost: 0.0,
        };
    }

    let shortfall_ft = min_separation_ft - gap_ft;
    let adjustment_in = (shortfall_ft * 12.0).round();

    // Move away from the proposal on the side the line already occupies
    let recommended_height_ft = if existing_height_ft >= proposed_height_ft {
        proposed_height_ft + min_separation_ft
    } else {
        proposed_height_ft - min_separation_ft
    };

    MakeReadyItem {
        required: true,
        adjustment_in,
        recommended_height_ft,
        estimated_cost: adjustment_in * MAKE_READY_COST_PER_IN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_no_conflict() {
        let item = analyze_make_ready_impact(30.0, 20.0, 40.0 / 12.0);
        assert!(!item.required);
        assert_eq!(item.adjustment_in, 0.0);
        assert_eq!(item.recommended_height_ft, 30.0);
        assert_eq!(item.estimated_cost, 0.0);
    }

    #[test]
    fn test_conflict_above_moves_up() {
        let sep = 40.0 / 12.0;
        let item = analyze_make_ready_impact(21.0, 20.0, sep);
        assert!(item.required);
        assert_abs_diff_eq!(item.recommended_height_ft, 20.0 + sep, epsilon = 1e-12);
        // Shortfall is 40 - 12 = 28 in
        assert_eq!(item.adjustment_in, 28.0);
        assert_eq!(item.estimated_cost, 28.0 * MAKE_READY_COST_PER_IN);
    }

    #[test]
    fn test_conflict_below_moves_down() {
        let item = analyze_make_ready_impact(19.5, 20.0, 1.0);
        assert!(item.required);
        assert_abs_diff_eq!(item.recommended_height_ft, 19.0, epsilon = 1e-12);
        assert_eq!(item.adjustment_in, 6.0);
    }

    #[test]
    fn test_same_height_moves_up() {
        let item = analyze_make_ready_impact(20.0, 20.0, 1.0);
        assert!(item.required);
        assert_abs_diff_eq!(item.recommended_height_ft, 21.0, epsilon = 1e-12);
        assert_eq!(item.adjustment_in, 12.0);
    }

    #[test]
    fn test_exact_separation_is_compliant() {
        let item = analyze_make_ready_impact(23.0, 20.0, 3.0);
        assert!(!item.required);
    }

    #[test]
    fn test_order_of_arguments_is_symmetric() {
        // Separation is an absolute distance, whichever line the inputs
        // represent
        let a = analyze_make_ready_impact(21.0, 20.0, 2.0);
        let b = analyze_make_ready_impact(20.0, 21.0, 2.0);
        assert_eq!(a.required, b.required);
        assert_eq!(a.adjustment_in, b.adjustment_in);
    }

    proptest! {
        #[test]
        fn prop_recommended_height_clears_separation(
            existing in 5.0..40.0f64,
            proposed in 5.0..40.0f64,
            sep in 0.5..5.0f64,
        ) {
            let item = analyze_make_ready_impact(existing, proposed, sep);
            if item.required {
                let gap = (item.recommended_height_ft - proposed).abs();
                prop_assert!(gap >= sep - 1e-9);
            }
        }

        #[test]
        fn prop_cost_proportional_to_adjustment(
            existing in 5.0..40.0f64,
            proposed in 5.0..40.0f64,
            sep in 0.5..5.0f64,
        ) {
            let item = analyze_make_ready_impact(existing, proposed, sep);
            prop_assert!(
                (item.estimated_cost - item.adjustment_in * MAKE_READY_COST_PER_IN).abs() < 1e-9
            );
        }
    }
}
