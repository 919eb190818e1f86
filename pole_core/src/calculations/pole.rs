//! Pole Geometry
//!
//! Burial depth and above-ground height derivation for wood poles, plus the
//! ANSI O5.1 class table used for class descriptions and recommendations.
//!
//! Burial follows the conventional setting rule "10% of length + 2 ft",
//! floored at a minimum setting depth. The class table is a lookup of nominal
//! horizontal (tip) load ratings; no fiber-stress physics beyond that.

use serde::{Deserialize, Serialize};

/// Minimum setting depth regardless of pole length (ft)
pub const MIN_SETTING_DEPTH_FT: f64 = 5.0;

/// ANSI O5.1 pole classes with nominal horizontal load ratings (lb),
/// strongest first so recommendation picks the lightest adequate class.
const POLE_CLASSES: [(&str, f64); 9] = [
    ("Class 7", 1200.0),
    ("Class 6", 1500.0),
    ("Class 5", 1900.0),
    ("Class 4", 2400.0),
    ("Class 3", 3000.0),
    ("Class 2", 3700.0),
    ("Class 1", 4500.0),
    ("Class H1", 5400.0),
    ("Class H2", 6400.0),
];

/// Derived pole geometry for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoleGeometry {
    /// Total pole length as entered (ft)
    pub input_height_ft: f64,
    /// Setting (buried) depth (ft)
    pub buried_ft: f64,
    /// Height remaining above grade (ft); non-positive for pathologically
    /// short poles, which the orchestrator reports as a warning
    pub above_ground_ft: f64,
    /// Class descriptor for the entered class
    pub class_label: String,
    /// Class recommendation for the class's own nominal rating (UI hint)
    pub recommended_class_label: String,
}

/// Nominal horizontal load rating for a class label, if recognized.
///
/// Tolerates "3", "C3", "Class 3", "class-3", "H1" and similar field
/// spellings.
pub fn class_rating_lb(class_label: &str) -> Option<f64> {
    let token = class_label
        .trim()
        .to_uppercase()
        .replace("CLASS", "")
        .replace(['-', '_', ' ', 'C'], "");
    POLE_CLASSES
        .iter()
        .find(|(name, _)| name.trim_start_matches("Class ").eq_ignore_ascii_case(&token))
        .map(|(_, rating)| *rating)
}

/// Recommend the lightest class whose nominal rating meets the required
/// horizontal load. Loads beyond Class H2 get H2 (the heaviest tabulated).
pub fn recommend_class(required_load_lb: f64) -> &'static str {
    for (name, rating) in POLE_CLASSES {
        if rating >= required_load_lb {
            return name;
        }
    }
    POLE_CLASSES[POLE_CLASSES.len() - 1].0
}

/// Derive burial depth and above-ground height for a pole.
///
/// Never errors: a pathologically short pole yields a non-positive
/// `above_ground_ft`, which the orchestrator turns into a warning.
///
/// # Example
///
/// ```rust
/// use pole_core::calculations::pole::pole_burial_data;
///
/// let geometry = pole_burial_data(45.0, "Class 3");
/// assert_eq!(geometry.buried_ft, 6.5); // 10% + 2 ft
/// assert_eq!(geometry.above_ground_ft, 38.5);
/// ```
pub fn pole_burial_data(total_height_ft: f64, class_label: &str) -> PoleGeometry {
    let rule_depth = total_height_ft * 0.10 + 2.0;
    let buried_ft = rule_depth.max(MIN_SETTING_DEPTH_FT);
    let above_ground_ft = total_height_ft - buried_ft;

    let (class_desc, recommended) = match class_rating_lb(class_label) {
        Some(rating) => (
            format!("{} ({:.0} lb nominal tip load)", normalize_class_label(class_label), rating),
            recommend_class(rating),
        ),
        None => (
            format!("{} (unrecognized class)", class_label.trim()),
            recommend_class(0.0),
        ),
    };

    PoleGeometry {
        input_height_ft: total_height_ft,
        buried_ft,
        above_ground_ft,
        class_label: class_desc,
        recommended_class_label: recommended.to_string(),
    }
}

/// Canonical "Class N" form of a recognized class label
fn normalize_class_label(class_label: &str) -> String {
    let token = class_label
        .trim()
        .to_uppercase()
        .replace("CLASS", "")
        .replace(['-', '_', ' ', 'C'], "");
    format!("Class {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_burial_rule() {
        let geometry = pole_burial_data(40.0, "Class 4");
        assert_abs_diff_eq!(geometry.buried_ft, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(geometry.above_ground_ft, 34.0, epsilon = 1e-12);
    }

    #[test]
    fn test_minimum_setting_depth() {
        // 10% + 2 of a 25 ft pole is 4.5 ft, below the 5 ft floor
        let geometry = pole_burial_data(25.0, "Class 6");
        assert_eq!(geometry.buried_ft, MIN_SETTING_DEPTH_FT);
        assert_eq!(geometry.above_ground_ft, 20.0);
    }

    #[test]
    fn test_short_pole_does_not_panic() {
        let geometry = pole_burial_data(4.0, "Class 7");
        assert!(geometry.above_ground_ft <= 0.0);
    }

    #[test]
    fn test_class_rating_spellings() {
        assert_eq!(class_rating_lb("Class 3"), Some(3000.0));
        assert_eq!(class_rating_lb("3"), Some(3000.0));
        assert_eq!(class_rating_lb("c3"), Some(3000.0));
        assert_eq!(class_rating_lb("class-h1"), Some(5400.0));
        assert_eq!(class_rating_lb("Class 9"), None);
    }

    #[test]
    fn test_recommend_class_picks_lightest_adequate() {
        assert_eq!(recommend_class(1000.0), "Class 7");
        assert_eq!(recommend_class(1900.0), "Class 5");
        assert_eq!(recommend_class(2000.0), "Class 4");
        assert_eq!(recommend_class(5000.0), "Class H1");
        assert_eq!(recommend_class(99_999.0), "Class H2");
    }

    #[test]
    fn test_unrecognized_class_still_returns() {
        let geometry = pole_burial_data(45.0, "mystery");
        assert!(geometry.class_label.contains("unrecognized"));
        assert_eq!(geometry.recommended_class_label, "Class 7");
    }

    #[test]
    fn test_serialization() {
        let geometry = pole_burial_data(45.0, "Class 3");
        let json = serde_json::to_string(&geometry).unwrap();
        let roundtrip: PoleGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(geometry, roundtrip);
    }
}
