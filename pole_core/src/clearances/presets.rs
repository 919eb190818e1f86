//! Utility Clearance Presets
//!
//! Named sets of utility-specific clearance conventions layered over the code
//! baseline. A preset only carries the keys the utility actually tightens;
//! absent keys inherit the baseline. Presets are advisory conventions, not
//! code, so an unknown preset key resolves to "no preset" rather than an
//! error.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::nesc::{Environment, Voltage};

/// A named utility's clearance conventions.
///
/// Every field is optional; `None` means "inherit the baseline".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilityPreset {
    /// Utility display name
    pub name: String,
    /// Communication-to-supply separation in inches, per supply voltage class
    #[serde(default)]
    pub separation_in: BTreeMap<Voltage, f64>,
    /// Minimum pole-top space in feet
    #[serde(default)]
    pub pole_top_space_ft: Option<f64>,
    /// Road clearance in feet
    #[serde(default)]
    pub road_clearance_ft: Option<f64>,
    /// Ground clearance targets in feet, per environment category
    #[serde(default)]
    pub environment_ft: BTreeMap<Environment, f64>,
}

/// Static registry of named utility presets, keyed by preset key.
///
/// Read-only, initialized once. Keys are lowercase kebab-case.
static PRESETS: Lazy<HashMap<&'static str, UtilityPreset>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Duke Energy: 44 in to supply, 20 ft over roads
    map.insert(
        "duke-energy",
        UtilityPreset {
            name: "Duke Energy".to_string(),
            separation_in: BTreeMap::from([
                (Voltage::Distribution, 44.0),
                (Voltage::Transmission, 72.0),
            ]),
            pole_top_space_ft: Some(4.0),
            road_clearance_ft: Some(20.0),
            environment_ft: BTreeMap::from([(Environment::Road, 20.0)]),
        },
    );

    // AEP: holds the code separation but raises highway targets
    map.insert(
        "aep",
        UtilityPreset {
            name: "American Electric Power".to_string(),
            separation_in: BTreeMap::from([(Voltage::Distribution, 40.0)]),
            pole_top_space_ft: Some(4.5),
            road_clearance_ft: Some(19.0),
            environment_ft: BTreeMap::from([
                (Environment::Highway, 20.0),
                (Environment::DividedHighway, 20.0),
            ]),
        },
    );

    // Dominion: 42 in to supply, extra pole-top working space
    map.insert(
        "dominion",
        UtilityPreset {
            name: "Dominion Energy".to_string(),
            separation_in: BTreeMap::from([
                (Voltage::Distribution, 42.0),
                (Voltage::Transmission, 66.0),
            ]),
            pole_top_space_ft: Some(5.0),
            road_clearance_ft: None,
            environment_ft: BTreeMap::new(),
        },
    );

    // National Grid: conservative across the board
    map.insert(
        "national-grid",
        UtilityPreset {
            name: "National Grid".to_string(),
            separation_in: BTreeMap::from([
                (Voltage::Communication, 16.0),
                (Voltage::Distribution, 44.0),
            ]),
            pole_top_space_ft: Some(4.0),
            road_clearance_ft: Some(20.0),
            environment_ft: BTreeMap::from([
                (Environment::Road, 20.0),
                (Environment::Residential, 19.0),
            ]),
        },
    );

    map
});

/// Look up a preset by key. Unknown keys return `None`; callers treat that
/// as "baseline only".
pub fn lookup_preset(key: &str) -> Option<&'static UtilityPreset> {
    PRESETS.get(key.trim().to_lowercase().as_str())
}

/// All registered preset keys, for UI selection
pub fn preset_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = PRESETS.keys().copied().collect();
    keys.sort_unstable();
    keys
}
