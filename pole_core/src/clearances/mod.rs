//! # Clearance Resolution
//!
//! Builds the effective clearance profile for one analysis by layering three
//! sources, lowest precedence first:
//!
//! 1. the code baseline table ([`nesc`]),
//! 2. a named utility preset ([`presets`]),
//! 3. explicit job-level numeric overrides ([`ClearanceOverrides`]).
//!
//! A later layer only replaces a value it actually supplies; blank or
//! non-finite overrides fall through to the layer below. The profile is
//! constructed fresh per analysis call and never persisted by the engine.
//!
//! ## Example
//!
//! ```rust
//! use pole_core::clearances::{resolve_clearances, ClearanceOverrides, Environment, Voltage};
//!
//! let profile = resolve_clearances(
//!     Voltage::Distribution,
//!     Environment::Road,
//!     Some("duke-energy"),
//!     &ClearanceOverrides::default(),
//! );
//! assert_eq!(profile.comm_to_supply_in, 44.0); // preset tightened from 40.0
//! ```

pub mod nesc;
pub mod presets;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use nesc::{Environment, Voltage};
pub use presets::{lookup_preset, preset_keys, UtilityPreset};

/// The effective clearance profile for one analysis.
///
/// Carries every environment target, not just the selected one, because the
/// orchestrator later compares several candidates when arbitrating the
/// controlling clearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearanceProfile {
    /// Supply voltage class the profile was resolved for
    pub voltage: Voltage,
    /// Primary environment category under the span
    pub environment: Environment,
    /// Ground clearance target for the primary environment (ft)
    pub ground_clearance_ft: f64,
    /// Clearance over roads subject to truck traffic (ft)
    pub road_clearance_ft: f64,
    /// Minimum working space below the pole top (ft)
    pub pole_top_space_ft: f64,
    /// Separation below supply facilities of the job's own voltage tier (in)
    pub comm_to_supply_in: f64,
    /// Separation between competing communication attachments (in)
    pub comm_to_comm_in: f64,
    /// Separation in inches per supply voltage tier; lines of a tier other
    /// than the job's are evaluated against their own entry
    pub separation_in: BTreeMap<Voltage, f64>,
    /// Ground clearance target per environment category (ft)
    pub environment_ft: BTreeMap<Environment, f64>,
}

impl ClearanceProfile {
    /// Ground clearance target for an arbitrary environment, falling back to
    /// the primary target when the category is somehow absent.
    pub fn target_for(&self, environment: Environment) -> f64 {
        self.environment_ft
            .get(&environment)
            .copied()
            .unwrap_or(self.ground_clearance_ft)
    }

    /// Separation below a supply facility of an arbitrary voltage tier,
    /// falling back to the job tier's separation when the tier is somehow
    /// absent.
    pub fn separation_for(&self, voltage: Voltage) -> f64 {
        self.separation_in
            .get(&voltage)
            .copied()
            .unwrap_or(self.comm_to_supply_in)
    }
}

/// Job-level clearance overrides, highest precedence in the layering.
///
/// Each field defaults to `None` ("inherit"). A supplied value only takes
/// effect when it is finite; `NaN`/infinities from upstream form parsing are
/// ignored rather than propagated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearanceOverrides {
    /// Ground clearance for the primary environment (ft)
    #[serde(default)]
    pub ground_clearance_ft: Option<f64>,
    /// Road clearance (ft)
    #[serde(default)]
    pub road_clearance_ft: Option<f64>,
    /// Minimum pole-top space (ft)
    #[serde(default)]
    pub pole_top_space_ft: Option<f64>,
    /// Communication-to-supply separation (in)
    #[serde(default)]
    pub comm_to_supply_in: Option<f64>,
    /// Communication-to-communication separation (in)
    #[serde(default)]
    pub comm_to_comm_in: Option<f64>,
}

/// Apply an override slot on top of the current value.
///
/// `None` and non-finite values inherit; only a finite number wins.
fn layer(current: f64, override_value: Option<f64>) -> f64 {
    match override_value {
        Some(v) if v.is_finite() => v,
        _ => current,
    }
}

/// Build the code-baseline clearance profile for a voltage class and primary
/// environment. All environment targets are populated.
pub fn nesc_clearances(voltage: Voltage, environment: Environment) -> ClearanceProfile {
    let environment_ft: BTreeMap<Environment, f64> = Environment::ALL
        .into_iter()
        .map(|env| (env, nesc::ground_clearance_ft(voltage, env)))
        .collect();
    let separation_in: BTreeMap<Voltage, f64> = Voltage::ALL
        .into_iter()
        .map(|tier| (tier, nesc::comm_separation_in(tier)))
        .collect();

    ClearanceProfile {
        voltage,
        environment,
        ground_clearance_ft: environment_ft[&environment],
        road_clearance_ft: environment_ft[&Environment::Road],
        pole_top_space_ft: nesc::pole_top_space_ft(voltage),
        comm_to_supply_in: separation_in[&voltage],
        comm_to_comm_in: separation_in[&Voltage::Communication],
        separation_in,
        environment_ft,
    }
}

/// Overlay a named preset onto a profile. Unknown keys leave the profile
/// untouched; presets are advisory conventions, not code.
pub fn apply_preset(profile: ClearanceProfile, preset_key: &str) -> ClearanceProfile {
    match lookup_preset(preset_key) {
        Some(preset) => apply_preset_object(profile, preset),
        None => profile,
    }
}

/// Overlay an explicit preset object onto a profile.
///
/// Only the keys the preset supplies override the baseline; absent keys
/// inherit.
pub fn apply_preset_object(mut profile: ClearanceProfile, preset: &UtilityPreset) -> ClearanceProfile {
    for (&tier, &sep) in &preset.separation_in {
        profile.separation_in.insert(tier, sep);
    }
    // Keep the derived slots consistent with the per-tier table
    profile.comm_to_supply_in = profile.separation_in[&profile.voltage];
    profile.comm_to_comm_in = profile.separation_in[&Voltage::Communication];
    profile.pole_top_space_ft = layer(profile.pole_top_space_ft, preset.pole_top_space_ft);
    profile.road_clearance_ft = layer(profile.road_clearance_ft, preset.road_clearance_ft);
    for (&env, &target) in &preset.environment_ft {
        profile.environment_ft.insert(env, target);
    }
    // Keep the derived slots consistent with the per-environment table
    profile.ground_clearance_ft = profile.environment_ft[&profile.environment];
    if let Some(&road) = preset.environment_ft.get(&Environment::Road) {
        profile.road_clearance_ft = layer(road, preset.road_clearance_ft);
    }
    profile
}

/// Apply job-level numeric overrides, the highest-precedence layer.
pub fn apply_overrides(
    mut profile: ClearanceProfile,
    overrides: &ClearanceOverrides,
) -> ClearanceProfile {
    profile.ground_clearance_ft = layer(profile.ground_clearance_ft, overrides.ground_clearance_ft);
    profile.road_clearance_ft = layer(profile.road_clearance_ft, overrides.road_clearance_ft);
    profile.pole_top_space_ft = layer(profile.pole_top_space_ft, overrides.pole_top_space_ft);
    profile.comm_to_supply_in = layer(profile.comm_to_supply_in, overrides.comm_to_supply_in);
    profile.comm_to_comm_in = layer(profile.comm_to_comm_in, overrides.comm_to_comm_in);
    if let Some(sep) = overrides.comm_to_supply_in.filter(|v| v.is_finite()) {
        profile.separation_in.insert(profile.voltage, sep);
    }
    if let Some(sep) = overrides.comm_to_comm_in.filter(|v| v.is_finite()) {
        profile.separation_in.insert(Voltage::Communication, sep);
    }
    if let Some(ground) = overrides.ground_clearance_ft.filter(|v| v.is_finite()) {
        profile.environment_ft.insert(profile.environment, ground);
    }
    profile
}

/// Resolve the effective clearance profile: baseline, then preset, then
/// job overrides.
pub fn resolve_clearances(
    voltage: Voltage,
    environment: Environment,
    preset_key: Option<&str>,
    overrides: &ClearanceOverrides,
) -> ClearanceProfile {
    let mut profile = nesc_clearances(voltage, environment);
    if let Some(key) = preset_key {
        profile = apply_preset(profile, key);
    }
    apply_overrides(profile, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_carries_all_environments() {
        let profile = nesc_clearances(Voltage::Distribution, Environment::Road);
        assert_eq!(profile.environment_ft.len(), Environment::ALL.len());
        assert_eq!(profile.ground_clearance_ft, 18.5);
        assert_eq!(profile.road_clearance_ft, 18.5);
    }

    #[test]
    fn test_baseline_carries_all_separation_tiers() {
        let profile = nesc_clearances(Voltage::Distribution, Environment::Road);
        assert_eq!(profile.separation_in.len(), Voltage::ALL.len());
        assert_eq!(profile.separation_for(Voltage::Communication), 12.0);
        assert_eq!(profile.separation_for(Voltage::Distribution), 40.0);
        assert_eq!(profile.separation_for(Voltage::Transmission), 60.0);
        assert_eq!(profile.comm_to_supply_in, 40.0);
    }

    #[test]
    fn test_preset_keeps_other_tier_separations() {
        // Duke tightens both distribution and transmission; a distribution
        // job must still carry the transmission entry for existing lines of
        // that tier
        let profile = nesc_clearances(Voltage::Distribution, Environment::Road);
        let profile = apply_preset(profile, "duke-energy");
        assert_eq!(profile.comm_to_supply_in, 44.0);
        assert_eq!(profile.separation_for(Voltage::Distribution), 44.0);
        assert_eq!(profile.separation_for(Voltage::Transmission), 72.0);
        assert_eq!(profile.separation_for(Voltage::Communication), 12.0);
    }

    #[test]
    fn test_separation_override_updates_tier_table() {
        let overrides = ClearanceOverrides {
            comm_to_supply_in: Some(50.0),
            comm_to_comm_in: Some(14.0),
            ..Default::default()
        };
        let profile =
            resolve_clearances(Voltage::Distribution, Environment::Road, None, &overrides);
        assert_eq!(profile.comm_to_supply_in, 50.0);
        assert_eq!(profile.separation_for(Voltage::Distribution), 50.0);
        assert_eq!(profile.separation_for(Voltage::Communication), 14.0);
        // Tiers the override does not touch inherit the baseline
        assert_eq!(profile.separation_for(Voltage::Transmission), 60.0);
    }

    #[test]
    fn test_preset_overrides_baseline() {
        let profile = nesc_clearances(Voltage::Distribution, Environment::Road);
        let profile = apply_preset(profile, "duke-energy");
        assert_eq!(profile.comm_to_supply_in, 44.0);
        assert_eq!(profile.road_clearance_ft, 20.0);
        assert_eq!(profile.ground_clearance_ft, 20.0);
        // Keys the preset does not supply inherit the baseline
        assert_eq!(
            profile.environment_ft[&Environment::Railroad],
            nesc::ground_clearance_ft(Voltage::Distribution, Environment::Railroad)
        );
    }

    #[test]
    fn test_unknown_preset_is_baseline() {
        let baseline = nesc_clearances(Voltage::Distribution, Environment::Road);
        let applied = apply_preset(baseline.clone(), "podunk-power");
        assert_eq!(baseline, applied);
    }

    #[test]
    fn test_override_precedence_chain() {
        // baseline=18, preset=20, override=22 for the same key
        let mut baseline = nesc_clearances(Voltage::Distribution, Environment::Road);
        baseline.road_clearance_ft = 18.0;

        let preset = UtilityPreset {
            name: "Test Utility".to_string(),
            road_clearance_ft: Some(20.0),
            ..Default::default()
        };
        let overrides = ClearanceOverrides {
            road_clearance_ft: Some(22.0),
            ..Default::default()
        };

        let with_all = apply_overrides(
            apply_preset_object(baseline.clone(), &preset),
            &overrides,
        );
        assert_eq!(with_all.road_clearance_ft, 22.0);

        let without_override = apply_preset_object(baseline.clone(), &preset);
        assert_eq!(without_override.road_clearance_ft, 20.0);

        assert_eq!(baseline.road_clearance_ft, 18.0);
    }

    #[test]
    fn test_non_finite_override_falls_through() {
        let profile = nesc_clearances(Voltage::Distribution, Environment::Road);
        let overrides = ClearanceOverrides {
            comm_to_supply_in: Some(f64::NAN),
            pole_top_space_ft: Some(f64::INFINITY),
            ..Default::default()
        };
        let applied = apply_overrides(profile.clone(), &overrides);
        assert_eq!(applied.comm_to_supply_in, profile.comm_to_supply_in);
        assert_eq!(applied.pole_top_space_ft, profile.pole_top_space_ft);
    }

    #[test]
    fn test_ground_override_updates_environment_table() {
        let overrides = ClearanceOverrides {
            ground_clearance_ft: Some(21.0),
            ..Default::default()
        };
        let profile =
            resolve_clearances(Voltage::Distribution, Environment::Field, None, &overrides);
        assert_eq!(profile.ground_clearance_ft, 21.0);
        assert_eq!(profile.environment_ft[&Environment::Field], 21.0);
    }

    #[test]
    fn test_target_for_falls_back() {
        let profile = nesc_clearances(Voltage::Communication, Environment::Pedestrian);
        assert_eq!(profile.target_for(Environment::Railroad), 23.5);
    }

    #[test]
    fn test_profile_serialization() {
        let profile = resolve_clearances(
            Voltage::Distribution,
            Environment::Road,
            Some("national-grid"),
            &ClearanceOverrides::default(),
        );
        let json = serde_json::to_string(&profile).unwrap();
        let roundtrip: ClearanceProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, roundtrip);
    }
}
