//! NESC Baseline Clearance Table
//!
//! Vertical clearance targets in the shape of NESC Rule 232 (clearance of
//! wires above ground) and Rule 235 (separation between supply and
//! communication facilities). Values are the adopted code baseline; utility
//! presets and job-level overrides layer on top of these, never the other
//! way around.

use serde::{Deserialize, Serialize};

/// Voltage class of the facility being attached or cleared against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Voltage {
    /// Communication facilities (cables, strand, drops)
    Communication,
    /// Supply up to 22 kV phase-to-ground (typical distribution)
    Distribution,
    /// Supply above 22 kV (transmission underbuild)
    Transmission,
}

impl Voltage {
    /// All voltage classes for UI selection
    pub const ALL: [Voltage; 3] = [
        Voltage::Communication,
        Voltage::Distribution,
        Voltage::Transmission,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Voltage::Communication => "Communication",
            Voltage::Distribution => "Distribution (≤22 kV)",
            Voltage::Transmission => "Transmission (>22 kV)",
        }
    }
}

impl Default for Voltage {
    fn default() -> Self {
        Voltage::Distribution
    }
}

impl std::fmt::Display for Voltage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Ground-surface category under the span, per NESC Table 232-1 rows
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Roads, streets and alleys subject to truck traffic
    Road,
    /// Residential streets
    Residential,
    /// Spaces accessible to pedestrians only
    Pedestrian,
    /// Cultivated fields, pasture, orchards (rideable vehicles)
    Field,
    /// Residential yards and lawns
    Yard,
    /// Commercial driveways and parking lots
    Driveway,
    /// Residential driveways
    ResidentialDriveway,
    /// Water areas not suitable for sailboating
    Waterway,
    /// State highways
    Highway,
    /// Divided highways
    DividedHighway,
    /// Interstate mainline
    Interstate,
    /// Interstate crossings and ramps
    InterstateCrossing,
    /// Railroad tracks (from top of rail)
    Railroad,
}

impl Environment {
    /// All environment categories, in table order
    pub const ALL: [Environment; 13] = [
        Environment::Road,
        Environment::Residential,
        Environment::Pedestrian,
        Environment::Field,
        Environment::Yard,
        Environment::Driveway,
        Environment::ResidentialDriveway,
        Environment::Waterway,
        Environment::Highway,
        Environment::DividedHighway,
        Environment::Interstate,
        Environment::InterstateCrossing,
        Environment::Railroad,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Environment::Road => "Road (truck traffic)",
            Environment::Residential => "Residential street",
            Environment::Pedestrian => "Pedestrian only",
            Environment::Field => "Field / agricultural",
            Environment::Yard => "Yard / lawn",
            Environment::Driveway => "Commercial driveway",
            Environment::ResidentialDriveway => "Residential driveway",
            Environment::Waterway => "Waterway",
            Environment::Highway => "Highway",
            Environment::DividedHighway => "Divided highway",
            Environment::Interstate => "Interstate",
            Environment::InterstateCrossing => "Interstate crossing",
            Environment::Railroad => "Railroad crossing",
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Road
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Baseline ground clearance target in feet for a voltage class over an
/// environment category.
///
/// Communication values track NESC Table 232-1 column 2; distribution adds
/// the supply increment; transmission carries a further 2.5 ft allowance for
/// the voltage adder above 22 kV.
pub fn ground_clearance_ft(voltage: Voltage, environment: Environment) -> f64 {
    let communication = match environment {
        Environment::Road => 15.5,
        Environment::Residential => 15.5,
        Environment::Pedestrian => 9.5,
        Environment::Field => 15.5,
        Environment::Yard => 9.5,
        Environment::Driveway => 15.5,
        Environment::ResidentialDriveway => 11.5,
        Environment::Waterway => 14.0,
        Environment::Highway => 18.0,
        Environment::DividedHighway => 18.0,
        Environment::Interstate => 18.0,
        Environment::InterstateCrossing => 21.0,
        Environment::Railroad => 23.5,
    };
    match voltage {
        Voltage::Communication => communication,
        Voltage::Distribution => communication + 3.0,
        Voltage::Transmission => communication + 5.5,
    }
}

/// Baseline minimum pole-top space in feet for the highest facility of a
/// voltage class (working space below the pole top).
pub fn pole_top_space_ft(voltage: Voltage) -> f64 {
    match voltage {
        Voltage::Communication => 2.0,
        Voltage::Distribution => 4.0,
        Voltage::Transmission => 6.0,
    }
}

/// Baseline vertical separation in inches between a communication attachment
/// and a supply facility of the given voltage class (NESC Rule 235C shape).
///
/// Communication-to-communication separation is 12 in between competing
/// attachers.
pub fn comm_separation_in(voltage: Voltage) -> f64 {
    match voltage {
        Voltage::Communication => 12.0,
        Voltage::Distribution => 40.0,
        Voltage::Transmission => 60.0,
    }
}
