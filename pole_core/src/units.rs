//! # Unit Types & Measurement Codec
//!
//! Type-safe wrappers for the engineering units used in attachment work,
//! plus the parser/formatter for the mixed feet-and-inches measurement
//! strings found on field collection sheets ("18' 6\"", "18ft 6in", "18.5").
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Attachment engineering uses a small, consistent set of US customary units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Example
//!
//! ```rust
//! use pole_core::units::{parse_feet, format_feet_inches, Feet, Inches, MeasurementStyle};
//!
//! let height = parse_feet("18' 6\"").unwrap();
//! assert_eq!(height, 18.5);
//! assert_eq!(format_feet_inches(height, MeasurementStyle::Verbose), "18ft 6in");
//!
//! let span = Feet(12.0);
//! let span_inches: Inches = span.into();
//! assert_eq!(span_inches.0, 144.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Linear weight in pounds per linear foot
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoundsPerFoot(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Pounds);
impl_arithmetic!(PoundsPerFoot);

// ============================================================================
// Measurement Codec
// ============================================================================

/// Presentation variant for [`format_feet_inches`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementStyle {
    /// Tick-mark notation: `18' 6"`
    TickMarks,
    /// Word-suffix notation: `18ft 6in`
    Verbose,
}

/// Parse a free-form height measurement into decimal feet.
///
/// Accepted forms (whitespace-tolerant, case-insensitive):
/// - Bare decimal, interpreted as feet: `"18.5"`
/// - Feet token ending in `'`, `ft`, `foot`, or `feet`: `"18'"`, `"18 ft"`
/// - Inches token ending in `"`, `in`, `inch`, or `inches`: `"6\""`, `"6in"`
/// - Feet and inches combined: `"18' 6\""`, `"18ft 6in"`, `"18' 6"`
///
/// Returns `None` (not an error) when the text cannot be interpreted, so
/// callers can distinguish "blank/invalid" from "zero".
pub fn parse_feet(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Bare decimal number means feet
    if let Ok(value) = trimmed.parse::<f64>() {
        return value.is_finite().then_some(value);
    }

    // Normalize word suffixes to tick marks, longest first so "feet" is not
    // mangled by the "ft" replacement.
    let mut normalized = trimmed.to_ascii_lowercase();
    for (word, mark) in [
        ("feet", "'"),
        ("foot", "'"),
        ("ft.", "'"),
        ("ft", "'"),
        ("inches", "\""),
        ("inch", "\""),
        ("in.", "\""),
        ("in", "\""),
    ] {
        normalized = normalized.replace(word, mark);
    }

    let mut feet = 0.0;
    let mut rest = normalized.as_str();
    let mut saw_feet = false;

    if let Some(idx) = rest.find('\'') {
        feet = rest[..idx].trim().parse::<f64>().ok()?;
        saw_feet = true;
        rest = &rest[idx + 1..];
    }

    let rest = rest.trim();
    let inches = if rest.is_empty() {
        // Feet token alone is fine; an empty string with no token is not.
        if !saw_feet {
            return None;
        }
        0.0
    } else {
        // Inches token, with or without its mark ("18' 6" is tolerated).
        rest.trim_end_matches('"').trim().parse::<f64>().ok()?
    };

    let value = feet + inches / 12.0;
    value.is_finite().then_some(value)
}

/// Format decimal feet as whole feet plus rounded inches (0-11).
///
/// An inches value that rounds to 12 carries into the next foot, so
/// `17.99` formats as `18' 0"` rather than `17' 12"`. Negative inputs are
/// clamped to zero; heights below grade are not a displayable measurement.
///
/// Round-trip contract: `parse_feet(format_feet_inches(x, style))` is within
/// 1/12 ft (one inch) of `x` for any finite non-negative `x`.
pub fn format_feet_inches(value_ft: f64, style: MeasurementStyle) -> String {
    let value = value_ft.max(0.0);
    let mut whole_feet = value.floor() as i64;
    let mut inches = ((value - whole_feet as f64) * 12.0).round() as i64;
    if inches == 12 {
        whole_feet += 1;
        inches = 0;
    }
    match style {
        MeasurementStyle::TickMarks => format!("{}' {}\"", whole_feet, inches),
        MeasurementStyle::Verbose => format!("{}ft {}in", whole_feet, inches),
    }
}
