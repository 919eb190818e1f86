//! # pole_core - Pole Attachment Calculation Engine
//!
//! `pole_core` is the computational heart of Polewright: given a pole's
//! physical description, the existing power/communication configuration, a
//! span geometry and the target jurisdiction's clearance rules, it computes
//! whether a proposed attachment is compliant, where it should be placed,
//! what make-ready work existing lines need, whether a down guy is required,
//! and what it all costs.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every exported function is a deterministic pure function
//!   of its arguments; no I/O, no shared mutable state
//! - **JSON-First**: all inputs and outputs implement Serialize/Deserialize
//! - **No-throw contract**: expected validation failures come back as
//!   structured values, never panics, so the engine tolerates being re-run
//!   on every keystroke of a partially filled form
//!
//! ## Quick Start
//!
//! ```rust
//! use pole_core::calculations::analysis::{compute_analysis, AnalysisInput};
//!
//! let input = AnalysisInput {
//!     pole_height: "45".to_string(),
//!     pole_class: "Class 3".to_string(),
//!     existing_power_height: "30' 0\"".to_string(),
//!     span_length_ft: Some(200.0),
//!     ..Default::default()
//! };
//!
//! match compute_analysis(&input) {
//!     Ok(report) => println!("attach at {:.2} ft", report.proposed_attach_ft),
//!     Err(errors) => println!("fix the form: {}", errors),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Unit newtypes and the feet-and-inches measurement codec
//! - [`clearances`] - Code baseline, utility presets and override layering
//! - [`cables`] - Attachment cable reference data
//! - [`calculations`] - Pole geometry, sag, guying, make-ready, orchestrator
//! - [`job`] - Job container for one attachment application
//! - [`errors`] - Structured error types

pub mod cables;
pub mod calculations;
pub mod clearances;
pub mod errors;
pub mod job;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::analysis::{compute_analysis, AnalysisInput, AnalysisReport};
pub use errors::{CalcError, CalcResult, ValidationErrors};
pub use job::{Job, JobMetadata};
