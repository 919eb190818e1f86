//! # Attachment Calculations
//!
//! The calculation components of the engine. Each component is a pure
//! function over JSON-serializable inputs and results with structured error
//! responses; the orchestrator in [`analysis`] wires them together.
//!
//! ## Available Calculations
//!
//! - [`pole`] - Burial depth, above-ground height and class recommendations
//! - [`sag`] - Conductor sag and midspan height under wind/ice loading
//! - [`guying`] - Down-guy tension, geometry and pull autofill
//! - [`make_ready`] - Relocation assessment for existing lines
//! - [`analysis`] - The orchestrating pipeline producing one report

pub mod analysis;
pub mod guying;
pub mod make_ready;
pub mod pole;
pub mod sag;

// Re-export commonly used types
pub use analysis::{compute_analysis, AnalysisInput, AnalysisReport};
pub use guying::GuyResult;
pub use make_ready::MakeReadyItem;
pub use pole::PoleGeometry;
pub use sag::SpanLoadResult;
