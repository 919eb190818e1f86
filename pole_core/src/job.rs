//! # Job Data Structures
//!
//! The `Job` struct is the in-memory container for one attachment
//! application: who is applying, which pole, the analysis input, and — once
//! computed — the analysis report. Jobs serialize to human-readable JSON for
//! the surrounding system (persistence, export and audit live outside this
//! crate).
//!
//! ## Example
//!
//! ```rust
//! use pole_core::job::Job;
//!
//! let job = Job::new("Acme Fiber", "MR-25-0107", "P-4412");
//! let json = serde_json::to_string_pretty(&job).unwrap();
//! assert!(json.contains("MR-25-0107"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::analysis::{compute_analysis, AnalysisInput, AnalysisReport};
use crate::errors::ValidationErrors;

/// Current schema version for serialized jobs
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Identity and bookkeeping for one attachment application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Schema version of the serialized form
    pub version: String,
    /// Stable job identity
    pub id: Uuid,
    /// Applying attacher (e.g., "Acme Fiber")
    pub applicant: String,
    /// Application/job number (e.g., "MR-25-0107")
    pub job_number: String,
    /// Pole tag in the field
    pub pole_tag: String,
    /// Creation timestamp
    pub created: DateTime<Utc>,
    /// Last modification timestamp
    pub modified: DateTime<Utc>,
}

/// One attachment application: metadata, input, and computed report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Job metadata (identity, applicant, timestamps)
    pub meta: JobMetadata,
    /// The analysis input as last edited
    pub input: AnalysisInput,
    /// The last computed report, when the input validated
    pub report: Option<AnalysisReport>,
}

impl Job {
    /// Create a new empty job.
    pub fn new(
        applicant: impl Into<String>,
        job_number: impl Into<String>,
        pole_tag: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Job {
            meta: JobMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                applicant: applicant.into(),
                job_number: job_number.into(),
                pole_tag: pole_tag.into(),
                created: now,
                modified: now,
            },
            input: AnalysisInput::default(),
            report: None,
        }
    }

    /// Recompute the report from the current input.
    ///
    /// On validation failure the stale report is cleared and the errors are
    /// returned for the caller to display; the job itself stays usable.
    pub fn recompute(&mut self) -> Result<&AnalysisReport, ValidationErrors> {
        match compute_analysis(&self.input) {
            Ok(report) => {
                self.report = Some(report);
                self.touch();
                Ok(self.report.as_ref().expect("just set"))
            }
            Err(errors) => {
                self.report = None;
                self.touch();
                Err(errors)
            }
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}
