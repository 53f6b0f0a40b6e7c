//! Error types for study-planner-core.

use thiserror::Error;

/// Result type alias using PlannerError.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors that can occur while planning.
///
/// Missing or empty data never produces an error; only a syllabus that cannot
/// be interpreted at all does.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("malformed syllabus: {reason}")]
    MalformedSyllabus { reason: String },

    #[error("invalid weight {weight} for unit {unit}")]
    InvalidWeight { unit: String, weight: f64 },
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedSyllabus {
            reason: err.to_string(),
        }
    }
}
