use thiserror::Error;

/// Failures raised by the curation core.
///
/// Everything above the core (file handling, the driver, binaries) works in
/// `anyhow::Result` and downcasts to this type when it needs to decide between
/// skipping a seed and aborting the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurationError {
    #[error("invalid domain or target action '{value}'")]
    InvalidDomain { value: String },

    #[error("no value for slot '{slot}' avoids the target topic '{topic}'")]
    SamplingExhausted { slot: String, topic: String },

    #[error("malformed seed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("graph query for '{subject}' failed: {reason}")]
    GraphQueryFailure { subject: String, reason: String },
}

impl CurationError {
    pub fn invalid_domain(value: impl Into<String>) -> Self {
        Self::InvalidDomain {
            value: value.into(),
        }
    }

    pub fn graph_failure(subject: impl Into<String>, reason: impl ToString) -> Self {
        Self::GraphQueryFailure {
            subject: subject.into(),
            reason: reason.to_string(),
        }
    }
}
