use std::fmt;
use thiserror::Error;

/// Failure produced by a suite constructor.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SuiteInitError {
    message: String,
}

impl SuiteInitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterError {
    DuplicateId { id: String },
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::DuplicateId { id } => write!(f, "duplicate suite id: {id}"),
        }
    }
}

impl std::error::Error for RegisterError {}

/// Why suite resolution failed.
///
/// Each cause is a distinct variant so the invoking harness can tell an
/// unconfigured run from a misconfigured one instead of seeing both as
/// "no tests".
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No suite identifier is configured.
    #[error("no suite configured")]
    NotConfigured,
    /// The identifier does not name a registered suite.
    #[error("unknown suite `{name}`")]
    UnknownSuite { name: String },
    /// The suite is registered but its availability guard rejected it.
    #[error("suite `{name}` is not available: {reason}")]
    Unavailable { name: String, reason: String },
    /// The suite's constructor failed.
    #[error("failed to construct suite `{name}`")]
    Construction {
        name: String,
        #[source]
        source: SuiteInitError,
    },
}
