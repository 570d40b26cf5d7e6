use thiserror::Error;

use crate::domain::error::{DataValidationError, SlotError};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures of the solving capability itself.
///
/// Infeasibility is not a solver error; it is reported through
/// [`SolveOutcome::Infeasible`](crate::application::model::SolveOutcome).
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    #[error("{solver} backend error: {reason}")]
    Backend { solver: &'static str, reason: String },

    #[error("solver returned {selected} selected {kind}, expected {expected}")]
    InconsistentSolution {
        kind: &'static str,
        selected: usize,
        expected: usize,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] DataValidationError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt error: {0}")]
    Prompt(String),

    #[error("generation task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}
