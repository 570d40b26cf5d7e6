//! Domain validation errors for roster data and slot placement.
//!
//! These errors are returned when raw rows cannot be turned into a valid
//! [`RosterCatalog`](super::catalog::RosterCatalog) or when a solved lineup
//! cannot be laid out on the roster slots.
//!
//! # Examples
//!
//! ```
//! use linestack::domain::catalog::RosterCatalog;
//! use linestack::domain::error::DataValidationError;
//! use linestack::domain::player::{GoalieRecord, SkaterRecord};
//!
//! let skater = SkaterRecord {
//!     name: Some("Connor McDavid".into()),
//!     team: Some("EDM".into()),
//!     opponent: Some("CGY".into()),
//!     salary: None, // missing!
//!     projected: Some("21.4".into()),
//!     positions: Some("C".into()),
//!     line: Some("1".into()),
//!     actual: None,
//! };
//! let goalie = GoalieRecord::default();
//!
//! let result = RosterCatalog::try_new(vec![skater], vec![goalie]);
//! assert!(matches!(
//!     result,
//!     Err(DataValidationError::MissingField { field: "salary", .. })
//! ));
//! ```

use thiserror::Error;

/// Which input table a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Skater,
    Goalie,
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skater => write!(f, "skater"),
            Self::Goalie => write!(f, "goalie"),
        }
    }
}

/// Errors raised when roster rows are absent or malformed.
///
/// Row numbers are zero-based catalog indices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataValidationError {
    /// A required field is absent or blank.
    #[error("{kind} row {row}: missing required field `{field}`")]
    MissingField {
        kind: RowKind,
        row: usize,
        field: &'static str,
    },

    /// A numeric field could not be parsed.
    #[error("{kind} row {row}: field `{field}` has invalid number {value:?}")]
    InvalidNumber {
        kind: RowKind,
        row: usize,
        field: &'static str,
        value: String,
    },

    /// A position tag is not one of C, W, D (or LW/RW).
    #[error("skater row {row}: unknown position tag {tag:?}")]
    InvalidPosition { row: usize, tag: String },

    /// One of the input tables has no rows.
    #[error("no {kind} rows supplied")]
    EmptyRoster { kind: RowKind },
}

/// Errors raised when a lineup cannot be laid out on roster slots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// No empty slot accepts the skater, even after rearranging.
    #[error("no open roster slot for skater {name:?}")]
    Unplaceable { name: String },

    /// The lineup holds more goalies than the rules have goalie slots.
    #[error("no open goalie slot for {name:?}")]
    NoGoalieSlot { name: String },
}
