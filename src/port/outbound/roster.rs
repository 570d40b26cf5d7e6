//! Roster input and lineup output ports.
//!
//! The engine never touches files. A [`RosterSource`] hands over raw rows
//! which the catalog validates, and a [`LineupSink`] receives the laid-out
//! lineups once generation finishes.

use crate::domain::player::{GoalieRecord, SkaterRecord};
use crate::domain::slot::FilledLineup;
use crate::error::Result;

/// Supplier of raw skater and goalie rows.
pub trait RosterSource {
    /// Load every skater row in source order.
    fn skaters(&self) -> Result<Vec<SkaterRecord>>;

    /// Load every goalie row in source order.
    fn goalies(&self) -> Result<Vec<GoalieRecord>>;
}

/// Which columns a lineup sink emits after the slot columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Slot columns only, as accepted by the contest site's upload form.
    UploadReady,
    /// Slot columns followed by `Projected` and, when known, `Actual`.
    WithProjections,
}

/// Destination for filled lineups.
pub trait LineupSink {
    /// Write all lineups under a header of slot labels in roster order.
    fn write(&self, slot_labels: &[String], lineups: &[FilledLineup]) -> Result<()>;
}
