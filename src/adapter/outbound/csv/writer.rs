//! Writes filled lineups as CSV, one row per lineup.
//!
//! Point totals are written with two decimal places.

use std::path::PathBuf;

use csv::WriterBuilder;
use tracing::info;

use crate::domain::slot::FilledLineup;
use crate::error::Result;
use crate::port::outbound::roster::{LineupSink, OutputMode};

/// Lineup sink writing a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvLineupWriter {
    path: PathBuf,
    mode: OutputMode,
}

impl CsvLineupWriter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, mode: OutputMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }
}

impl LineupSink for CsvLineupWriter {
    fn write(&self, slot_labels: &[String], lineups: &[FilledLineup]) -> Result<()> {
        let with_points = self.mode == OutputMode::WithProjections;
        let with_actual =
            with_points && !lineups.is_empty() && lineups.iter().all(|l| l.actual.is_some());

        let mut writer = WriterBuilder::new().has_headers(false).from_path(&self.path)?;

        let mut header: Vec<&str> = slot_labels.iter().map(String::as_str).collect();
        if with_points {
            header.push("Projected");
        }
        if with_actual {
            header.push("Actual");
        }
        writer.write_record(&header)?;

        for lineup in lineups {
            let mut row = lineup.players.clone();
            if with_points {
                row.push(format!("{:.2}", lineup.projected));
            }
            if with_actual {
                row.push(lineup.actual.map(|a| format!("{a:.2}")).unwrap_or_default());
            }
            writer.write_record(&row)?;
        }
        writer.flush()?;

        info!(
            path = %self.path.display(),
            lineups = lineups.len(),
            mode = ?self.mode,
            "Wrote lineups"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn labels() -> Vec<String> {
        ["C", "W", "G"].iter().map(|s| s.to_string()).collect()
    }

    fn lineup(actual: Option<rust_decimal::Decimal>) -> FilledLineup {
        FilledLineup {
            players: vec!["Center".into(), "Wing".into(), "Goalie".into()],
            projected: dec!(23.44),
            actual,
        }
    }

    #[test]
    fn upload_ready_has_slot_columns_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lineups.csv");

        CsvLineupWriter::new(&path, OutputMode::UploadReady)
            .write(&labels(), &[lineup(Some(dec!(10.75)))])
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "C,W,G\nCenter,Wing,Goalie\n");
    }

    #[test]
    fn with_projections_appends_points() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("proj.csv");

        CsvLineupWriter::new(&path, OutputMode::WithProjections)
            .write(&labels(), &[lineup(None)])
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "C,W,G,Projected\nCenter,Wing,Goalie,23.44\n");
    }

    #[test]
    fn actual_column_when_known() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backtest.csv");

        CsvLineupWriter::new(&path, OutputMode::WithProjections)
            .write(&labels(), &[lineup(Some(dec!(10.75)))])
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "C,W,G,Projected,Actual\nCenter,Wing,Goalie,23.44,10.75\n");
    }

    #[test]
    fn empty_pool_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        CsvLineupWriter::new(&path, OutputMode::WithProjections)
            .write(&labels(), &[])
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "C,W,G,Projected\n");
    }
}
