//! Reads skater and goalie tables from two CSV files.
//!
//! Headers are matched by name, so column order does not matter and extra
//! columns are ignored. Both the projection-site spelling (`playerName`,
//! `sal`, `proj`, `pos`, `opp`) and plain names are accepted. Every value is
//! handed over as text; numeric parsing happens in the catalog.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::player::{GoalieRecord, SkaterRecord};
use crate::error::Result;
use crate::port::outbound::roster::RosterSource;

/// Roster source backed by a skaters file and a goalies file.
#[derive(Debug, Clone)]
pub struct CsvRosterSource {
    skaters_path: PathBuf,
    goalies_path: PathBuf,
}

impl CsvRosterSource {
    #[must_use]
    pub fn new(skaters_path: impl Into<PathBuf>, goalies_path: impl Into<PathBuf>) -> Self {
        Self {
            skaters_path: skaters_path.into(),
            goalies_path: goalies_path.into(),
        }
    }

    #[must_use]
    pub fn skaters_path(&self) -> &Path {
        &self.skaters_path
    }

    #[must_use]
    pub fn goalies_path(&self) -> &Path {
        &self.goalies_path
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let rows = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
    debug!(path = %path.display(), rows = rows.len(), "Read roster file");
    Ok(rows)
}

impl RosterSource for CsvRosterSource {
    fn skaters(&self) -> Result<Vec<SkaterRecord>> {
        read_rows(&self.skaters_path)
    }

    fn goalies(&self) -> Result<Vec<GoalieRecord>> {
        read_rows(&self.goalies_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_projection_site_headers() {
        let skaters = write_csv(
            "playerName,team,opp,sal,proj,pos,line\n\
             Connor McDavid,EDM,CGY,9800,21.4,C,1\n\
             Leon Draisaitl,EDM,CGY,9200,19.1,C/W,1\n",
        );
        let goalies = write_csv("playerName,team,opp,sal,proj\nStuart Skinner,EDM,CGY,7800,11.2\n");

        let source = CsvRosterSource::new(skaters.path(), goalies.path());
        let rows = source.skaters().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name.as_deref(), Some("Leon Draisaitl"));
        assert_eq!(rows[1].positions.as_deref(), Some("C/W"));
        assert_eq!(rows[0].opponent.as_deref(), Some("CGY"));
        assert_eq!(rows[0].actual, None);

        let goalies = source.goalies().unwrap();
        assert_eq!(goalies.len(), 1);
        assert_eq!(goalies[0].salary.as_deref(), Some("7800"));
    }

    #[test]
    fn blank_cells_become_none() {
        let skaters = write_csv("name,team,salary,projected,position,line\nA,EDM,,5.0,W,\n");
        let goalies = write_csv("name,team,salary,projected\n");

        let source = CsvRosterSource::new(skaters.path(), goalies.path());
        let rows = source.skaters().unwrap();

        assert_eq!(rows[0].salary, None);
        assert_eq!(rows[0].line, None);
        assert!(source.goalies().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = CsvRosterSource::new("/nonexistent/skaters.csv", "/nonexistent/goalies.csv");
        assert!(source.skaters().is_err());
    }
}
