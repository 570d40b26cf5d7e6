//! Validated, read-only table of skaters and goalies for one run.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::error::{DataValidationError, RowKind};
use super::id::TeamId;
use super::player::{parse_line, Goalie, GoalieRecord, PositionSet, Skater, SkaterRecord};

/// Normalized roster for one slate.
///
/// Row order is preserved from the input and is significant: it drives
/// variable indices in the model and the greedy slot placement.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterCatalog {
    skaters: Vec<Skater>,
    goalies: Vec<Goalie>,
}

impl RosterCatalog {
    /// Validate raw rows into a catalog.
    ///
    /// Skater rows are checked before goalie rows, each in input order, and
    /// the first problem found is returned.
    ///
    /// # Errors
    ///
    /// Returns [`DataValidationError`] when either table is empty, when a
    /// required field (name, team, salary, projection, position) is blank, or
    /// when a numeric field or position tag cannot be parsed.
    pub fn try_new(
        skaters: Vec<SkaterRecord>,
        goalies: Vec<GoalieRecord>,
    ) -> Result<Self, DataValidationError> {
        if skaters.is_empty() {
            return Err(DataValidationError::EmptyRoster {
                kind: RowKind::Skater,
            });
        }
        if goalies.is_empty() {
            return Err(DataValidationError::EmptyRoster {
                kind: RowKind::Goalie,
            });
        }

        let skaters = skaters
            .into_iter()
            .enumerate()
            .map(|(row, record)| validate_skater(row, record))
            .collect::<Result<Vec<_>, _>>()?;
        let goalies = goalies
            .into_iter()
            .enumerate()
            .map(|(row, record)| validate_goalie(row, record))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { skaters, goalies })
    }

    /// Build a catalog from already-validated players.
    #[must_use]
    pub fn from_players(skaters: Vec<Skater>, goalies: Vec<Goalie>) -> Self {
        Self { skaters, goalies }
    }

    #[must_use]
    pub fn skaters(&self) -> &[Skater] {
        &self.skaters
    }

    #[must_use]
    pub fn goalies(&self) -> &[Goalie] {
        &self.goalies
    }

    #[must_use]
    pub fn skater_count(&self) -> usize {
        self.skaters.len()
    }

    #[must_use]
    pub fn goalie_count(&self) -> usize {
        self.goalies.len()
    }

    /// True when every row carries an actual score (backtest data).
    #[must_use]
    pub fn has_actuals(&self) -> bool {
        self.skaters.iter().all(|s| s.actual.is_some())
            && self.goalies.iter().all(|g| g.actual.is_some())
    }
}

fn required(
    kind: RowKind,
    row: usize,
    field: &'static str,
    value: Option<String>,
) -> Result<String, DataValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(DataValidationError::MissingField { kind, row, field }),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_salary(kind: RowKind, row: usize, raw: String) -> Result<u32, DataValidationError> {
    let invalid = || DataValidationError::InvalidNumber {
        kind,
        row,
        field: "salary",
        value: raw.clone(),
    };
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    if let Ok(value) = cleaned.parse::<u32>() {
        return Ok(value);
    }
    // Whole-number floats ("5400.0") are common in spreadsheet exports.
    let value = Decimal::from_str(&cleaned).map_err(|_| invalid())?;
    if value.fract() != Decimal::ZERO || value.is_sign_negative() {
        return Err(invalid());
    }
    value.to_u32().ok_or_else(invalid)
}

fn parse_points(
    kind: RowKind,
    row: usize,
    field: &'static str,
    raw: String,
) -> Result<Decimal, DataValidationError> {
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| DataValidationError::InvalidNumber {
            kind,
            row,
            field,
            value: raw,
        })
}

fn validate_skater(row: usize, record: SkaterRecord) -> Result<Skater, DataValidationError> {
    let kind = RowKind::Skater;
    let name = required(kind, row, "name", record.name)?;
    let team = TeamId::new(required(kind, row, "team", record.team)?);
    let opponent = TeamId::new(required(kind, row, "opponent", record.opponent)?);
    let salary = parse_salary(kind, row, required(kind, row, "salary", record.salary)?)?;
    let projected = required(kind, row, "projected", record.projected)?;
    let projected = parse_points(kind, row, "projected", projected)?;
    let raw_positions = required(kind, row, "positions", record.positions)?;
    let positions = PositionSet::parse(&raw_positions)
        .map_err(|tag| DataValidationError::InvalidPosition { row, tag })?;
    let actual = optional(record.actual)
        .map(|raw| parse_points(kind, row, "actual", raw))
        .transpose()?;

    Ok(Skater {
        name,
        team,
        opponent,
        salary,
        positions,
        line: parse_line(record.line.as_deref()),
        projected,
        actual,
    })
}

fn validate_goalie(row: usize, record: GoalieRecord) -> Result<Goalie, DataValidationError> {
    let kind = RowKind::Goalie;
    let name = required(kind, row, "name", record.name)?;
    let team = TeamId::new(required(kind, row, "team", record.team)?);
    let salary = parse_salary(kind, row, required(kind, row, "salary", record.salary)?)?;
    let projected = required(kind, row, "projected", record.projected)?;
    let projected = parse_points(kind, row, "projected", projected)?;
    let actual = optional(record.actual)
        .map(|raw| parse_points(kind, row, "actual", raw))
        .transpose()?;

    Ok(Goalie {
        name,
        team,
        salary,
        projected,
        actual,
    })
}
