//! Skater and goalie types, plus the raw rows they are validated from.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::TeamId;

/// Number of lines tracked per team for stacking.
pub const LINES_PER_TEAM: usize = 4;

/// Roster position category.
///
/// The declaration order is the placement priority used by the slot mapper:
/// a `C/W` skater is treated as a center first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "W")]
    Wing,
    #[serde(rename = "D")]
    Defense,
    #[serde(rename = "G")]
    Goalie,
}

impl Position {
    /// Skater categories in placement priority order.
    pub const SKATER: [Position; 3] = [Position::Center, Position::Wing, Position::Defense];

    /// Short tag as used in site exports.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Center => "C",
            Self::Wing => "W",
            Self::Defense => "D",
            Self::Goalie => "G",
        }
    }

    #[must_use]
    pub const fn is_skater(self) -> bool {
        !matches!(self, Self::Goalie)
    }

    /// Dense index into per-category skater tables.
    pub(crate) const fn skater_index(self) -> Option<usize> {
        match self {
            Self::Center => Some(0),
            Self::Wing => Some(1),
            Self::Defense => Some(2),
            Self::Goalie => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(Self::Center),
            "W" | "LW" | "RW" => Ok(Self::Wing),
            "D" => Ok(Self::Defense),
            "G" => Ok(Self::Goalie),
            other => Err(other.to_string()),
        }
    }
}

/// Set of skater positions a player is eligible for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PositionSet {
    bits: u8,
}

impl PositionSet {
    /// Parse a tag list such as `"C"`, `"C/W"` or `"LW/D"`.
    ///
    /// Returns the first unrecognized tag on failure. Goalie tags are not
    /// valid skater positions.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut set = Self::default();
        for tag in raw.split(['/', ',']).map(str::trim).filter(|t| !t.is_empty()) {
            match tag.parse::<Position>() {
                Ok(position) if position.is_skater() => set.insert(position),
                _ => return Err(tag.to_string()),
            }
        }
        if set.is_empty() {
            return Err(raw.trim().to_string());
        }
        Ok(set)
    }

    pub fn insert(&mut self, position: Position) {
        if let Some(idx) = position.skater_index() {
            self.bits |= 1 << idx;
        }
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position
            .skater_index()
            .is_some_and(|idx| self.bits & (1 << idx) != 0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Positions in priority order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        Position::SKATER.into_iter().filter(|p| self.contains(*p))
    }

    /// Highest-priority position (C before W before D).
    #[must_use]
    pub fn primary(&self) -> Option<Position> {
        self.iter().next()
    }
}

impl fmt::Display for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.iter().map(Position::tag).collect();
        f.write_str(&tags.join("/"))
    }
}

/// A validated non-goalie roster player.
#[derive(Debug, Clone, PartialEq)]
pub struct Skater {
    pub name: String,
    pub team: TeamId,
    pub opponent: TeamId,
    pub salary: u32,
    pub positions: PositionSet,
    /// Line number 1-4, `None` when unknown or outside that range.
    pub line: Option<u8>,
    pub projected: Decimal,
    pub actual: Option<Decimal>,
}

/// A validated goalie.
#[derive(Debug, Clone, PartialEq)]
pub struct Goalie {
    pub name: String,
    pub team: TeamId,
    pub salary: u32,
    pub projected: Decimal,
    pub actual: Option<Decimal>,
}

/// Raw skater row as handed over by a loading collaborator.
///
/// Every field is optional text; [`RosterCatalog::try_new`] performs the
/// parsing and reports what is missing or malformed.
///
/// [`RosterCatalog::try_new`]: super::catalog::RosterCatalog::try_new
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SkaterRecord {
    #[serde(alias = "playerName", alias = "player_name", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(alias = "opp", default)]
    pub opponent: Option<String>,
    #[serde(alias = "sal", default)]
    pub salary: Option<String>,
    #[serde(alias = "proj", default)]
    pub projected: Option<String>,
    #[serde(alias = "pos", alias = "position", default)]
    pub positions: Option<String>,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub actual: Option<String>,
}

/// Raw goalie row as handed over by a loading collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GoalieRecord {
    #[serde(alias = "playerName", alias = "player_name", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(alias = "sal", default)]
    pub salary: Option<String>,
    #[serde(alias = "proj", default)]
    pub projected: Option<String>,
    #[serde(default)]
    pub actual: Option<String>,
}

/// Parse a line value, mapping anything that is not an integer 1-4 to `None`.
///
/// Accepts float spellings such as `"2.0"` because spreadsheet exports often
/// write whole numbers that way.
#[must_use]
pub fn parse_line(raw: Option<&str>) -> Option<u8> {
    let raw = raw?.trim();
    let value: f64 = raw.parse().ok()?;
    if value.fract() != 0.0 {
        return None;
    }
    match value as i64 {
        n @ 1..=4 => Some(n as u8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_and_dual_positions() {
        let c = PositionSet::parse("C").unwrap();
        assert!(c.contains(Position::Center));
        assert!(!c.contains(Position::Wing));

        let cw = PositionSet::parse("C/W").unwrap();
        assert!(cw.contains(Position::Center));
        assert!(cw.contains(Position::Wing));
        assert_eq!(cw.primary(), Some(Position::Center));
        assert_eq!(cw.to_string(), "C/W");
    }

    #[test]
    fn wing_aliases_are_accepted() {
        let set = PositionSet::parse("LW/RW").unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Position::Wing]);
    }

    #[test]
    fn primary_follows_priority_not_tag_order() {
        let set = PositionSet::parse("D/W").unwrap();
        assert_eq!(set.primary(), Some(Position::Wing));
    }

    #[test]
    fn rejects_unknown_and_goalie_tags() {
        assert_eq!(PositionSet::parse("F"), Err("F".to_string()));
        assert_eq!(PositionSet::parse("G"), Err("G".to_string()));
        assert!(PositionSet::parse("  ").is_err());
    }

    #[test]
    fn line_values_outside_one_to_four_are_unassigned() {
        assert_eq!(parse_line(Some("1")), Some(1));
        assert_eq!(parse_line(Some(" 4 ")), Some(4));
        assert_eq!(parse_line(Some("3.0")), Some(3));
        assert_eq!(parse_line(Some("0")), None);
        assert_eq!(parse_line(Some("5")), None);
        assert_eq!(parse_line(Some("2.5")), None);
        assert_eq!(parse_line(Some("PP1")), None);
        assert_eq!(parse_line(None), None);
    }
}
