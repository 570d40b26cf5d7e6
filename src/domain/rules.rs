//! Site rule sets: salary cap, roster shape and stacking thresholds.
//!
//! The lineup model is written against [`SiteRules`] only. Built-in
//! profiles for supported sites are available through [`Site::rules`];
//! anything else can be described in full in the configuration file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::player::Position;
use crate::error::ConfigError;

/// Supported contest sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    #[default]
    Draftkings,
    Fanduel,
    /// Rules supplied in full by the configuration file.
    Custom,
}

impl Site {
    /// Sites with a built-in rule profile.
    pub const BUILT_IN: [Site; 2] = [Site::Draftkings, Site::Fanduel];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Draftkings => "draftkings",
            Self::Fanduel => "fanduel",
            Self::Custom => "custom",
        }
    }

    /// Built-in rule profile, `None` for [`Site::Custom`].
    #[must_use]
    pub fn rules(self) -> Option<SiteRules> {
        match self {
            Self::Draftkings => Some(SiteRules::draftkings()),
            Self::Fanduel => Some(SiteRules::fanduel()),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Site {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draftkings" | "dk" | "1" => Ok(Self::Draftkings),
            "fanduel" | "fd" | "2" => Ok(Self::Fanduel),
            "custom" => Ok(Self::Custom),
            other => Err(ConfigError::invalid(
                "site",
                format!("unknown site {other:?} (expected draftkings, fanduel or custom)"),
            )),
        }
    }
}

/// One named roster slot and the positions it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub label: String,
    pub eligible: Vec<Position>,
}

impl RosterSlot {
    pub fn new(label: impl Into<String>, eligible: &[Position]) -> Self {
        Self {
            label: label.into(),
            eligible: eligible.to_vec(),
        }
    }

    #[must_use]
    pub fn accepts(&self, position: Position) -> bool {
        self.eligible.contains(&position)
    }

    #[must_use]
    pub fn is_goalie(&self) -> bool {
        self.accepts(Position::Goalie)
    }

    /// A flexible (utility) slot accepts more than one skater category.
    #[must_use]
    pub fn is_flexible(&self) -> bool {
        self.eligible.iter().filter(|p| p.is_skater()).count() > 1
    }
}

/// Inclusive bounds on how many selected skaters are eligible for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBound {
    pub position: Position,
    pub min: u32,
    pub max: u32,
}

impl PositionBound {
    #[must_use]
    pub const fn new(position: Position, min: u32, max: u32) -> Self {
        Self { position, min, max }
    }
}

/// Require at least `min_lines` (team, line) buckets holding at least
/// `min_players` selected skaters each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRule {
    pub min_players: u32,
    pub min_lines: u32,
}

impl StackRule {
    #[must_use]
    pub const fn new(min_players: u32, min_lines: u32) -> Self {
        Self {
            min_players,
            min_lines,
        }
    }
}

/// Platform-specific roster shape and constraint thresholds.
///
/// Stacking rules are independent of each other: a bucket that satisfies a
/// three-player rule also counts toward a two-player rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRules {
    pub name: String,
    pub salary_cap: u32,
    pub roster_slots: Vec<RosterSlot>,
    #[serde(default)]
    pub position_bounds: Vec<PositionBound>,
    #[serde(default)]
    pub min_distinct_teams: u32,
    #[serde(default)]
    pub max_skaters_per_team: Option<u32>,
    #[serde(default)]
    pub stacking: Vec<StackRule>,
    #[serde(default)]
    pub goalie_opponent_exclusion: bool,
}

impl SiteRules {
    /// DraftKings classic NHL: C, C, W, W, W, D, D, G, UTIL.
    #[must_use]
    pub fn draftkings() -> Self {
        use Position::{Center as C, Defense as D, Goalie as G, Wing as W};
        Self {
            name: "DraftKings".into(),
            salary_cap: 50_000,
            roster_slots: vec![
                RosterSlot::new("C", &[C]),
                RosterSlot::new("C", &[C]),
                RosterSlot::new("W", &[W]),
                RosterSlot::new("W", &[W]),
                RosterSlot::new("W", &[W]),
                RosterSlot::new("D", &[D]),
                RosterSlot::new("D", &[D]),
                RosterSlot::new("G", &[G]),
                RosterSlot::new("UTIL", &[C, W, D]),
            ],
            position_bounds: vec![
                PositionBound::new(C, 2, 3),
                PositionBound::new(W, 3, 4),
                PositionBound::new(D, 2, 3),
            ],
            min_distinct_teams: 3,
            max_skaters_per_team: None,
            stacking: vec![StackRule::new(3, 1), StackRule::new(2, 2)],
            goalie_opponent_exclusion: true,
        }
    }

    /// FanDuel NHL: C, C, W, W, D, D, UTIL, UTIL, G.
    #[must_use]
    pub fn fanduel() -> Self {
        use Position::{Center as C, Defense as D, Goalie as G, Wing as W};
        Self {
            name: "FanDuel".into(),
            salary_cap: 55_000,
            roster_slots: vec![
                RosterSlot::new("C", &[C]),
                RosterSlot::new("C", &[C]),
                RosterSlot::new("W", &[W]),
                RosterSlot::new("W", &[W]),
                RosterSlot::new("D", &[D]),
                RosterSlot::new("D", &[D]),
                RosterSlot::new("UTIL", &[C, W, D]),
                RosterSlot::new("UTIL", &[C, W, D]),
                RosterSlot::new("G", &[G]),
            ],
            position_bounds: vec![
                PositionBound::new(C, 2, 4),
                PositionBound::new(W, 2, 4),
                PositionBound::new(D, 2, 4),
            ],
            min_distinct_teams: 3,
            max_skaters_per_team: Some(4),
            stacking: vec![StackRule::new(3, 1), StackRule::new(2, 2)],
            goalie_opponent_exclusion: true,
        }
    }

    /// Number of skater slots.
    #[must_use]
    pub fn skater_count(&self) -> usize {
        self.roster_slots.iter().filter(|s| !s.is_goalie()).count()
    }

    /// Number of goalie slots.
    #[must_use]
    pub fn goalie_count(&self) -> usize {
        self.roster_slots.iter().filter(|s| s.is_goalie()).count()
    }

    #[must_use]
    pub fn roster_size(&self) -> usize {
        self.roster_slots.len()
    }

    /// Big-M constant linking team usage to team selections.
    #[must_use]
    pub fn team_big_m(&self) -> u32 {
        self.max_skaters_per_team
            .unwrap_or(self.skater_count() as u32)
    }

    /// Slot labels in roster order, used as the output header.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.roster_slots.iter().map(|s| s.label.clone()).collect()
    }

    /// Check that the rule set is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first inconsistent
    /// field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.salary_cap == 0 {
            return Err(ConfigError::invalid("salary_cap", "must be greater than 0"));
        }

        for slot in &self.roster_slots {
            if slot.eligible.is_empty() {
                return Err(ConfigError::invalid(
                    "roster_slots",
                    format!("slot {:?} accepts no position", slot.label),
                ));
            }
            if slot.is_goalie() && slot.eligible.len() > 1 {
                return Err(ConfigError::invalid(
                    "roster_slots",
                    format!("slot {:?} mixes goalies and skaters", slot.label),
                ));
            }
        }

        let skaters = self.skater_count() as u32;
        if skaters == 0 {
            return Err(ConfigError::invalid("roster_slots", "no skater slots"));
        }
        if self.goalie_count() == 0 {
            return Err(ConfigError::invalid("roster_slots", "no goalie slot"));
        }

        let mut min_sum = 0;
        let mut max_sum = 0;
        for bound in &self.position_bounds {
            if !bound.position.is_skater() {
                return Err(ConfigError::invalid(
                    "position_bounds",
                    "goalie count is fixed by the goalie slots",
                ));
            }
            if bound.min > bound.max {
                return Err(ConfigError::invalid(
                    "position_bounds",
                    format!("{} min {} exceeds max {}", bound.position, bound.min, bound.max),
                ));
            }
            if !self.roster_slots.iter().any(|s| s.accepts(bound.position)) {
                return Err(ConfigError::invalid(
                    "position_bounds",
                    format!("no roster slot accepts {}", bound.position),
                ));
            }
            min_sum += bound.min;
            max_sum += bound.max;
        }
        if !self.position_bounds.is_empty() {
            if min_sum > skaters {
                return Err(ConfigError::invalid(
                    "position_bounds",
                    format!("minimums sum to {min_sum}, above the {skaters} skater slots"),
                ));
            }
            if max_sum < skaters {
                return Err(ConfigError::invalid(
                    "position_bounds",
                    format!("maximums sum to {max_sum}, below the {skaters} skater slots"),
                ));
            }
        }

        if self.min_distinct_teams > skaters {
            return Err(ConfigError::invalid(
                "min_distinct_teams",
                format!("{} exceeds the {skaters} skater slots", self.min_distinct_teams),
            ));
        }
        if let Some(max) = self.max_skaters_per_team {
            if max == 0 || max > skaters {
                return Err(ConfigError::invalid(
                    "max_skaters_per_team",
                    format!("must be between 1 and {skaters}"),
                ));
            }
        }

        let per_team = self.team_big_m();
        for rule in &self.stacking {
            if rule.min_players == 0 || rule.min_lines == 0 {
                return Err(ConfigError::invalid(
                    "stacking",
                    "min_players and min_lines must be greater than 0",
                ));
            }
            if rule.min_players > per_team {
                return Err(ConfigError::invalid(
                    "stacking",
                    format!(
                        "a {}-player stack cannot fit {per_team} skaters per team",
                        rule.min_players
                    ),
                ));
            }
            if rule.min_players.saturating_mul(rule.min_lines) > skaters {
                return Err(ConfigError::invalid(
                    "stacking",
                    format!(
                        "{} lines of {} players exceed the {skaters} skater slots",
                        rule.min_lines, rule.min_players
                    ),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(rules: &SiteRules, expected_field: &str) {
        match rules.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected invalid {expected_field}, got {other:?}"),
        }
    }

    #[test]
    fn built_in_profiles_are_valid() {
        for site in Site::BUILT_IN {
            let rules = site.rules().unwrap();
            rules.validate().unwrap();
            assert_eq!(rules.roster_size(), 9);
            assert_eq!(rules.skater_count(), 8);
            assert_eq!(rules.goalie_count(), 1);
        }
        assert!(Site::Custom.rules().is_none());
    }

    #[test]
    fn draftkings_header_matches_upload_order() {
        assert_eq!(
            SiteRules::draftkings().header(),
            ["C", "C", "W", "W", "W", "D", "D", "G", "UTIL"]
        );
    }

    #[test]
    fn flexible_slots_are_detected() {
        let rules = SiteRules::fanduel();
        let flexible: Vec<_> = rules
            .roster_slots
            .iter()
            .filter(|s| s.is_flexible())
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(flexible, ["UTIL", "UTIL"]);
    }

    #[test]
    fn team_big_m_defaults_to_skater_count() {
        assert_eq!(SiteRules::draftkings().team_big_m(), 8);
        assert_eq!(SiteRules::fanduel().team_big_m(), 4);
    }

    #[test]
    fn site_names_parse() {
        assert_eq!("DraftKings".parse::<Site>().unwrap(), Site::Draftkings);
        assert_eq!("fd".parse::<Site>().unwrap(), Site::Fanduel);
        assert_eq!("2".parse::<Site>().unwrap(), Site::Fanduel);
        assert!("yahoo".parse::<Site>().is_err());
    }

    #[test]
    fn rejects_zero_cap() {
        let mut rules = SiteRules::draftkings();
        rules.salary_cap = 0;
        assert_invalid(&rules, "salary_cap");
    }

    #[test]
    fn rejects_missing_goalie_slot() {
        let mut rules = SiteRules::draftkings();
        rules.roster_slots.retain(|s| !s.is_goalie());
        assert_invalid(&rules, "roster_slots");
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut rules = SiteRules::draftkings();
        rules.position_bounds[0] = PositionBound::new(Position::Center, 4, 2);
        assert_invalid(&rules, "position_bounds");
    }

    #[test]
    fn rejects_bounds_summing_below_roster() {
        let mut rules = SiteRules::draftkings();
        rules.position_bounds = vec![
            PositionBound::new(Position::Center, 2, 2),
            PositionBound::new(Position::Wing, 3, 3),
            PositionBound::new(Position::Defense, 2, 2),
        ];
        assert_invalid(&rules, "position_bounds");
    }

    #[test]
    fn rejects_bounds_summing_above_roster() {
        let mut rules = SiteRules::draftkings();
        rules.position_bounds = vec![
            PositionBound::new(Position::Center, 3, 4),
            PositionBound::new(Position::Wing, 4, 4),
            PositionBound::new(Position::Defense, 2, 3),
        ];
        assert_invalid(&rules, "position_bounds");
    }

    #[test]
    fn rejects_unreachable_team_count() {
        let mut rules = SiteRules::draftkings();
        rules.min_distinct_teams = 9;
        assert_invalid(&rules, "min_distinct_teams");
    }

    #[test]
    fn rejects_stack_larger_than_team_cap() {
        let mut rules = SiteRules::fanduel();
        rules.stacking = vec![StackRule::new(5, 1)];
        assert_invalid(&rules, "stacking");
    }

    #[test]
    fn custom_rules_parse_from_toml() {
        let text = r#"
name = "Showdown"
salary_cap = 40000
min_distinct_teams = 2
goalie_opponent_exclusion = false

[[roster_slots]]
label = "F"
eligible = ["C", "W"]

[[roster_slots]]
label = "F"
eligible = ["C", "W"]

[[roster_slots]]
label = "D"
eligible = ["D"]

[[roster_slots]]
label = "G"
eligible = ["G"]

[[stacking]]
min_players = 2
min_lines = 1
"#;
        let rules: SiteRules = toml::from_str(text).unwrap();
        rules.validate().unwrap();
        assert_eq!(rules.skater_count(), 3);
        assert!(rules.roster_slots[0].is_flexible());
        assert!(rules.position_bounds.is_empty());
        assert_eq!(rules.max_skaters_per_team, None);
        assert_eq!(rules.stacking, vec![StackRule::new(2, 1)]);
    }
}
