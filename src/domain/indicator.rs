//! Boolean indicator matrices derived from a roster catalog.
//!
//! The matrices are the constraint coefficients of the lineup model:
//!
//! ```text
//! position_of[category][skater]   skater is eligible for C / W / D
//! team_of[skater][team]           skater plays for team
//! line_slot[skater][bucket]       skater is on (team, line) bucket
//! opponent_of[skater][goalie]     skater's opponent is the goalie's team
//! ```
//!
//! Buckets are laid out team-major: `bucket = team_index * 4 + (line - 1)`.
//! Teams are ordered alphabetically, so the same catalog always produces
//! the same matrices regardless of how rows were collected.

use std::collections::BTreeSet;

use super::catalog::RosterCatalog;
use super::id::TeamId;
use super::player::{Position, LINES_PER_TEAM};

/// Immutable indicator snapshot for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicators {
    teams: Vec<TeamId>,
    position_of: [Vec<bool>; 3],
    team_of: Vec<Vec<bool>>,
    line_slot: Vec<Vec<bool>>,
    opponent_of: Vec<Vec<bool>>,
}

impl Indicators {
    /// Build every matrix from the catalog.
    #[must_use]
    pub fn build(catalog: &RosterCatalog) -> Self {
        let teams: Vec<TeamId> = catalog
            .skaters()
            .iter()
            .map(|s| s.team.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let bucket_count = teams.len() * LINES_PER_TEAM;

        let position_of: [Vec<bool>; 3] = Position::SKATER.map(|position| {
            catalog
                .skaters()
                .iter()
                .map(|s| s.positions.contains(position))
                .collect()
        });

        let mut team_of: Vec<Vec<bool>> = Vec::with_capacity(catalog.skater_count());
        let mut line_slot: Vec<Vec<bool>> = Vec::with_capacity(catalog.skater_count());
        for skater in catalog.skaters() {
            // Every skater's team is in `teams` by construction.
            let team_idx = teams.binary_search(&skater.team).ok();

            team_of.push((0..teams.len()).map(|t| Some(t) == team_idx).collect());

            let mut buckets = vec![false; bucket_count];
            if let (Some(t), Some(line)) = (team_idx, skater.line) {
                buckets[t * LINES_PER_TEAM + usize::from(line) - 1] = true;
            }
            line_slot.push(buckets);
        }

        let opponent_of: Vec<Vec<bool>> = catalog
            .skaters()
            .iter()
            .map(|skater| {
                catalog
                    .goalies()
                    .iter()
                    .map(|goalie| skater.opponent == goalie.team)
                    .collect()
            })
            .collect();

        Self {
            teams,
            position_of,
            team_of,
            line_slot,
            opponent_of,
        }
    }

    /// Team ordering shared by every team-indexed structure.
    #[must_use]
    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.teams.len() * LINES_PER_TEAM
    }

    /// Team and line number for a bucket index.
    #[must_use]
    pub fn bucket_label(&self, bucket: usize) -> (&TeamId, u8) {
        let team = &self.teams[bucket / LINES_PER_TEAM];
        (team, (bucket % LINES_PER_TEAM) as u8 + 1)
    }

    /// Eligibility column for a skater category. Empty for goalies.
    #[must_use]
    pub fn position_of(&self, position: Position) -> &[bool] {
        match position.skater_index() {
            Some(idx) => &self.position_of[idx],
            None => &[],
        }
    }

    #[must_use]
    pub fn team_of(&self) -> &[Vec<bool>] {
        &self.team_of
    }

    #[must_use]
    pub fn line_slot(&self) -> &[Vec<bool>] {
        &self.line_slot
    }

    #[must_use]
    pub fn opponent_of(&self) -> &[Vec<bool>] {
        &self.opponent_of
    }

    /// Bucket a skater stacks into, if any.
    #[must_use]
    pub fn bucket_of(&self, skater: usize) -> Option<usize> {
        self.line_slot.get(skater)?.iter().position(|&b| b)
    }

    /// Index of a skater's team in [`teams`](Self::teams).
    #[must_use]
    pub fn team_index_of(&self, skater: usize) -> Option<usize> {
        self.team_of.get(skater)?.iter().position(|&b| b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{goalie, skater};

    fn catalog() -> RosterCatalog {
        RosterCatalog::from_players(
            vec![
                skater("a", "TOR", "MTL", "C", Some(1)),
                skater("b", "MTL", "TOR", "W", Some(2)),
                skater("c", "TOR", "MTL", "C/W", Some(4)),
                skater("d", "BOS", "NYR", "D", None),
            ],
            vec![goalie("g1", "MTL"), goalie("g2", "NYR")],
        )
    }

    #[test]
    fn teams_are_sorted_and_deduplicated() {
        let indicators = Indicators::build(&catalog());
        let names: Vec<_> = indicators.teams().iter().map(TeamId::as_str).collect();
        assert_eq!(names, ["BOS", "MTL", "TOR"]);
        assert_eq!(indicators.team_count(), 3);
        assert_eq!(indicators.bucket_count(), 12);
    }

    #[test]
    fn position_columns_follow_tags() {
        let indicators = Indicators::build(&catalog());
        assert_eq!(
            indicators.position_of(Position::Center),
            [true, false, true, false]
        );
        assert_eq!(
            indicators.position_of(Position::Wing),
            [false, true, true, false]
        );
        assert_eq!(
            indicators.position_of(Position::Defense),
            [false, false, false, true]
        );
        assert!(indicators.position_of(Position::Goalie).is_empty());
    }

    #[test]
    fn team_rows_are_one_hot() {
        let indicators = Indicators::build(&catalog());
        assert_eq!(indicators.team_of()[0], [false, false, true]);
        assert_eq!(indicators.team_of()[1], [false, true, false]);
        assert_eq!(indicators.team_of()[3], [true, false, false]);
        assert_eq!(indicators.team_index_of(2), Some(2));
    }

    #[test]
    fn line_buckets_are_team_major() {
        let indicators = Indicators::build(&catalog());
        // TOR is team 2, line 1 -> bucket 8; line 4 -> bucket 11.
        assert_eq!(indicators.bucket_of(0), Some(8));
        assert_eq!(indicators.bucket_of(2), Some(11));
        // MTL is team 1, line 2 -> bucket 5.
        assert_eq!(indicators.bucket_of(1), Some(5));
        // Unassigned line stacks with nobody.
        assert_eq!(indicators.bucket_of(3), None);
        assert!(indicators.line_slot()[3].iter().all(|b| !b));

        let (team, line) = indicators.bucket_label(11);
        assert_eq!((team.as_str(), line), ("TOR", 4));
    }

    #[test]
    fn opponent_matrix_matches_goalie_teams() {
        let indicators = Indicators::build(&catalog());
        // a and c play MTL (g1); d plays NYR (g2); b plays TOR (no goalie).
        assert_eq!(indicators.opponent_of()[0], [true, false]);
        assert_eq!(indicators.opponent_of()[1], [false, false]);
        assert_eq!(indicators.opponent_of()[2], [true, false]);
        assert_eq!(indicators.opponent_of()[3], [false, true]);
    }

    #[test]
    fn building_twice_is_idempotent() {
        let catalog = catalog();
        assert_eq!(Indicators::build(&catalog), Indicators::build(&catalog));
    }

    #[test]
    fn team_order_ignores_row_order() {
        let forward = catalog();
        let mut skaters = forward.skaters().to_vec();
        skaters.reverse();
        let reversed = RosterCatalog::from_players(skaters, forward.goalies().to_vec());

        assert_eq!(
            Indicators::build(&forward).teams(),
            Indicators::build(&reversed).teams()
        );
    }
}
