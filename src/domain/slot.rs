//! Slot assignment: lay an accepted lineup out on named roster slots.
//!
//! Placement is greedy and deterministic. Selected skaters are visited in
//! catalog order; each goes into the first empty slot dedicated to its
//! primary position (C before W before D), and only falls back to a
//! flexible slot once those are full. Goalies fill the goalie slots.
//!
//! Greedy placement can strand a skater when a dual-position player took
//! the flexible slot early. Only in that case the stranded skater is placed
//! by moving already-placed skaters along an augmenting path, trying to
//! displace flexible-slot occupants first.

use rust_decimal::Decimal;

use super::catalog::RosterCatalog;
use super::error::SlotError;
use super::lineup::Lineup;
use super::player::PositionSet;
use super::rules::SiteRules;

/// A lineup laid out in roster slot order, ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledLineup {
    /// Player names in roster slot order. Unfilled slots are empty strings.
    pub players: Vec<String>,
    /// Total projected points, rounded to 2 decimal places.
    pub projected: Decimal,
    /// Total actual points when the catalog carries actuals.
    pub actual: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupant {
    Skater(usize),
    Goalie(usize),
}

/// Maps accepted lineups onto the slots of one rule set.
#[derive(Debug, Clone, Copy)]
pub struct SlotMapper<'a> {
    rules: &'a SiteRules,
}

impl<'a> SlotMapper<'a> {
    #[must_use]
    pub const fn new(rules: &'a SiteRules) -> Self {
        Self { rules }
    }

    /// Lay out one lineup.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError`] when a selected player cannot be given a slot.
    pub fn fill(&self, lineup: &Lineup, catalog: &RosterCatalog) -> Result<FilledLineup, SlotError> {
        let mut slots: Vec<Option<Occupant>> = vec![None; self.rules.roster_size()];

        let mut stranded = Vec::new();
        for &i in lineup.skaters() {
            match self.greedy_slot(catalog.skaters()[i].positions, &slots) {
                Some(s) => slots[s] = Some(Occupant::Skater(i)),
                None => stranded.push(i),
            }
        }
        for i in stranded {
            let mut visited = vec![false; slots.len()];
            if !self.place_by_moving(i, catalog, &mut slots, &mut visited) {
                return Err(SlotError::Unplaceable {
                    name: catalog.skaters()[i].name.clone(),
                });
            }
        }

        for &g in lineup.goalies() {
            let open = self
                .rules
                .roster_slots
                .iter()
                .enumerate()
                .find(|(s, slot)| slot.is_goalie() && slots[*s].is_none())
                .map(|(s, _)| s);
            match open {
                Some(s) => slots[s] = Some(Occupant::Goalie(g)),
                None => {
                    return Err(SlotError::NoGoalieSlot {
                        name: catalog.goalies()[g].name.clone(),
                    })
                }
            }
        }

        let players = slots
            .iter()
            .map(|occupant| match occupant {
                Some(Occupant::Skater(i)) => catalog.skaters()[*i].name.clone(),
                Some(Occupant::Goalie(g)) => catalog.goalies()[*g].name.clone(),
                None => String::new(),
            })
            .collect();

        let actual = catalog.has_actuals().then(|| {
            let skaters: Decimal = lineup
                .skaters()
                .iter()
                .filter_map(|&i| catalog.skaters()[i].actual)
                .sum();
            let goalies: Decimal = lineup
                .goalies()
                .iter()
                .filter_map(|&g| catalog.goalies()[g].actual)
                .sum();
            (skaters + goalies).round_dp(2)
        });

        Ok(FilledLineup {
            players,
            projected: lineup.projected(catalog).round_dp(2),
            actual,
        })
    }

    /// First empty dedicated slot for the primary position, else the first
    /// empty flexible slot accepting it.
    fn greedy_slot(&self, positions: PositionSet, slots: &[Option<Occupant>]) -> Option<usize> {
        let primary = positions.primary()?;
        let open = |flexible: bool| {
            self.rules
                .roster_slots
                .iter()
                .enumerate()
                .find(|(s, slot)| {
                    slots[*s].is_none()
                        && !slot.is_goalie()
                        && slot.is_flexible() == flexible
                        && slot.accepts(primary)
                })
                .map(|(s, _)| s)
        };
        open(false).or_else(|| open(true))
    }

    /// Skater slots accepting any of the positions: dedicated slots first,
    /// then flexible ones, each in roster order.
    fn eligible_slots(&self, positions: PositionSet) -> (Vec<usize>, Vec<usize>) {
        let mut dedicated = Vec::new();
        let mut flexible = Vec::new();
        for (s, slot) in self.rules.roster_slots.iter().enumerate() {
            if slot.is_goalie() || !positions.iter().any(|p| slot.accepts(p)) {
                continue;
            }
            if slot.is_flexible() {
                flexible.push(s);
            } else {
                dedicated.push(s);
            }
        }
        (dedicated, flexible)
    }

    fn place_by_moving(
        &self,
        skater: usize,
        catalog: &RosterCatalog,
        slots: &mut [Option<Occupant>],
        visited: &mut [bool],
    ) -> bool {
        let (dedicated, flexible) = self.eligible_slots(catalog.skaters()[skater].positions);

        if let Some(&s) = dedicated.iter().chain(&flexible).find(|&&s| slots[s].is_none()) {
            slots[s] = Some(Occupant::Skater(skater));
            return true;
        }

        for &s in flexible.iter().chain(&dedicated) {
            if visited[s] {
                continue;
            }
            visited[s] = true;
            let Some(Occupant::Skater(occupant)) = slots[s] else {
                continue;
            };
            if self.place_by_moving(occupant, catalog, slots, visited) {
                slots[s] = Some(Occupant::Skater(skater));
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{goalie, goalie_with_points, skater, with_points};
    use rust_decimal_macros::dec;

    fn names(filled: &FilledLineup) -> Vec<&str> {
        filled.players.iter().map(String::as_str).collect()
    }

    #[test]
    fn greedy_placement_fills_utility_last() {
        let catalog = RosterCatalog::from_players(
            vec![
                skater("c1", "A", "B", "C", Some(1)),
                skater("w1", "A", "B", "W", Some(1)),
                skater("w2", "A", "B", "W", Some(1)),
                skater("c2", "B", "A", "C", Some(1)),
                skater("w3", "B", "A", "W", Some(1)),
                skater("d1", "C", "D", "D", Some(1)),
                skater("d2", "C", "D", "D", Some(1)),
                skater("w4", "C", "D", "W", Some(2)),
            ],
            vec![goalie("g", "E")],
        );
        let lineup = Lineup::new((0..8).collect(), vec![0]);
        let rules = SiteRules::draftkings();

        let filled = SlotMapper::new(&rules).fill(&lineup, &catalog).unwrap();
        assert_eq!(
            names(&filled),
            ["c1", "c2", "w1", "w2", "w3", "d1", "d2", "g", "w4"]
        );
        assert_eq!(filled.actual, None);
    }

    #[test]
    fn dual_position_player_counts_as_primary() {
        let catalog = RosterCatalog::from_players(
            vec![
                skater("c1", "A", "B", "C", Some(1)),
                skater("cw", "A", "B", "C/W", Some(1)),
                skater("c2", "A", "B", "C", Some(1)),
            ],
            vec![goalie("g", "E")],
        );
        let lineup = Lineup::new(vec![0, 1, 2], vec![0]);
        let rules = SiteRules::draftkings();

        let filled = SlotMapper::new(&rules).fill(&lineup, &catalog).unwrap();
        // c1, cw take both C slots; c2 spills into UTIL, W slots stay open.
        assert_eq!(names(&filled), ["c1", "cw", "", "", "", "", "", "g", "c2"]);
    }

    #[test]
    fn stranded_skater_is_placed_by_moving_flex_occupant() {
        let catalog = RosterCatalog::from_players(
            vec![
                skater("c1", "A", "B", "C", Some(1)),
                skater("c2", "A", "B", "C", Some(1)),
                skater("cw", "A", "B", "C/W", Some(1)),
                skater("w1", "B", "A", "W", Some(1)),
                skater("w2", "B", "A", "W", Some(1)),
                skater("d1", "C", "D", "D", Some(1)),
                skater("d2", "C", "D", "D", Some(1)),
                skater("d3", "C", "D", "D", Some(2)),
            ],
            vec![goalie("g", "E")],
        );
        let lineup = Lineup::new((0..8).collect(), vec![0]);
        let rules = SiteRules::draftkings();

        let filled = SlotMapper::new(&rules).fill(&lineup, &catalog).unwrap();
        // Greedy puts cw in UTIL and strands d3; cw moves to the open W slot.
        assert_eq!(
            names(&filled),
            ["c1", "c2", "w1", "w2", "cw", "d1", "d2", "g", "d3"]
        );
    }

    #[test]
    fn unplaceable_skater_is_an_error() {
        let catalog = RosterCatalog::from_players(
            vec![
                skater("d1", "A", "B", "D", Some(1)),
                skater("d2", "A", "B", "D", Some(1)),
                skater("d3", "A", "B", "D", Some(1)),
                skater("d4", "A", "B", "D", Some(2)),
            ],
            vec![goalie("g", "E")],
        );
        let lineup = Lineup::new(vec![0, 1, 2, 3], vec![0]);
        let rules = SiteRules::draftkings();

        let err = SlotMapper::new(&rules).fill(&lineup, &catalog).unwrap_err();
        assert_eq!(err, SlotError::Unplaceable { name: "d4".into() });
    }

    #[test]
    fn second_goalie_has_no_slot() {
        let catalog = RosterCatalog::from_players(
            vec![skater("c1", "A", "B", "C", Some(1))],
            vec![goalie("g1", "E"), goalie("g2", "F")],
        );
        let lineup = Lineup::new(vec![0], vec![0, 1]);
        let rules = SiteRules::draftkings();

        let err = SlotMapper::new(&rules).fill(&lineup, &catalog).unwrap_err();
        assert_eq!(err, SlotError::NoGoalieSlot { name: "g2".into() });
    }

    #[test]
    fn totals_are_rounded_and_actuals_reported() {
        let catalog = RosterCatalog::from_players(
            vec![
                with_points(skater("c1", "A", "B", "C", Some(1)), dec!(10.004), Some(dec!(7.5))),
                with_points(skater("c2", "A", "B", "C", Some(1)), dec!(5.333), Some(dec!(1.25))),
            ],
            vec![goalie_with_points(goalie("g", "E"), dec!(8.1), Some(dec!(2)))],
        );
        let lineup = Lineup::new(vec![0, 1], vec![0]);
        let rules = SiteRules::draftkings();

        let filled = SlotMapper::new(&rules).fill(&lineup, &catalog).unwrap();
        assert_eq!(filled.projected, dec!(23.44));
        assert_eq!(filled.actual, Some(dec!(10.75)));
    }
}
