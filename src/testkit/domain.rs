//! Builders for players and slates used across tests.
//!
//! Provides concise factory functions for [`Skater`], [`Goalie`] and whole
//! [`RosterCatalog`]s so tests focus on assertions rather than construction
//! boilerplate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::catalog::RosterCatalog;
use crate::domain::id::TeamId;
use crate::domain::player::{Goalie, PositionSet, Skater};

/// Create a skater with a 5000 salary and no projection.
///
/// `positions` uses the `C/W` spelling.
///
/// # Panics
///
/// Panics on an unknown position tag.
pub fn skater(
    name: &str,
    team: &str,
    opponent: &str,
    positions: &str,
    line: Option<u8>,
) -> Skater {
    Skater {
        name: name.to_string(),
        team: TeamId::from(team),
        opponent: TeamId::from(opponent),
        salary: 5000,
        positions: PositionSet::parse(positions).unwrap(),
        line,
        projected: Decimal::ZERO,
        actual: None,
    }
}

/// Create a goalie with a 7000 salary and no projection.
pub fn goalie(name: &str, team: &str) -> Goalie {
    Goalie {
        name: name.to_string(),
        team: TeamId::from(team),
        salary: 7000,
        projected: Decimal::ZERO,
        actual: None,
    }
}

/// Replace a skater's projected and actual points.
pub fn with_points(mut skater: Skater, projected: Decimal, actual: Option<Decimal>) -> Skater {
    skater.projected = projected;
    skater.actual = actual;
    skater
}

/// Replace a goalie's projected and actual points.
pub fn goalie_with_points(
    mut goalie: Goalie,
    projected: Decimal,
    actual: Option<Decimal>,
) -> Goalie {
    goalie.projected = projected;
    goalie.actual = actual;
    goalie
}

/// Point skater `index` of a catalog at a new opponent.
pub fn with_opponent(catalog: RosterCatalog, index: usize, opponent: &str) -> RosterCatalog {
    let mut skaters = catalog.skaters().to_vec();
    skaters[index].opponent = TeamId::from(opponent);
    RosterCatalog::from_players(skaters, catalog.goalies().to_vec())
}

/// Nine skaters and one goalie with a hand-computable DraftKings optimum.
///
/// | # | name | pos | team | line | proj |
/// |---|------|-----|------|------|------|
/// | 0 | A1   | C   | A    | 1    | 10   |
/// | 1 | A2   | W   | A    | 1    | 3    |
/// | 2 | A3   | W   | A    | 1    | 8    |
/// | 3 | B1   | C   | B    | 1    | 2.5  |
/// | 4 | B2   | W   | B    | 1    | 7    |
/// | 5 | C1   | D   | C    | 1    | 6    |
/// | 6 | C2   | D   | C    | 1    | 6.5  |
/// | 7 | X1   | W   | C    | 2    | 9    |
/// | 8 | X2   | D   | B    | 2    | 5    |
///
/// Goalie `G` plays for `E` and projects 8. Every skater costs 5000 and the
/// goalie 7000, so the cap never binds; the roster shape forces exactly one
/// of X1/X2 out and the best lineup drops X2 for 60.00 points.
pub fn toy_catalog() -> RosterCatalog {
    let rows = [
        ("A1", "C", "A", "B", 1, dec!(10)),
        ("A2", "W", "A", "B", 1, dec!(3)),
        ("A3", "W", "A", "B", 1, dec!(8)),
        ("B1", "C", "B", "A", 1, dec!(2.5)),
        ("B2", "W", "B", "A", 1, dec!(7)),
        ("C1", "D", "C", "D", 1, dec!(6)),
        ("C2", "D", "C", "D", 1, dec!(6.5)),
        ("X1", "W", "C", "D", 2, dec!(9)),
        ("X2", "D", "B", "A", 2, dec!(5)),
    ];
    let skaters = rows
        .into_iter()
        .map(|(name, pos, team, opp, line, proj)| {
            with_points(skater(name, team, opp, pos, Some(line)), proj, None)
        })
        .collect();
    let goalies = vec![goalie_with_points(goalie("G", "E"), dec!(8), None)];
    RosterCatalog::from_players(skaters, goalies)
}

/// A full slate: `teams` teams (paired as opponents T0-T1, T2-T3, ...) with
/// three lines of C, W, W, D, D each and one goalie per team.
///
/// Salaries stay between 3000 and 5000 for skaters and 6000 to 8000 for
/// goalies, so every roster-shaped lineup fits a 50 000 cap. Projections
/// vary deterministically.
pub fn synthetic_slate(teams: usize) -> RosterCatalog {
    let team_name = |t: usize| format!("T{t}");
    let opponent_of = |t: usize| if t % 2 == 0 { t + 1 } else { t - 1 };

    let mut skaters = Vec::new();
    for t in 0..teams {
        for line in 1..=3u8 {
            for (slot, pos) in ["C", "W", "W", "D", "D"].into_iter().enumerate() {
                let seed = t * 31 + usize::from(line) * 7 + slot * 3;
                let mut player = skater(
                    &format!("{}-L{line}-{pos}{slot}", team_name(t)),
                    &team_name(t),
                    &team_name(opponent_of(t)),
                    pos,
                    Some(line),
                );
                player.salary = 3000 + (seed % 5) as u32 * 500;
                let line_bonus = dec!(0.25) * Decimal::from(4 - u32::from(line));
                player.projected = Decimal::from((seed % 13) as u32 + 2) + line_bonus;
                skaters.push(player);
            }
        }
    }

    let goalies = (0..teams)
        .map(|t| {
            let mut g = goalie(&format!("{}-G", team_name(t)), &team_name(t));
            g.salary = 6000 + (t % 5) as u32 * 500;
            g.projected = Decimal::from((t * 5 % 7) as u32 + 6);
            g
        })
        .collect();

    RosterCatalog::from_players(skaters, goalies)
}
