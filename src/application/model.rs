//! Binary integer program for one lineup.
//!
//! The model is rebuilt from scratch for every lineup. Its variables, all
//! binary, are laid out as:
//!
//! ```text
//! [ skaters | goalies | team used | stack rule 0 buckets | stack rule 1 buckets | ... ]
//! ```
//!
//! and the objective maximises total projected points (encoded as
//! minimising the negated sum, which is the solver port's convention).

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::domain::catalog::RosterCatalog;
use crate::domain::constraint::Constraint;
use crate::domain::indicator::Indicators;
use crate::domain::lineup::{Lineup, LineupPool};
use crate::domain::rules::SiteRules;
use crate::error::SolverError;
use crate::port::outbound::solver::{IlpProblem, LpProblem, LpSolution, SolutionStatus, Solver};

/// Values inside this band count as selected.
pub const SELECTED_LOWER: Decimal = dec!(0.9);
pub const SELECTED_UPPER: Decimal = dec!(1.1);

/// Result of solving one lineup model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// An optimal lineup satisfying every rule.
    Selected(Lineup),
    /// No further lineup exists (or none was found within the time budget).
    Infeasible(SolutionStatus),
}

/// Variable index arithmetic for one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLayout {
    pub skaters: usize,
    pub goalies: usize,
    pub teams: usize,
    pub buckets: usize,
    pub stack_rules: usize,
}

impl VariableLayout {
    #[must_use]
    pub const fn skater(&self, i: usize) -> usize {
        i
    }

    #[must_use]
    pub const fn goalie(&self, g: usize) -> usize {
        self.skaters + g
    }

    #[must_use]
    pub const fn team_used(&self, t: usize) -> usize {
        self.skaters + self.goalies + t
    }

    #[must_use]
    pub const fn line_stacked(&self, rule: usize, bucket: usize) -> usize {
        self.skaters + self.goalies + self.teams + rule * self.buckets + bucket
    }

    /// Number of player variables (skaters then goalies).
    #[must_use]
    pub const fn players(&self) -> usize {
        self.skaters + self.goalies
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.players() + self.teams + self.stack_rules * self.buckets
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds and solves the lineup program against an accepted pool.
#[derive(Debug, Clone, Copy)]
pub struct LineupModel<'a> {
    catalog: &'a RosterCatalog,
    indicators: &'a Indicators,
    rules: &'a SiteRules,
    overlap: usize,
}

impl<'a> LineupModel<'a> {
    /// `overlap` is the most players a new lineup may share with any
    /// lineup already in the pool.
    #[must_use]
    pub const fn new(
        catalog: &'a RosterCatalog,
        indicators: &'a Indicators,
        rules: &'a SiteRules,
        overlap: usize,
    ) -> Self {
        Self {
            catalog,
            indicators,
            rules,
            overlap,
        }
    }

    #[must_use]
    pub fn layout(&self) -> VariableLayout {
        VariableLayout {
            skaters: self.catalog.skater_count(),
            goalies: self.catalog.goalie_count(),
            teams: self.indicators.team_count(),
            buckets: self.indicators.bucket_count(),
            stack_rules: self.rules.stacking.len(),
        }
    }

    /// Build the integer program excluding every lineup in `pool` beyond
    /// the overlap limit.
    #[must_use]
    pub fn build(&self, pool: &LineupPool) -> IlpProblem {
        let layout = self.layout();
        let n = layout.len();
        let row = || vec![Decimal::ZERO; n];
        let mut constraints = Vec::new();

        let skaters = self.catalog.skaters();
        let goalies = self.catalog.goalies();

        // Roster size.
        let mut skater_row = row();
        for i in 0..layout.skaters {
            skater_row[layout.skater(i)] = Decimal::ONE;
        }
        constraints.push(Constraint::eq(skater_row, count(self.rules.skater_count())));

        let mut goalie_row = row();
        for g in 0..layout.goalies {
            goalie_row[layout.goalie(g)] = Decimal::ONE;
        }
        constraints.push(Constraint::eq(goalie_row, count(self.rules.goalie_count())));

        // Position bounds.
        for bound in &self.rules.position_bounds {
            let mut coefficients = row();
            for (i, &eligible) in self.indicators.position_of(bound.position).iter().enumerate() {
                if eligible {
                    coefficients[layout.skater(i)] = Decimal::ONE;
                }
            }
            constraints.push(Constraint::geq(coefficients.clone(), Decimal::from(bound.min)));
            constraints.push(Constraint::leq(coefficients, Decimal::from(bound.max)));
        }

        // Salary cap.
        let mut salary = row();
        for (i, skater) in skaters.iter().enumerate() {
            salary[layout.skater(i)] = Decimal::from(skater.salary);
        }
        for (g, goalie) in goalies.iter().enumerate() {
            salary[layout.goalie(g)] = Decimal::from(goalie.salary);
        }
        constraints.push(Constraint::leq(salary, Decimal::from(self.rules.salary_cap)));

        // Team count: used_t <= sum_t and sum_t <= M * used_t.
        let team_m = Decimal::from(self.rules.team_big_m());
        let mut teams_used = row();
        for t in 0..layout.teams {
            let mut lower = row();
            let mut upper = row();
            for (i, membership) in self.indicators.team_of().iter().enumerate() {
                if membership[t] {
                    lower[layout.skater(i)] = -Decimal::ONE;
                    upper[layout.skater(i)] = Decimal::ONE;
                }
            }
            lower[layout.team_used(t)] = Decimal::ONE;
            upper[layout.team_used(t)] = -team_m;
            constraints.push(Constraint::leq(lower, Decimal::ZERO));
            constraints.push(Constraint::leq(upper, Decimal::ZERO));
            teams_used[layout.team_used(t)] = Decimal::ONE;
        }
        constraints.push(Constraint::geq(
            teams_used,
            Decimal::from(self.rules.min_distinct_teams),
        ));

        // Goalie exclusion: M * y_g + sum(skaters facing g) <= M.
        if self.rules.goalie_opponent_exclusion {
            let goalie_m = count(self.rules.skater_count());
            for g in 0..layout.goalies {
                let mut coefficients = row();
                coefficients[layout.goalie(g)] = goalie_m;
                for (i, facing) in self.indicators.opponent_of().iter().enumerate() {
                    if facing[g] {
                        coefficients[layout.skater(i)] = Decimal::ONE;
                    }
                }
                constraints.push(Constraint::leq(coefficients, goalie_m));
            }
        }

        // Stacking: p * z_b <= sum_b per bucket, sum(z) >= lines, per rule.
        for (r, rule) in self.rules.stacking.iter().enumerate() {
            let players = Decimal::from(rule.min_players);
            let mut stacked = row();
            for b in 0..layout.buckets {
                let mut coefficients = row();
                for (i, buckets) in self.indicators.line_slot().iter().enumerate() {
                    if buckets[b] {
                        coefficients[layout.skater(i)] = -Decimal::ONE;
                    }
                }
                coefficients[layout.line_stacked(r, b)] = players;
                constraints.push(Constraint::leq(coefficients, Decimal::ZERO));
                stacked[layout.line_stacked(r, b)] = Decimal::ONE;
            }
            constraints.push(Constraint::geq(stacked, Decimal::from(rule.min_lines)));
        }

        // Overlap with every accepted lineup.
        for lineup in pool {
            let mut coefficients = row();
            for &i in lineup.skaters() {
                coefficients[layout.skater(i)] = Decimal::ONE;
            }
            for &g in lineup.goalies() {
                coefficients[layout.goalie(g)] = Decimal::ONE;
            }
            constraints.push(Constraint::leq(coefficients, count(self.overlap)));
        }

        let mut objective = row();
        for (i, skater) in skaters.iter().enumerate() {
            objective[layout.skater(i)] = -skater.projected;
        }
        for (g, goalie) in goalies.iter().enumerate() {
            objective[layout.goalie(g)] = -goalie.projected;
        }

        IlpProblem::all_binary(LpProblem {
            objective,
            constraints,
            ..LpProblem::new(n)
        })
    }

    /// Solve for the next lineup.
    ///
    /// A failed solve is retried once on a freshly built model.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] when both attempts fail or the solver's
    /// optimal answer does not decode into a lineup of the right shape.
    pub fn solve(
        &self,
        solver: &dyn Solver,
        pool: &LineupPool,
    ) -> Result<SolveOutcome, SolverError> {
        match self.solve_once(solver, pool) {
            Err(first) => {
                warn!(solver = solver.name(), error = %first, "Solve failed, retrying once");
                self.solve_once(solver, pool)
            }
            outcome => outcome,
        }
    }

    fn solve_once(
        &self,
        solver: &dyn Solver,
        pool: &LineupPool,
    ) -> Result<SolveOutcome, SolverError> {
        let problem = self.build(pool);
        let started = Instant::now();
        let solution = solver.solve_ilp(&problem)?;
        debug!(
            solver = solver.name(),
            status = %solution.status,
            objective = %(-solution.objective),
            constraints = problem.lp.constraints.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Lineup model solved"
        );

        if !solution.is_optimal() {
            return Ok(SolveOutcome::Infeasible(solution.status));
        }
        self.decode(&solution).map(SolveOutcome::Selected)
    }

    /// Snap the player variables of an optimal solution into a lineup.
    fn decode(&self, solution: &LpSolution) -> Result<Lineup, SolverError> {
        let layout = self.layout();
        if solution.values.len() != layout.len() {
            return Err(SolverError::InconsistentSolution {
                kind: "variables",
                selected: solution.values.len(),
                expected: layout.len(),
            });
        }

        let assignment: Vec<bool> = solution.values[..layout.players()]
            .iter()
            .map(|v| (SELECTED_LOWER..=SELECTED_UPPER).contains(v))
            .collect();
        let lineup = Lineup::from_assignment(&assignment, layout.skaters);

        if lineup.skaters().len() != self.rules.skater_count() {
            return Err(SolverError::InconsistentSolution {
                kind: "skaters",
                selected: lineup.skaters().len(),
                expected: self.rules.skater_count(),
            });
        }
        if lineup.goalies().len() != self.rules.goalie_count() {
            return Err(SolverError::InconsistentSolution {
                kind: "goalies",
                selected: lineup.goalies().len(),
                expected: self.rules.goalie_count(),
            });
        }
        Ok(lineup)
    }
}

fn count(n: usize) -> Decimal {
    Decimal::from(n as u64)
}
