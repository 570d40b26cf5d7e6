//! Iterative lineup generation.
//!
//! Each iteration solves a fresh [`LineupModel`] against the lineups
//! accepted so far, so every new lineup shares at most `overlap` players
//! with each earlier one. The loop stops when the requested count is
//! reached, when no further lineup exists, or when cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::model::{LineupModel, SolveOutcome};
use crate::domain::catalog::RosterCatalog;
use crate::domain::indicator::Indicators;
use crate::domain::lineup::{Lineup, LineupPool};
use crate::domain::rules::SiteRules;
use crate::error::Result;
use crate::port::outbound::solver::Solver;

/// Where a generation run is, or why it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Running,
    /// The requested number of lineups was produced.
    Complete,
    /// The model became infeasible before the requested count.
    Infeasible,
    /// Cancellation was requested between iterations.
    Cancelled,
}

impl std::fmt::Display for GenerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Complete => "complete",
            Self::Infeasible => "infeasible",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Shared cancellation signal, checked between iterations.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub pool: LineupPool,
    pub requested: usize,
    pub state: GenerationState,
}

impl GenerationReport {
    #[must_use]
    pub fn produced(&self) -> usize {
        self.pool.len()
    }
}

/// Produces a pool of distinct lineups for one catalog and rule set.
pub struct LineupGenerator<'a> {
    catalog: &'a RosterCatalog,
    indicators: Indicators,
    rules: &'a SiteRules,
    solver: &'a dyn Solver,
    requested: usize,
    overlap: usize,
    cancel: CancelFlag,
}

impl<'a> LineupGenerator<'a> {
    /// Defaults to one lineup with no overlap limit beyond the roster size.
    #[must_use]
    pub fn new(catalog: &'a RosterCatalog, rules: &'a SiteRules, solver: &'a dyn Solver) -> Self {
        Self {
            catalog,
            indicators: Indicators::build(catalog),
            rules,
            solver,
            requested: 1,
            overlap: rules.roster_size(),
            cancel: CancelFlag::new(),
        }
    }

    #[must_use]
    pub const fn lineups(mut self, requested: usize) -> Self {
        self.requested = requested;
        self
    }

    #[must_use]
    pub const fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    #[must_use]
    pub fn cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub const fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    /// Run the loop without progress reporting.
    ///
    /// # Errors
    ///
    /// See [`generate_with_progress`](Self::generate_with_progress).
    #[allow(clippy::result_large_err)]
    pub fn generate(&self) -> Result<GenerationReport> {
        self.generate_with_progress(|_, _| {})
    }

    /// Run the loop, calling `on_lineup` with each accepted lineup and the
    /// number produced so far.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the rule set is inconsistent,
    /// before anything is solved, and a solver error when the solver fails
    /// twice in a row.
    #[allow(clippy::result_large_err)]
    pub fn generate_with_progress<F>(&self, mut on_lineup: F) -> Result<GenerationReport>
    where
        F: FnMut(&Lineup, usize),
    {
        self.rules.validate()?;

        info!(
            skaters = self.catalog.skater_count(),
            goalies = self.catalog.goalie_count(),
            teams = self.indicators.team_count(),
            buckets = self.indicators.bucket_count(),
            requested = self.requested,
            overlap = self.overlap,
            site = %self.rules.name,
            "Starting lineup generation"
        );

        let model = LineupModel::new(self.catalog, &self.indicators, self.rules, self.overlap);
        let mut pool = LineupPool::new();
        let mut state = GenerationState::Running;

        while state == GenerationState::Running {
            if pool.len() >= self.requested {
                state = GenerationState::Complete;
                break;
            }
            if self.cancel.is_cancelled() {
                state = GenerationState::Cancelled;
                break;
            }

            match model.solve(self.solver, &pool)? {
                SolveOutcome::Selected(lineup) => {
                    debug!(
                        lineup = pool.len() + 1,
                        projected = %lineup.projected(self.catalog),
                        salary = lineup.salary(self.catalog),
                        "Lineup accepted"
                    );
                    pool.push(lineup);
                    if let Some(last) = pool.as_slice().last() {
                        on_lineup(last, pool.len());
                    }
                }
                SolveOutcome::Infeasible(status) => {
                    warn!(
                        produced = pool.len(),
                        requested = self.requested,
                        %status,
                        "No further lineup satisfies the rules, stopping early"
                    );
                    state = GenerationState::Infeasible;
                }
            }
        }

        info!(
            produced = pool.len(),
            requested = self.requested,
            %state,
            "Lineup generation finished"
        );

        Ok(GenerationReport {
            pool,
            requested: self.requested,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::Position;
    use crate::domain::rules::PositionBound;
    use crate::error::{ConfigError, Error, SolverError};
    use crate::port::outbound::solver::SolutionStatus;
    use crate::testkit::domain::toy_catalog;
    use crate::testkit::solver::ScriptedSolver;
    use rust_decimal::Decimal;

    fn optimum_values(extra: usize) -> Vec<Decimal> {
        // 10 players followed by 3 team and 24 stack variables.
        let mut values = vec![Decimal::ZERO; 37];
        for i in [0, 1, 2, 3, 4, 5, 6, extra, 9] {
            values[i] = Decimal::ONE;
        }
        values
    }

    #[test]
    fn stops_when_requested_count_is_reached() {
        let catalog = toy_catalog();
        let rules = SiteRules::draftkings();
        let solver = ScriptedSolver::new()
            .then_values(optimum_values(7))
            .then_values(optimum_values(8));

        let mut seen = Vec::new();
        let report = LineupGenerator::new(&catalog, &rules, &solver)
            .lineups(2)
            .overlap(8)
            .generate_with_progress(|_, produced| seen.push(produced))
            .unwrap();

        assert_eq!(report.state, GenerationState::Complete);
        assert_eq!(report.produced(), 2);
        assert_eq!(report.requested, 2);
        assert_eq!(seen, [1, 2]);
        assert_eq!(solver.calls(), 2);

        // The second model carries one overlap row for the first lineup.
        let problems = solver.problems();
        assert_eq!(
            problems[1].lp.constraints.len(),
            problems[0].lp.constraints.len() + 1
        );
    }

    #[test]
    fn infeasible_stop_keeps_accepted_lineups() {
        let catalog = toy_catalog();
        let rules = SiteRules::draftkings();
        let solver = ScriptedSolver::new()
            .then_values(optimum_values(7))
            .then_status(SolutionStatus::Infeasible);

        let report = LineupGenerator::new(&catalog, &rules, &solver)
            .lineups(5)
            .overlap(4)
            .generate()
            .unwrap();

        assert_eq!(report.state, GenerationState::Infeasible);
        assert_eq!(report.produced(), 1);
        assert_eq!(report.requested, 5);
    }

    #[test]
    fn cancellation_is_checked_between_iterations() {
        let catalog = toy_catalog();
        let rules = SiteRules::draftkings();
        let solver = ScriptedSolver::new()
            .then_values(optimum_values(7))
            .then_values(optimum_values(8));
        let cancel = CancelFlag::new();

        let report = LineupGenerator::new(&catalog, &rules, &solver)
            .lineups(2)
            .cancel_flag(cancel.clone())
            .generate_with_progress(|_, _| cancel.cancel())
            .unwrap();

        assert_eq!(report.state, GenerationState::Cancelled);
        assert_eq!(report.produced(), 1);
        assert_eq!(solver.calls(), 1);
    }

    #[test]
    fn zero_requested_is_immediately_complete() {
        let catalog = toy_catalog();
        let rules = SiteRules::draftkings();
        let solver = ScriptedSolver::new();

        let report = LineupGenerator::new(&catalog, &rules, &solver)
            .lineups(0)
            .generate()
            .unwrap();

        assert_eq!(report.state, GenerationState::Complete);
        assert_eq!(report.produced(), 0);
        assert_eq!(solver.calls(), 0);
    }

    #[test]
    fn repeated_backend_failure_is_fatal() {
        let catalog = toy_catalog();
        let rules = SiteRules::draftkings();
        let solver = ScriptedSolver::new().then_error("down").then_error("still down");

        let err = LineupGenerator::new(&catalog, &rules, &solver)
            .lineups(3)
            .generate()
            .unwrap_err();

        assert!(matches!(err, Error::Solver(SolverError::Backend { .. })));
    }

    #[test]
    fn inconsistent_rules_fail_before_any_solve() {
        let catalog = toy_catalog();
        let mut rules = SiteRules::draftkings();
        // Minimums of 3 + 4 + 3 cannot fit eight skater slots.
        rules.position_bounds = vec![
            PositionBound::new(Position::Center, 3, 3),
            PositionBound::new(Position::Wing, 4, 4),
            PositionBound::new(Position::Defense, 3, 3),
        ];
        let solver = ScriptedSolver::new().then_values(optimum_values(7));

        let err = LineupGenerator::new(&catalog, &rules, &solver)
            .lineups(1)
            .generate()
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "position_bounds",
                ..
            })
        ));
        assert_eq!(solver.calls(), 0);
    }

    #[test]
    fn cancel_flag_is_shared_between_clones() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }
}
