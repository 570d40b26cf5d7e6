//! Solver factory.
//!
//! Provides factory functions for constructing the integer program solver
//! used by the generation loop.

use std::sync::Arc;
use std::time::Duration;

use crate::adapter::outbound::solver::highs::HiGHSSolver;
use crate::infrastructure::config::settings::OptimizerConfig;
use crate::port::outbound::solver::Solver;

/// Build the default solver: HiGHS with the configured per-solve budget.
pub fn build_solver(optimizer: &OptimizerConfig) -> Arc<dyn Solver> {
    build_solver_with_limit(optimizer.time_limit())
}

/// Build a HiGHS solver with an explicit per-solve budget.
pub fn build_solver_with_limit(time_limit: Duration) -> Arc<dyn Solver> {
    Arc::new(HiGHSSolver::with_time_limit(time_limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_solver_is_highs() {
        let solver = build_solver(&OptimizerConfig::default());
        assert_eq!(solver.name(), "highs");
    }
}
