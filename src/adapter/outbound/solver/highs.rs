//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is an open-source mixed-integer programming solver. The backend
//! is wrapped through the good_lp crate; each call builds a fresh good_lp
//! model from the neutral [`IlpProblem`].

use std::time::{Duration, Instant};

use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::trace;

use crate::domain::constraint::ConstraintSense;
use crate::error::SolverError;
use crate::port::outbound::solver::{IlpProblem, LpSolution, SolutionStatus, Solver};

/// HiGHS-based ILP solver with an optional per-solve time budget.
#[derive(Debug, Default, Clone)]
pub struct HiGHSSolver {
    time_limit: Option<Duration>,
}

impl HiGHSSolver {
    /// Create a solver without a time budget.
    #[must_use]
    pub const fn new() -> Self {
        Self { time_limit: None }
    }

    /// Stop each solve after `limit` and report it as timed out.
    #[must_use]
    pub const fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
        }
    }

    #[must_use]
    pub const fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

impl Solver for HiGHSSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution, SolverError> {
        let lp = &problem.lp;
        let n = lp.num_vars();

        if n == 0 {
            return Ok(LpSolution {
                values: vec![],
                objective: Decimal::ZERO,
                status: SolutionStatus::Optimal,
            });
        }

        let mut vars = variables!();
        let mut var_list = Vec::with_capacity(n);

        for (i, bounds) in lp.bounds.iter().enumerate() {
            let mut v = variable();
            if let Some(lb) = bounds.lower {
                v = v.min(lb.to_f64().unwrap_or(0.0));
            }
            if let Some(ub) = bounds.upper {
                v = v.max(ub.to_f64().unwrap_or(f64::INFINITY));
            }
            if problem.integer_vars.contains(&i) {
                v = v.integer();
            }
            var_list.push(vars.add(v));
        }

        let objective: Expression = var_list
            .iter()
            .zip(lp.objective.iter())
            .map(|(v, c)| c.to_f64().unwrap_or(0.0) * *v)
            .sum();

        let mut model = vars.minimise(&objective).using(highs);
        if let Some(limit) = self.time_limit {
            model = model.set_option("time_limit", limit.as_secs_f64());
        }

        for row in &lp.constraints {
            let lhs: Expression = var_list
                .iter()
                .zip(row.coefficients.iter())
                .filter(|(_, c)| !c.is_zero())
                .map(|(v, c)| c.to_f64().unwrap_or(0.0) * *v)
                .sum();
            let rhs = row.rhs.to_f64().unwrap_or(0.0);

            model = match row.sense {
                ConstraintSense::GreaterEqual => model.with(constraint!(lhs >= rhs)),
                ConstraintSense::LessEqual => model.with(constraint!(lhs <= rhs)),
                ConstraintSense::Equal => model.with(constraint!(lhs == rhs)),
            };
        }

        let started = Instant::now();
        let result = model.solve();
        let elapsed = started.elapsed();
        let over_budget = self.time_limit.is_some_and(|limit| elapsed >= limit);
        trace!(
            vars = n,
            constraints = lp.constraints.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "HiGHS solve finished"
        );

        match result {
            // An answer returned after the budget expired is not proven optimal.
            Ok(_) if over_budget => Ok(LpSolution::without_values(SolutionStatus::TimedOut)),
            Ok(solution) => {
                let values: Vec<Decimal> = var_list
                    .iter()
                    .map(|v| Decimal::try_from(solution.value(*v)).unwrap_or(Decimal::ZERO))
                    .collect();
                let objective: Decimal = values
                    .iter()
                    .zip(lp.objective.iter())
                    .map(|(v, c)| v * c)
                    .sum();

                Ok(LpSolution {
                    values,
                    objective,
                    status: SolutionStatus::Optimal,
                })
            }
            Err(ResolutionError::Infeasible) => {
                Ok(LpSolution::without_values(SolutionStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(LpSolution::without_values(SolutionStatus::Unbounded))
            }
            Err(_) if over_budget => Ok(LpSolution::without_values(SolutionStatus::TimedOut)),
            Err(err) => Err(SolverError::Backend {
                solver: self.name(),
                reason: err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constraint::Constraint;
    use crate::port::outbound::solver::LpProblem;
    use rust_decimal_macros::dec;

    #[test]
    fn test_solver_name() {
        assert_eq!(HiGHSSolver::new().name(), "highs");
    }

    #[test]
    fn test_time_limit_is_recorded() {
        let solver = HiGHSSolver::with_time_limit(Duration::from_secs(30));
        assert_eq!(solver.time_limit(), Some(Duration::from_secs(30)));
        assert_eq!(HiGHSSolver::new().time_limit(), None);
    }

    #[test]
    fn test_binary_ilp() {
        // Minimize: -x - y (maximize x + y)
        // Subject to: x + y <= 1
        let lp = LpProblem {
            objective: vec![-Decimal::ONE, -Decimal::ONE],
            constraints: vec![Constraint::leq(vec![Decimal::ONE, Decimal::ONE], Decimal::ONE)],
            ..LpProblem::new(2)
        };

        let solution = HiGHSSolver::new()
            .solve_ilp(&IlpProblem::all_binary(lp))
            .unwrap();

        assert!(solution.is_optimal());
        let sum: Decimal = solution.values.iter().sum();
        assert!((sum - Decimal::ONE).abs() < dec!(0.01), "sum should be 1, got {sum}");
        assert!((solution.objective + Decimal::ONE).abs() < dec!(0.01));
    }

    #[test]
    fn test_knapsack_picks_best_pair() {
        // Maximize 5a + 4b + 3c with weights 4, 3, 2 and capacity 5.
        let lp = LpProblem {
            objective: vec![dec!(-5), dec!(-4), dec!(-3)],
            constraints: vec![Constraint::leq(vec![dec!(4), dec!(3), dec!(2)], dec!(5))],
            ..LpProblem::new(3)
        };

        let solution = HiGHSSolver::new()
            .solve_ilp(&IlpProblem::all_binary(lp))
            .unwrap();

        assert!(solution.is_optimal());
        let picked: Vec<bool> = solution.values.iter().map(|v| *v > dec!(0.5)).collect();
        assert_eq!(picked, [false, true, true]);
    }

    #[test]
    fn test_equality_constraint() {
        // Exactly two of three binaries, cheapest first.
        let lp = LpProblem {
            objective: vec![dec!(3), dec!(1), dec!(2)],
            constraints: vec![Constraint::eq(vec![Decimal::ONE; 3], dec!(2))],
            ..LpProblem::new(3)
        };

        let solution = HiGHSSolver::new()
            .solve_ilp(&IlpProblem::all_binary(lp))
            .unwrap();

        assert!(solution.is_optimal());
        assert!(solution.values[0].abs() < dec!(0.01));
        assert!((solution.objective - dec!(3)).abs() < dec!(0.01));
    }

    #[test]
    fn test_infeasible_is_a_status_not_an_error() {
        // x + y >= 3 with binaries cannot hold.
        let lp = LpProblem {
            constraints: vec![Constraint::geq(vec![Decimal::ONE, Decimal::ONE], dec!(3))],
            ..LpProblem::new(2)
        };

        let solution = HiGHSSolver::new()
            .solve_ilp(&IlpProblem::all_binary(lp))
            .unwrap();

        assert!(matches!(
            solution.status,
            SolutionStatus::Infeasible | SolutionStatus::Unbounded
        ));
        assert!(solution.values.is_empty());
    }

    #[test]
    fn test_empty_problem() {
        let solution = HiGHSSolver::new()
            .solve_ilp(&IlpProblem::all_binary(LpProblem::new(0)))
            .unwrap();

        assert!(solution.is_optimal());
        assert!(solution.values.is_empty());
    }
}
