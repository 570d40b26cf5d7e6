//! Solver port for binary integer programs.
//!
//! The lineup model is expressed in a backend-neutral form and handed to a
//! [`Solver`] implementation.
//!
//! # Overview
//!
//! - [`Solver`]: integer program solver interface
//! - [`LpProblem`] / [`IlpProblem`]: problem definitions
//! - [`LpSolution`]: solution representation

use rust_decimal::Decimal;

use crate::domain::constraint::{Constraint, VariableBounds};
use crate::error::SolverError;

/// Integer linear programming solver.
///
/// Implementations wrap a specific backend and always **minimise** the
/// objective. Callers that want to maximise negate their coefficients.
///
/// An infeasible, unbounded or timed-out model is a normal outcome reported
/// through [`SolutionStatus`]; `Err` is reserved for backend failures.
pub trait Solver: Send + Sync {
    /// Solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Solve an integer linear program.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Backend`] if the backend fails for a reason
    /// other than infeasibility, unboundedness or the time budget.
    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution, SolverError>;
}

/// Linear programming problem definition.
///
/// ```text
/// minimize    c^T * x
/// subject to  constraints
///             bounds on x
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LpProblem {
    /// Objective coefficients, one per variable.
    pub objective: Vec<Decimal>,

    /// Dense constraint rows.
    pub constraints: Vec<Constraint>,

    /// Lower and upper bounds for each variable.
    pub bounds: Vec<VariableBounds>,
}

impl LpProblem {
    /// Create a problem with `num_vars` variables, a zero objective and
    /// default (non-negative) bounds.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            objective: vec![Decimal::ZERO; num_vars],
            constraints: Vec::new(),
            bounds: vec![VariableBounds::default(); num_vars],
        }
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }
}

/// Integer linear programming problem definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IlpProblem {
    pub lp: LpProblem,

    /// Indices of variables constrained to integer values.
    pub integer_vars: Vec<usize>,
}

impl IlpProblem {
    /// Constrain every variable to {0, 1}.
    #[must_use]
    pub fn all_binary(mut lp: LpProblem) -> Self {
        lp.bounds = vec![VariableBounds::binary(); lp.num_vars()];
        let integer_vars: Vec<usize> = (0..lp.num_vars()).collect();
        Self { lp, integer_vars }
    }
}

/// Solution to an integer program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LpSolution {
    /// Raw variable values as reported by the backend. Empty unless optimal.
    pub values: Vec<Decimal>,

    /// Objective value at `values`.
    pub objective: Decimal,

    pub status: SolutionStatus,
}

impl LpSolution {
    /// A solution with no values and the given non-optimal status.
    #[must_use]
    pub const fn without_values(status: SolutionStatus) -> Self {
        Self {
            values: Vec::new(),
            objective: Decimal::ZERO,
            status,
        }
    }

    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

/// Termination status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Solver proved optimality.
    Optimal,

    /// No feasible solution exists.
    Infeasible,

    /// Objective is unbounded.
    Unbounded,

    /// The time budget ran out before optimality was proven.
    TimedOut,
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Optimal => "optimal",
            Self::Infeasible => "infeasible",
            Self::Unbounded => "unbounded",
            Self::TimedOut => "timed out",
        };
        f.write_str(s)
    }
}
