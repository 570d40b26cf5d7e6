//! Mock [`Solver`] that replays a script of answers.
//!
//! Each call to `solve_ilp()` pops the next scripted step and records the
//! problem it was given. An exhausted script answers with a backend error.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rust_decimal::Decimal;

use crate::error::SolverError;
use crate::port::outbound::solver::{IlpProblem, LpSolution, SolutionStatus, Solver};

enum Step {
    Values(Vec<Decimal>),
    Status(SolutionStatus),
    Error(String),
}

#[derive(Default)]
pub struct ScriptedSolver {
    steps: Mutex<VecDeque<Step>>,
    problems: Mutex<Vec<IlpProblem>>,
    calls: AtomicUsize,
}

impl ScriptedSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next call as optimal with these raw values.
    pub fn then_values(self, values: Vec<Decimal>) -> Self {
        self.push(Step::Values(values))
    }

    /// Answer the next call with a non-optimal status.
    pub fn then_status(self, status: SolutionStatus) -> Self {
        self.push(Step::Status(status))
    }

    /// Fail the next call with a backend error.
    pub fn then_error(self, reason: &str) -> Self {
        self.push(Step::Error(reason.to_string()))
    }

    fn push(self, step: Step) -> Self {
        self.steps.lock().unwrap().push_back(step);
        self
    }

    /// Number of `solve_ilp` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every problem received, in call order.
    pub fn problems(&self) -> Vec<IlpProblem> {
        self.problems.lock().unwrap().clone()
    }
}

impl Solver for ScriptedSolver {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.problems.lock().unwrap().push(problem.clone());

        match self.steps.lock().unwrap().pop_front() {
            Some(Step::Values(values)) => {
                let objective = values
                    .iter()
                    .zip(&problem.lp.objective)
                    .map(|(v, c)| v * c)
                    .sum();
                Ok(LpSolution {
                    values,
                    objective,
                    status: SolutionStatus::Optimal,
                })
            }
            Some(Step::Status(status)) => Ok(LpSolution::without_values(status)),
            Some(Step::Error(reason)) => Err(SolverError::Backend {
                solver: self.name(),
                reason,
            }),
            None => Err(SolverError::Backend {
                solver: self.name(),
                reason: "script exhausted".to_string(),
            }),
        }
    }
}
