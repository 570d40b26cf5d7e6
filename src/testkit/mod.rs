//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for skaters, goalies and whole slates.
//! - [`solver`] - [`ScriptedSolver`](solver::ScriptedSolver), a
//!   [`Solver`](crate::port::outbound::solver::Solver) that replays canned answers.

pub mod domain;
pub mod solver;
