//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!   ┌─────────────┤   (model, generator)     ├──────────────┐
//!   │             └──────────────────────────┘              │
//!   ▼                          ▼                            ▼
//! ┌──────────┐         ┌──────────────┐             ┌────────────┐
//! │  Solver  │         │ RosterSource │             │ LineupSink │
//! │ (HiGHS)  │         │    (CSV)     │             │   (CSV)    │
//! └──────────┘         └──────────────┘             └────────────┘
//! ```

pub mod outbound;

pub use outbound::roster::{LineupSink, OutputMode, RosterSource};
pub use outbound::solver::{IlpProblem, LpProblem, LpSolution, SolutionStatus, Solver};
