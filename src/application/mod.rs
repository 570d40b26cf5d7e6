//! Application services (use cases).
//!
//! These services drive the lineup model through the solver port and
//! collect accepted lineups.

pub mod generator;
pub mod model;

pub use generator::{CancelFlag, GenerationReport, GenerationState, LineupGenerator};
pub use model::{LineupModel, SolveOutcome};
