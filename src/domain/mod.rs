//! Site-agnostic domain logic: players, rule sets, indicators and lineups.
//!
//! Nothing in here performs I/O or talks to a solver.

pub mod catalog;
pub mod constraint;
pub mod error;
pub mod id;
pub mod indicator;
pub mod lineup;
pub mod player;
pub mod rules;
pub mod slot;

pub use catalog::RosterCatalog;
pub use id::TeamId;
pub use indicator::Indicators;
pub use lineup::{Lineup, LineupPool};
pub use player::{Goalie, Position, PositionSet, Skater};
pub use rules::{Site, SiteRules};
pub use slot::{FilledLineup, SlotMapper};
