//! Linestack - NHL daily-fantasy lineup optimizer.
//!
//! Builds a binary integer program over a slate of skaters and goalies and
//! solves it repeatedly, each time requiring the new lineup to differ from
//! every earlier one, to produce a pool of high-projection lineups that
//! satisfy a contest site's salary cap, roster shape and stacking rules.
//!
//! # Architecture
//!
//! - [`domain`] - Players, catalog, site rules, indicator tables, lineups
//!   and slot assignment
//! - [`port`] - Solver, roster source and lineup sink interfaces
//! - [`application`] - Model construction and the generation loop
//! - [`adapter`] - HiGHS solver, CSV files and the command-line interface
//! - [`infrastructure`] - Configuration, logging and factories
//!
//! # Example
//!
//! ```no_run
//! use linestack::adapter::outbound::solver::HiGHSSolver;
//! use linestack::application::generator::LineupGenerator;
//! use linestack::domain::catalog::RosterCatalog;
//! use linestack::domain::rules::SiteRules;
//!
//! # fn load() -> RosterCatalog { unimplemented!() }
//! let catalog = load();
//! let rules = SiteRules::draftkings();
//! let solver = HiGHSSolver::new();
//! let report = LineupGenerator::new(&catalog, &rules, &solver)
//!     .lineups(20)
//!     .overlap(4)
//!     .generate()
//!     .unwrap();
//! println!("{} lineups ({})", report.produced(), report.state);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
