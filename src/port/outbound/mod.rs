//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts cover the integer program solver and the roster
//! input/lineup output plumbing.

pub mod roster;
pub mod solver;
