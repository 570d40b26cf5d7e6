//! Component factory functions.

pub mod solver;
