//! Transfer planning between orbits of a body catalog: geometry, window search and
//! maneuver delta-v budgets.

pub mod error;
pub mod geometry;
pub mod maneuver;
pub mod window;

pub use facade::*;

mod facade;
