//! Orbital maneuver planning for the Kerbol system.
//!
//! The member crates are re-exported here so front-ends only depend on this one.
//! [`mission`] turns body names and apsis heights into maneuver requests.

pub use kerbol_config as config;
pub use kerbol_core as core;
pub use kerbol_impulsive as impulsive;
pub use kerbol_orbits as orbits;
pub use kerbol_transfer as transfer;

pub mod mission;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
