//! Impulsive burn utilities: apsidal Hohmann transfers, hyperbolic ejection and capture,
//! and plane changes.

pub mod hyperbolic;
pub mod transfers;

pub use hyperbolic::{
    capture_delta_v, ejection_angle, ejection_delta_v, hyperbolic_periapsis_speed,
    plane_change_delta_v,
};
pub use transfers::{HohmannResult, TwoBurnResult, apsidal_two_burn, hohmann};
