//! Re-exported APIs for consumers of the transfer crate.

pub use crate::error::ManeuverError;
pub use crate::geometry::{TransferEvaluation, TransferKind, TransferLeg};
pub use crate::maneuver::interplanetary::{
    capture_delta_v_with_orbit, ejection_angle_with_orbit, ejection_delta_v_with_orbit,
    ejection_velocity_with_orbit,
};
pub use crate::maneuver::landing::{LandingCost, landing_delta_v};
pub use crate::maneuver::launch::launch_delta_v;
pub use crate::maneuver::{
    Maneuver, ManeuverKind, ManeuverPlan, ManeuverRequest, recompute, recompute_with,
};
pub use crate::window::{Refinement, TransferWindow, WindowSearchConfig, find_transfer_window};
