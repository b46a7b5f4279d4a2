//! Maneuver budgeting: classify a request and compute its delta-v plan.
//!
//! A request names where the craft is (a source orbit) and where it should end up (a
//! target orbit), either of which may be absent:
//!
//! | source orbit | target orbit | bodies    | kind                     |
//! |--------------|--------------|-----------|--------------------------|
//! | absent       | absent       |           | [`ManeuverKind::Empty`]  |
//! | absent       | present      |           | [`ManeuverKind::Launch`] |
//! | present      | absent       |           | [`ManeuverKind::Landing`]|
//! | present      | present      | same      | [`ManeuverKind::OrbitChange`] |
//! | present      | present      | different | [`ManeuverKind::Transfer`] |

pub mod interplanetary;
pub mod landing;
pub mod launch;
pub mod orbit_change;

use std::fmt;

use kerbol_orbits::{BodyId, Catalog, Orbit};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ManeuverError;
use crate::geometry::TransferKind;
use crate::window::WindowSearchConfig;

/// Inputs of a maneuver. Bodies default to the primaries of the respective orbits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ManeuverRequest {
    pub source_body: Option<BodyId>,
    pub source_orbit: Option<Orbit>,
    pub target_body: Option<BodyId>,
    pub target_orbit: Option<Orbit>,
    /// Replace the propulsive capture with atmospheric braking where possible.
    pub aerobrake: bool,
    /// Earliest departure time, in seconds since the universal epoch.
    pub initial_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ManeuverKind {
    Empty,
    Launch,
    Landing,
    OrbitChange,
    Transfer,
}

impl fmt::Display for ManeuverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ManeuverKind::Empty => "empty maneuver",
            ManeuverKind::Launch => "launch",
            ManeuverKind::Landing => "landing",
            ManeuverKind::OrbitChange => "orbit change",
            ManeuverKind::Transfer => "transfer",
        };
        f.write_str(label)
    }
}

/// Derived outputs of a maneuver. Fields that do not apply to the kind are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ManeuverPlan {
    pub kind: ManeuverKind,
    pub delta_v: f64,
    pub ejection_delta_v: Option<f64>,
    pub capture_delta_v: Option<f64>,
    pub plane_change_delta_v: Option<f64>,
    pub hyperbolic_excess_escape_velocity: Option<f64>,
    pub hyperbolic_excess_capture_velocity: Option<f64>,
    pub ejection_velocity: Option<f64>,
    pub ejection_angle: Option<f64>,
    /// Departure time of the chosen window.
    pub transfer_time: Option<f64>,
    pub travel_time: Option<f64>,
    /// Phase angle the bodies must have at departure.
    pub transfer_phase_angle: Option<f64>,
    /// Phase angle at the request's initial time.
    pub current_phase_angle: Option<f64>,
    pub transfer_kind: Option<TransferKind>,
    pub transfer_orbit: Option<Orbit>,
    pub window_iterations: Option<usize>,
}

impl ManeuverPlan {
    pub(crate) fn new(kind: ManeuverKind, delta_v: f64) -> Self {
        Self {
            kind,
            delta_v,
            ejection_delta_v: None,
            capture_delta_v: None,
            plane_change_delta_v: None,
            hyperbolic_excess_escape_velocity: None,
            hyperbolic_excess_capture_velocity: None,
            ejection_velocity: None,
            ejection_angle: None,
            transfer_time: None,
            travel_time: None,
            transfer_phase_angle: None,
            current_phase_angle: None,
            transfer_kind: None,
            transfer_orbit: None,
            window_iterations: None,
        }
    }
}

impl ManeuverRequest {
    /// Body the craft departs from.
    pub fn resolved_source_body(&self) -> Option<BodyId> {
        self.source_body
            .or_else(|| self.source_orbit.and_then(|o| o.primary))
    }

    /// Body the craft arrives at.
    pub fn resolved_target_body(&self) -> Option<BodyId> {
        self.target_body
            .or_else(|| self.target_orbit.and_then(|o| o.primary))
    }

    /// True when the source and target bodies differ.
    pub fn is_transfer(&self) -> bool {
        match (self.resolved_source_body(), self.resolved_target_body()) {
            (Some(source), Some(target)) => source != target,
            _ => false,
        }
    }

    pub fn kind(&self) -> ManeuverKind {
        match (self.source_orbit.is_some(), self.target_orbit.is_some()) {
            (false, false) => ManeuverKind::Empty,
            (false, true) => ManeuverKind::Launch,
            (true, false) => ManeuverKind::Landing,
            (true, true) if self.is_transfer() => ManeuverKind::Transfer,
            (true, true) => ManeuverKind::OrbitChange,
        }
    }

    /// Human-readable summary such as "Transfer to Duna".
    pub fn description(&self, catalog: &Catalog) -> String {
        let name = |id: Option<BodyId>| {
            id.and_then(|id| catalog.body(id))
                .map_or_else(|| "unknown body".to_string(), |b| b.name.clone())
        };
        match self.kind() {
            ManeuverKind::Empty => "Empty maneuver".to_string(),
            ManeuverKind::Launch => format!("Launch from {}", name(self.resolved_target_body())),
            ManeuverKind::Landing => format!("Land on {}", name(self.resolved_source_body())),
            ManeuverKind::OrbitChange => {
                format!("Change {} orbit", name(self.resolved_source_body()))
            }
            ManeuverKind::Transfer => format!("Transfer to {}", name(self.resolved_target_body())),
        }
    }
}

/// Compute the plan for `request` with the default window search.
pub fn recompute(catalog: &Catalog, request: &ManeuverRequest) -> Result<ManeuverPlan, ManeuverError> {
    recompute_with(catalog, request, &WindowSearchConfig::default())
}

pub fn recompute_with(
    catalog: &Catalog,
    request: &ManeuverRequest,
    search: &WindowSearchConfig,
) -> Result<ManeuverPlan, ManeuverError> {
    let kind = request.kind();
    debug!(%kind, initial_time = request.initial_time, "recomputing maneuver");
    let plan = match (kind, request.source_orbit, request.target_orbit) {
        (ManeuverKind::Launch, _, Some(target)) => launch::plan_launch(catalog, &target)?,
        (ManeuverKind::Landing, Some(source), _) => {
            landing::plan_landing(catalog, &source, request.aerobrake)?
        }
        (ManeuverKind::OrbitChange, Some(source), Some(target)) => {
            orbit_change::plan_orbit_change(catalog, &source, &target)?
        }
        (ManeuverKind::Transfer, Some(source), Some(target)) => {
            interplanetary::plan_transfer(catalog, request, &source, &target, search)?
        }
        _ => return Err(ManeuverError::Empty),
    };
    debug!(%kind, delta_v = plan.delta_v, "maneuver computed");
    Ok(plan)
}

/// A request together with its most recent successfully computed plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Maneuver {
    pub request: ManeuverRequest,
    plan: Option<ManeuverPlan>,
}

impl Maneuver {
    pub fn new(request: ManeuverRequest) -> Self {
        Self {
            request,
            plan: None,
        }
    }

    pub fn plan(&self) -> Option<&ManeuverPlan> {
        self.plan.as_ref()
    }

    /// Recompute the plan. On failure the previous plan is kept.
    pub fn recompute(&mut self, catalog: &Catalog) -> Result<&ManeuverPlan, ManeuverError> {
        self.recompute_with(catalog, &WindowSearchConfig::default())
    }

    pub fn recompute_with(
        &mut self,
        catalog: &Catalog,
        search: &WindowSearchConfig,
    ) -> Result<&ManeuverPlan, ManeuverError> {
        match recompute_with(catalog, &self.request, search) {
            Ok(plan) => Ok(&*self.plan.insert(plan)),
            Err(err) => {
                warn!(%err, "maneuver could not be computed, keeping the previous plan");
                Err(err)
            }
        }
    }

    pub fn description(&self, catalog: &Catalog) -> String {
        self.request.description(catalog)
    }
}
