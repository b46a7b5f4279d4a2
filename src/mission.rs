//! Builds maneuver requests from body names and apsis heights.

use kerbol_orbits::{Body, Catalog, Orbit, OrbitError};
use kerbol_transfer::{ManeuverError, ManeuverPlan, ManeuverRequest, WindowSearchConfig};
use thiserror::Error;

/// Orbit heights above the body's surface; a missing value defaults to the other
/// one, and both default to the body's parking orbit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Apsides {
    pub periapsis: Option<f64>,
    pub apoapsis: Option<f64>,
}

impl Apsides {
    fn orbit_around(&self, body: &Body) -> Result<Orbit, OrbitError> {
        let periapsis = self
            .periapsis
            .or(self.apoapsis)
            .unwrap_or(body.parking_orbit_height);
        let apoapsis = self.apoapsis.unwrap_or(periapsis);
        Orbit::with_apsides(body, periapsis, apoapsis)
    }
}

/// What the user asked for, in catalog terms.
#[derive(Debug, Clone, Default)]
pub struct MissionConfig {
    /// Body the craft starts at (or launches from).
    pub from: Option<String>,
    /// Body the craft should end at. Defaults to `from`.
    pub to: Option<String>,
    pub source: Apsides,
    pub target: Apsides,
    /// Start on the surface instead of in orbit.
    pub launch: bool,
    /// End on the surface instead of in orbit.
    pub land: bool,
    pub aerobrake: bool,
    pub start_time: f64,
}

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("body '{0}' not found in catalog")]
    UnknownBody(String),
    #[error("no body given; pass a departure or destination body")]
    NoBody,
    #[error("cannot launch and land in the same maneuver")]
    LaunchAndLand,
    #[error("launches and landings stay at one body, got '{0}' and '{1}'")]
    SurfaceBodyMismatch(String, String),
    #[error(transparent)]
    Orbit(#[from] OrbitError),
    #[error(transparent)]
    Maneuver(#[from] ManeuverError),
}

fn find<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Body, MissionError> {
    catalog
        .by_name(name)
        .ok_or_else(|| MissionError::UnknownBody(name.to_string()))
}

/// Translate the configuration into a maneuver request.
pub fn build_request(
    catalog: &Catalog,
    config: &MissionConfig,
) -> Result<ManeuverRequest, MissionError> {
    if config.launch && config.land {
        return Err(MissionError::LaunchAndLand);
    }
    let from = config.from.as_deref().or(config.to.as_deref()).ok_or(MissionError::NoBody)?;
    let to = config.to.as_deref().unwrap_or(from);
    let source = find(catalog, from)?;
    let target = find(catalog, to)?;
    if (config.launch || config.land) && source.id != target.id {
        return Err(MissionError::SurfaceBodyMismatch(
            source.name.clone(),
            target.name.clone(),
        ));
    }

    Ok(ManeuverRequest {
        source_body: Some(source.id),
        source_orbit: (!config.launch)
            .then(|| config.source.orbit_around(source))
            .transpose()?,
        target_body: Some(target.id),
        target_orbit: (!config.land)
            .then(|| config.target.orbit_around(target))
            .transpose()?,
        aerobrake: config.aerobrake,
        initial_time: config.start_time,
    })
}

/// Build the request and compute its plan.
pub fn plan_mission(
    catalog: &Catalog,
    config: &MissionConfig,
    search: &WindowSearchConfig,
) -> Result<(ManeuverRequest, ManeuverPlan), MissionError> {
    let request = build_request(catalog, config)?;
    let plan = kerbol_transfer::recompute_with(catalog, &request, search)?;
    Ok((request, plan))
}
