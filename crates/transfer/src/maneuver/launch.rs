//! Ascent from the surface of a body into an orbit around it.

use kerbol_impulsive::apsidal_two_burn;
use kerbol_orbits::{Catalog, Orbit};

use super::{ManeuverKind, ManeuverPlan};
use crate::error::{Defined, ManeuverError};

/// Apoapsis tolerance when matching the body's parking orbit.
const PARKING_MATCH_M: f64 = 1.0;

/// Delta-v to reach `target` from the surface of its primary.
///
/// Bodies with a tabulated launch cost use it when the target is the circular parking
/// orbit. Otherwise the ascent is modelled as an ellipse from the surface to the target
/// periapsis height followed by a two-burn raise, credited with the surface rotation.
pub fn launch_delta_v(catalog: &Catalog, target: &Orbit) -> Result<f64, ManeuverError> {
    let body = target.primary_body(catalog).defined("launch body")?;
    let apoapsis = target.apoapsis(catalog).defined("target apoapsis")?;
    if let Some(tabulated) = body.launch_delta_v {
        if target.eccentricity.abs() < 1e-9
            && (apoapsis - body.parking_orbit_height).abs() < PARKING_MATCH_M
        {
            return Ok(tabulated);
        }
    }

    let rotation = body
        .surface_rotation_speed()
        .ok_or(ManeuverError::DegenerateOrbit("launch body has no rotation period"))?;
    let periapsis = target.periapsis(catalog).defined("target periapsis")?;

    let mut ascent = *target;
    ascent.set_apoapsis(periapsis, catalog)?;
    ascent.set_periapsis(0.0, catalog)?;

    let lift_off = ascent
        .relative_velocity_with_radius(body.radius, catalog)
        .defined("surface speed on the ascent ellipse")?;
    let raise = apsidal_two_burn(&ascent, target, catalog).defined("ascent two-burn cost")?;
    Ok(lift_off + raise.total_delta_v - rotation)
}

pub(crate) fn plan_launch(catalog: &Catalog, target: &Orbit) -> Result<ManeuverPlan, ManeuverError> {
    Ok(ManeuverPlan::new(
        ManeuverKind::Launch,
        launch_delta_v(catalog, target)?,
    ))
}
