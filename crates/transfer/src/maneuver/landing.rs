//! Descent from an orbit to the surface of its primary.

use kerbol_impulsive::apsidal_two_burn;
use kerbol_orbits::{Catalog, Orbit};

use super::{ManeuverKind, ManeuverPlan};
use crate::error::{Defined, ManeuverError};

/// Breakdown of a landing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingCost {
    /// Burn at periapsis lowering the far apsis to the surface.
    pub deorbit_delta_v: f64,
    /// Braking at the surface, net of the ground's rotation. Zero when aerobraking.
    pub touchdown_delta_v: f64,
    pub total_delta_v: f64,
}

/// Delta-v to land from `source` on its primary.
pub fn landing_delta_v(
    catalog: &Catalog,
    source: &Orbit,
    aerobrake: bool,
) -> Result<LandingCost, ManeuverError> {
    let body = source.primary_body(catalog).defined("landing body")?;
    let periapsis = source.periapsis(catalog).defined("source periapsis")?;
    let rotation = body
        .surface_rotation_speed()
        .ok_or(ManeuverError::DegenerateOrbit("landing body has no rotation period"))?;

    let mut descent = *source;
    descent.set_apoapsis(periapsis, catalog)?;
    descent.set_periapsis(0.0, catalog)?;

    let deorbit = apsidal_two_burn(source, &descent, catalog)
        .defined("deorbit cost")?
        .total_delta_v;

    if aerobrake && body.has_atmosphere() {
        let total = (deorbit - rotation).max(0.0);
        return Ok(LandingCost {
            deorbit_delta_v: deorbit,
            touchdown_delta_v: 0.0,
            total_delta_v: total,
        });
    }

    let impact = descent
        .relative_velocity_with_radius(body.radius, catalog)
        .defined("surface speed on the descent ellipse")?;
    let touchdown = impact - rotation;
    Ok(LandingCost {
        deorbit_delta_v: deorbit,
        touchdown_delta_v: touchdown,
        total_delta_v: deorbit + touchdown,
    })
}

pub(crate) fn plan_landing(
    catalog: &Catalog,
    source: &Orbit,
    aerobrake: bool,
) -> Result<ManeuverPlan, ManeuverError> {
    let cost = landing_delta_v(catalog, source, aerobrake)?;
    let mut plan = ManeuverPlan::new(ManeuverKind::Landing, cost.total_delta_v);
    plan.ejection_delta_v = Some(cost.deorbit_delta_v);
    plan.capture_delta_v = Some(cost.touchdown_delta_v);
    Ok(plan)
}
