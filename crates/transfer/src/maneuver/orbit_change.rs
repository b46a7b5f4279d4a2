//! Reshaping an orbit around the same body.

use kerbol_impulsive::apsidal_two_burn;
use kerbol_orbits::{Catalog, Orbit};

use super::{ManeuverKind, ManeuverPlan};
use crate::error::{Defined, ManeuverError};

pub(crate) fn plan_orbit_change(
    catalog: &Catalog,
    source: &Orbit,
    target: &Orbit,
) -> Result<ManeuverPlan, ManeuverError> {
    if source.primary != target.primary {
        return Err(ManeuverError::OrbitBodyMismatch("target"));
    }
    let burns = apsidal_two_burn(source, target, catalog).defined("orbit change cost")?;
    let mut plan = ManeuverPlan::new(ManeuverKind::OrbitChange, burns.total_delta_v);
    plan.ejection_delta_v = Some(burns.injection_delta_v);
    plan.capture_delta_v = Some(burns.arrival_delta_v);
    plan.travel_time = burns.transfer.period(catalog).map(|p| p / 2.0);
    plan.transfer_orbit = Some(burns.transfer);
    Ok(plan)
}
