//! Transfers between bodies: window search plus patched-conic escape and capture.

use std::f64::consts::PI;

use kerbol_core::angle::normalize;
use kerbol_impulsive::{capture_delta_v, ejection_angle, ejection_delta_v, hyperbolic_periapsis_speed};
use kerbol_orbits::{BodyId, Catalog, Orbit};
use tracing::debug;

use super::{ManeuverKind, ManeuverPlan, ManeuverRequest};
use crate::error::{Defined, ManeuverError};
use crate::geometry::{TransferKind, TransferLeg};
use crate::window::{TransferWindow, WindowSearchConfig, find_transfer_window};

/// Periapsis radius of `orbit` and the gravitational parameter of its primary.
fn periapsis_radius(orbit: &Orbit, catalog: &Catalog) -> Result<(f64, f64), ManeuverError> {
    let mu = orbit.gravitational_parameter(catalog).defined("gravitational parameter")?;
    let radius = orbit.primary_radius(catalog).defined("primary radius")?
        + orbit.periapsis(catalog).defined("periapsis")?;
    Ok((mu, radius))
}

/// Speed at the periapsis of an escape hyperbola leaving from the periapsis of `orbit`.
pub fn ejection_velocity_with_orbit(
    v_infinity: f64,
    orbit: &Orbit,
    catalog: &Catalog,
) -> Result<f64, ManeuverError> {
    let (mu, radius) = periapsis_radius(orbit, catalog)?;
    Ok(hyperbolic_periapsis_speed(mu, radius, v_infinity))
}

/// Escape burn from the periapsis of `orbit` for hyperbolic excess `v_infinity`.
pub fn ejection_delta_v_with_orbit(
    v_infinity: f64,
    orbit: &Orbit,
    catalog: &Catalog,
) -> Result<f64, ManeuverError> {
    let (mu, radius) = periapsis_radius(orbit, catalog)?;
    let orbital = orbit
        .relative_velocity_with_radius(radius, catalog)
        .defined("parking orbit speed")?;
    Ok(ejection_delta_v(mu, radius, v_infinity, orbital))
}

/// Capture burn into `orbit`, arriving at its periapsis with hyperbolic excess `v_infinity`.
pub fn capture_delta_v_with_orbit(
    v_infinity: f64,
    orbit: &Orbit,
    catalog: &Catalog,
) -> Result<f64, ManeuverError> {
    let (mu, radius) = periapsis_radius(orbit, catalog)?;
    let orbital = orbit
        .relative_velocity_with_radius(radius, catalog)
        .defined("capture orbit speed")?;
    Ok(capture_delta_v(mu, radius, v_infinity, orbital))
}

/// Angle from the primary's prograde vector at which to burn when escaping from `orbit`.
///
/// An `inward` escape leaves against the primary's motion, half a turn further round.
pub fn ejection_angle_with_orbit(
    v_infinity: f64,
    orbit: &Orbit,
    inward: bool,
    catalog: &Catalog,
) -> Result<Option<f64>, ManeuverError> {
    let (mu, radius) = periapsis_radius(orbit, catalog)?;
    let speed = hyperbolic_periapsis_speed(mu, radius, v_infinity);
    let offset = if inward { PI } else { 0.0 };
    Ok(ejection_angle(mu, radius, speed).map(|angle| normalize(angle + offset)))
}

impl ManeuverPlan {
    /// Total delta-v of this transfer if it departed from `orbit` instead.
    ///
    /// Returns `None` for plans that are not hyperbolic departures.
    pub fn delta_v_with_orbit(
        &self,
        orbit: &Orbit,
        catalog: &Catalog,
    ) -> Result<Option<f64>, ManeuverError> {
        if self.ejection_velocity.is_none() {
            return Ok(None);
        }
        let Some(v_infinity) = self.hyperbolic_excess_escape_velocity else {
            return Ok(None);
        };
        let ejection = ejection_delta_v_with_orbit(v_infinity, orbit, catalog)?;
        Ok(Some(
            ejection
                + self.plane_change_delta_v.unwrap_or(0.0)
                + self.capture_delta_v.unwrap_or(0.0),
        ))
    }
}

fn check_primary(
    orbit: &Orbit,
    body: Option<BodyId>,
    role: &'static str,
) -> Result<(), ManeuverError> {
    match body {
        Some(body) if orbit.primary != Some(body) => Err(ManeuverError::OrbitBodyMismatch(role)),
        _ => Ok(()),
    }
}

pub(crate) fn plan_transfer(
    catalog: &Catalog,
    request: &ManeuverRequest,
    source_orbit: &Orbit,
    target_orbit: &Orbit,
    search: &WindowSearchConfig,
) -> Result<ManeuverPlan, ManeuverError> {
    check_primary(source_orbit, request.source_body, "source")?;
    check_primary(target_orbit, request.target_body, "target")?;
    let source_body = request.resolved_source_body().defined("source body")?;
    let target_body = request.resolved_target_body().defined("target body")?;

    let leg = TransferLeg::classify(catalog, source_body, source_orbit, target_body, target_orbit)?;
    debug!(kind = ?leg.kind, "transfer classified");

    // a craft leaving a moon for its planet just drops out of the moon's orbit
    let window = match leg.kind {
        TransferKind::ToPrimary => TransferWindow {
            evaluation: leg
                .evaluate(request.initial_time, catalog)
                .defined("transfer from the initial time")?,
            iterations: 1,
        },
        TransferKind::ToSecondary | TransferKind::BetweenSecondaries => {
            find_transfer_window(&leg, catalog, request.initial_time, search)?
        }
    };
    let transfer = window.evaluation;
    let inward = transfer.departure_radius > transfer.arrival_radius;
    let escape = transfer.hyperbolic_excess_escape_velocity();
    let arrival = transfer.hyperbolic_excess_capture_velocity();

    let (ejection, ejection_velocity, ejection_angle) = match leg.kind {
        // already orbiting the transfer's primary: the transfer burn is the whole ejection
        TransferKind::ToSecondary => (escape, None, None),
        TransferKind::ToPrimary | TransferKind::BetweenSecondaries => (
            ejection_delta_v_with_orbit(escape, source_orbit, catalog)?,
            Some(ejection_velocity_with_orbit(escape, source_orbit, catalog)?),
            ejection_angle_with_orbit(escape, source_orbit, inward, catalog)?,
        ),
    };

    let target = catalog.body(target_body).defined("target body")?;
    let capture = if request.aerobrake && target.has_atmosphere() {
        0.0
    } else if leg.kind == TransferKind::ToPrimary {
        arrival
    } else {
        capture_delta_v_with_orbit(arrival, target_orbit, catalog)?
    };

    let plane_change = transfer.plane_change_delta_v;
    let mut plan = ManeuverPlan::new(ManeuverKind::Transfer, ejection + plane_change + capture);
    plan.ejection_delta_v = Some(ejection);
    plan.capture_delta_v = Some(capture);
    plan.plane_change_delta_v = Some(plane_change);
    plan.hyperbolic_excess_escape_velocity = Some(escape);
    plan.hyperbolic_excess_capture_velocity = Some(arrival);
    plan.ejection_velocity = ejection_velocity;
    plan.ejection_angle = ejection_angle;
    plan.transfer_time = Some(transfer.time);
    plan.travel_time = Some(transfer.travel_time);
    plan.transfer_phase_angle = Some(transfer.phase_angle);
    plan.current_phase_angle = leg.phase_angle_at(request.initial_time, catalog);
    plan.transfer_kind = Some(leg.kind);
    plan.transfer_orbit = Some(transfer.orbit);
    plan.window_iterations = Some(window.iterations);
    Ok(plan)
}
