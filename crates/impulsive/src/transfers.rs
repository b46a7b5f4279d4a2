//! Two-burn transfers between orbits around one primary.

use kerbol_orbits::{Catalog, Orbit};

/// Result for a Hohmann transfer between circular, coplanar orbits of radii r1 and r2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannResult {
    pub dv1_m_s: f64,      // signed: negative for inward (retro) burn
    pub dv2_m_s: f64,      // signed: negative for retro capture when arriving inward
    pub dv_total_m_s: f64, // |dv1| + |dv2|
    pub tof_seconds: f64,
}

/// Compute the classical Hohmann transfer between two circular coplanar orbits.
///
/// Inputs:
/// - `r1_m`: initial circular orbit radius (m)
/// - `r2_m`: target circular orbit radius (m)
/// - `mu_m3_s2`: gravitational parameter of central body (m^3/s^2)
///
/// Returns `None` for non-positive inputs.
pub fn hohmann(r1_m: f64, r2_m: f64, mu_m3_s2: f64) -> Option<HohmannResult> {
    if !(r1_m > 0.0 && r2_m > 0.0 && mu_m3_s2 > 0.0) {
        return None;
    }

    let v1 = (mu_m3_s2 / r1_m).sqrt();
    let v2 = (mu_m3_s2 / r2_m).sqrt();
    let a_t = 0.5 * (r1_m + r2_m);
    let tof = std::f64::consts::PI * (a_t.powi(3) / mu_m3_s2).sqrt();

    // Transfer periapsis speed (at r1) and apoapsis speed (at r2)
    let v_t1 = (mu_m3_s2 * (2.0 / r1_m - 1.0 / a_t)).sqrt();
    let v_t2 = (mu_m3_s2 * (2.0 / r2_m - 1.0 / a_t)).sqrt();

    let dv1 = v_t1 - v1;
    let dv2 = v2 - v_t2;

    Some(HohmannResult {
        dv1_m_s: dv1,
        dv2_m_s: dv2,
        dv_total_m_s: dv1.abs() + dv2.abs(),
        tof_seconds: tof,
    })
}

/// Burns for a transfer that leaves `source` at its periapsis and arrives at the
/// apoapsis height of `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBurnResult {
    /// Transfer ellipse flown between the two burns.
    pub transfer: Orbit,
    pub injection_delta_v: f64,
    pub arrival_delta_v: f64,
    pub total_delta_v: f64,
}

/// Two-burn Hohmann cost between two orbits sharing a primary.
///
/// The transfer ellipse keeps the source periapsis and raises (or lowers) the
/// opposite apsis to the target's apoapsis height. Undefined if either orbit
/// lacks a primary or a speed cannot be evaluated.
pub fn apsidal_two_burn(source: &Orbit, target: &Orbit, catalog: &Catalog) -> Option<TwoBurnResult> {
    let radius = source.primary_radius(catalog)?;
    let periapsis = source.periapsis(catalog)?;
    let apoapsis = target.apoapsis(catalog)?;

    let mut transfer = *source;
    transfer.set_apoapsis(apoapsis, catalog).ok()?;

    let departure_radius = radius + periapsis;
    let arrival_radius = radius + apoapsis;
    let v0 = source.relative_velocity_with_radius(departure_radius, catalog)?;
    let v1 = transfer.relative_velocity_with_radius(departure_radius, catalog)?;
    let v2 = transfer.relative_velocity_with_radius(arrival_radius, catalog)?;
    let v3 = target.relative_velocity_with_radius(arrival_radius, catalog)?;

    let injection_delta_v = (v1 - v0).abs();
    let arrival_delta_v = (v3 - v2).abs();
    Some(TwoBurnResult {
        transfer,
        injection_delta_v,
        arrival_delta_v,
        total_delta_v: injection_delta_v + arrival_delta_v,
    })
}
