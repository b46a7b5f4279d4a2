use std::f64::consts::PI;

use approx::assert_relative_eq;
use kerbol_mechanics::config::load_catalog;
use kerbol_mechanics::orbits::{Catalog, Orbit};
use kerbol_mechanics::transfer::{
    Maneuver, ManeuverError, ManeuverKind, ManeuverRequest, TransferKind, TransferLeg, recompute,
};

const DAY: f64 = 21_600.0;

fn stock() -> Catalog {
    load_catalog("configs/kerbol_system.yaml").expect("stock catalog should load")
}

/// Circular orbits `altitude` metres above both bodies.
fn transfer_request(catalog: &Catalog, from: &str, to: &str, altitude: f64) -> ManeuverRequest {
    let source = catalog.by_name(from).unwrap();
    let target = catalog.by_name(to).unwrap();
    ManeuverRequest {
        source_body: Some(source.id),
        source_orbit: Some(Orbit::circular(source, altitude).unwrap()),
        target_body: Some(target.id),
        target_orbit: Some(Orbit::circular(target, altitude).unwrap()),
        ..ManeuverRequest::default()
    }
}

#[test]
fn kerbin_to_duna_from_low_orbits() {
    let catalog = stock();
    let request = transfer_request(&catalog, "Kerbin", "Duna", 100_000.0);
    assert!(request.is_transfer());
    assert_eq!(request.kind(), ManeuverKind::Transfer);
    assert_eq!(request.description(&catalog), "Transfer to Duna");

    let plan = recompute(&catalog, &request).unwrap();
    assert_eq!(plan.kind, ManeuverKind::Transfer);
    assert_eq!(plan.transfer_kind, Some(TransferKind::BetweenSecondaries));

    assert_relative_eq!(plan.transfer_time.unwrap() / DAY, 235.97, epsilon = 0.01);
    assert_relative_eq!(plan.travel_time.unwrap() / DAY, 295.82, epsilon = 0.01);
    assert_relative_eq!(
        plan.transfer_phase_angle.unwrap().to_degrees(),
        36.55,
        epsilon = 0.01
    );
    assert_relative_eq!(
        plan.current_phase_angle.unwrap().to_degrees(),
        135.51,
        epsilon = 0.01
    );
    assert_relative_eq!(
        plan.hyperbolic_excess_escape_velocity.unwrap(),
        865.56,
        epsilon = 0.05
    );
    assert_relative_eq!(
        plan.hyperbolic_excess_capture_velocity.unwrap(),
        877.50,
        epsilon = 0.05
    );
    assert_relative_eq!(plan.plane_change_delta_v.unwrap(), 8.087, epsilon = 0.01);
    assert_relative_eq!(plan.ejection_delta_v.unwrap(), 1_046.06, epsilon = 0.05);
    assert_relative_eq!(plan.capture_delta_v.unwrap(), 637.88, epsilon = 0.05);
    assert_relative_eq!(plan.delta_v, 1_692.03, epsilon = 0.1);
    assert!((plan.delta_v - 1_687.0).abs() < 20.0);

    assert_relative_eq!(plan.ejection_velocity.unwrap(), 3_291.84, epsilon = 0.05);
    assert_relative_eq!(
        plan.ejection_angle.unwrap().to_degrees(),
        150.54,
        epsilon = 0.01
    );
}

#[test]
fn aerobraking_at_duna_removes_the_capture_burn() {
    let catalog = stock();
    let mut request = transfer_request(&catalog, "Kerbin", "Duna", 100_000.0);
    request.aerobrake = true;
    let plan = recompute(&catalog, &request).unwrap();
    assert_eq!(plan.capture_delta_v, Some(0.0));
    assert_relative_eq!(plan.delta_v, 1_054.15, epsilon = 0.1);
}

#[test]
fn kerbin_to_eve_pays_for_the_inclination() {
    let catalog = stock();
    let plan = recompute(&catalog, &transfer_request(&catalog, "Kerbin", "Eve", 100_000.0)).unwrap();
    assert_relative_eq!(plan.transfer_time.unwrap() / DAY, 548.42, epsilon = 0.01);
    assert_relative_eq!(plan.travel_time.unwrap() / DAY, 170.62, epsilon = 0.01);
    assert_relative_eq!(plan.plane_change_delta_v.unwrap(), 375.19, epsilon = 0.05);
    assert_relative_eq!(
        plan.hyperbolic_excess_escape_velocity.unwrap(),
        778.90,
        epsilon = 0.05
    );
    // inward escapes burn on the far side from the prograde vector
    assert_relative_eq!(
        plan.ejection_angle.unwrap().to_degrees(),
        333.21,
        epsilon = 0.01
    );
}

/// Checks that the plan's departure is a real window of its leg.
fn assert_departs_in_a_window(catalog: &Catalog, request: &ManeuverRequest, departure: f64) {
    let leg = TransferLeg::classify(
        catalog,
        request.source_body.unwrap(),
        &request.source_orbit.unwrap(),
        request.target_body.unwrap(),
        &request.target_orbit.unwrap(),
    )
    .unwrap();
    let evaluation = leg.evaluate(departure, catalog).unwrap();
    assert!(evaluation.timing_error().abs() < 1.0);
}

#[test]
fn kerbin_to_moho_lets_moho_lap_before_arrival() {
    let catalog = stock();
    let request = transfer_request(&catalog, "Kerbin", "Moho", 100_000.0);
    let plan = recompute(&catalog, &request).unwrap();
    let moho_year = catalog
        .by_name("Moho")
        .and_then(|b| b.orbit)
        .and_then(|o| o.period(&catalog))
        .unwrap();

    assert!(plan.travel_time.unwrap() > moho_year);
    assert_relative_eq!(plan.transfer_time.unwrap() / DAY, 24.00, epsilon = 0.01);
    assert_relative_eq!(plan.travel_time.unwrap() / DAY, 117.37, epsilon = 0.01);
    assert_relative_eq!(plan.delta_v, 5_308.54, epsilon = 0.1);
    assert_relative_eq!(
        plan.ejection_angle.unwrap().to_degrees(),
        294.73,
        epsilon = 0.01
    );
    assert_departs_in_a_window(&catalog, &request, plan.transfer_time.unwrap());
}

#[test]
fn minmus_to_mun_from_low_orbits() {
    let catalog = stock();
    let request = transfer_request(&catalog, "Minmus", "Mun", 20_000.0);
    let plan = recompute(&catalog, &request).unwrap();

    assert_eq!(plan.transfer_kind, Some(TransferKind::BetweenSecondaries));
    assert_relative_eq!(plan.transfer_time.unwrap() / DAY, 5.672, epsilon = 0.001);
    assert_relative_eq!(plan.travel_time.unwrap() / DAY, 12.40, epsilon = 0.01);
    assert_relative_eq!(plan.delta_v, 356.17, epsilon = 0.05);
    assert_relative_eq!(
        plan.ejection_angle.unwrap().to_degrees(),
        313.74,
        epsilon = 0.01
    );
    assert_departs_in_a_window(&catalog, &request, plan.transfer_time.unwrap());
}

#[test]
fn delta_v_with_alternative_parking_orbit() {
    let catalog = stock();
    let plan = recompute(&catalog, &transfer_request(&catalog, "Kerbin", "Duna", 100_000.0)).unwrap();
    let kerbin = catalog.by_name("Kerbin").unwrap();

    let same = plan
        .delta_v_with_orbit(&Orbit::circular(kerbin, 100_000.0).unwrap(), &catalog)
        .unwrap()
        .unwrap();
    assert_relative_eq!(same, plan.delta_v, epsilon = 1e-6);

    let high = plan
        .delta_v_with_orbit(&Orbit::circular(kerbin, 2_000_000.0).unwrap(), &catalog)
        .unwrap()
        .unwrap();
    assert!(high < same, "high = {high}, low = {same}");
}

#[test]
fn kerbin_orbit_to_mun() {
    let catalog = stock();
    let request = transfer_request(&catalog, "Kerbin", "Mun", 100_000.0);
    let plan = recompute(&catalog, &request).unwrap();

    assert_eq!(plan.transfer_kind, Some(TransferKind::ToSecondary));
    assert_eq!(plan.ejection_velocity, None);
    assert_eq!(plan.ejection_delta_v, plan.hyperbolic_excess_escape_velocity);
    assert_relative_eq!(
        plan.hyperbolic_excess_escape_velocity.unwrap(),
        841.46,
        epsilon = 0.05
    );
    assert_relative_eq!(plan.transfer_time.unwrap(), 1_912.98, epsilon = 1.0);

    assert_departs_in_a_window(&catalog, &request, plan.transfer_time.unwrap());
}

#[test]
fn mun_to_kerbin_departs_immediately() {
    let catalog = stock();
    let mut request = transfer_request(&catalog, "Mun", "Kerbin", 100_000.0);
    request.initial_time = 5_000.0;
    let plan = recompute(&catalog, &request).unwrap();

    assert_eq!(plan.transfer_kind, Some(TransferKind::ToPrimary));
    assert_eq!(plan.transfer_time, Some(5_000.0));
    assert_eq!(plan.window_iterations, Some(1));
    assert_eq!(plan.capture_delta_v, plan.hyperbolic_excess_capture_velocity);
    assert!(plan.ejection_velocity.is_some());
    assert!(plan.ejection_angle.unwrap() > PI, "escaping inward towards Kerbin");

    request.aerobrake = true;
    let braked = recompute(&catalog, &request).unwrap();
    assert_eq!(braked.capture_delta_v, Some(0.0));
    assert!(braked.delta_v < plan.delta_v);
}

#[test]
fn orbits_must_circle_their_named_bodies() {
    let catalog = stock();
    let mut request = transfer_request(&catalog, "Kerbin", "Duna", 100_000.0);
    request.source_body = Some(catalog.by_name("Eve").unwrap().id);
    assert_eq!(
        recompute(&catalog, &request).unwrap_err(),
        ManeuverError::OrbitBodyMismatch("source")
    );
}

#[test]
fn distant_moons_are_unsupported() {
    let catalog = stock();
    let request = transfer_request(&catalog, "Mun", "Ike", 20_000.0);
    assert!(matches!(
        recompute(&catalog, &request),
        Err(ManeuverError::UnsupportedTopology { .. })
    ));
}

#[test]
fn empty_request_has_nothing_to_compute() {
    let catalog = stock();
    let request = ManeuverRequest::default();
    assert_eq!(request.kind(), ManeuverKind::Empty);
    assert_eq!(request.description(&catalog), "Empty maneuver");
    assert_eq!(
        recompute(&catalog, &request).unwrap_err(),
        ManeuverError::Empty
    );
}

#[test]
fn failed_recompute_keeps_the_previous_plan() {
    let catalog = stock();
    let mut maneuver = Maneuver::new(transfer_request(&catalog, "Kerbin", "Duna", 100_000.0));
    assert!(maneuver.plan().is_none());

    let delta_v = maneuver.recompute(&catalog).unwrap().delta_v;
    assert_eq!(maneuver.description(&catalog), "Transfer to Duna");

    let ike = catalog.by_name("Ike").unwrap();
    let mun = catalog.by_name("Mun").unwrap();
    maneuver.request.source_body = Some(mun.id);
    maneuver.request.source_orbit = Some(Orbit::circular(mun, 20_000.0).unwrap());
    maneuver.request.target_body = Some(ike.id);
    maneuver.request.target_orbit = Some(Orbit::circular(ike, 20_000.0).unwrap());
    assert!(maneuver.recompute(&catalog).is_err());
    assert_eq!(maneuver.plan().map(|p| p.delta_v), Some(delta_v));
}
