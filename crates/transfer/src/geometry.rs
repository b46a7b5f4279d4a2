//! Hohmann-style transfer construction between two orbits around a common primary.
//!
//! A [`TransferLeg`] picks the pair of orbits that share a primary: the craft's own
//! orbit, or the orbit of the body it is leaving or reaching. [`TransferLeg::evaluate`]
//! then builds the transfer ellipse for a departure at time `t`. The ellipse starts at
//! the source's current position and ends on the opposite side of the primary, where
//! the target will be met.

use std::f64::consts::{FRAC_PI_2, PI};

use kerbol_core::angle::normalize;
use kerbol_impulsive::plane_change_delta_v;
use kerbol_orbits::{BodyId, Catalog, Orbit};
use serde::Serialize;

use crate::error::{Defined, ManeuverError};

/// Parent/child relation between the departure and arrival bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferKind {
    /// The target body orbits the source body (star → planet, planet → moon).
    ToSecondary,
    /// The source body orbits the target body (moon → planet, planet → star).
    ToPrimary,
    /// Both bodies orbit the same primary (planet → planet, moon → moon).
    BetweenSecondaries,
}

/// Departure and arrival orbits sharing `primary`, chosen according to `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferLeg {
    pub kind: TransferKind,
    pub source: Orbit,
    pub target: Orbit,
    pub primary: BodyId,
}

/// One candidate transfer departing at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferEvaluation {
    pub time: f64,
    pub orbit: Orbit,
    /// Half the transfer ellipse's period.
    pub travel_time: f64,
    /// Time for the target to reach the rendezvous point, counting the whole laps
    /// that bring it closest to `travel_time`.
    pub meeting_time: f64,
    pub phase_angle: f64,
    pub departure_radius: f64,
    pub arrival_radius: f64,
    pub source_velocity: f64,
    pub transfer_departure_velocity: f64,
    pub transfer_arrival_velocity: f64,
    pub target_velocity: f64,
    pub plane_change_delta_v: f64,
}

impl TransferEvaluation {
    /// `travel_time − meeting_time`; zero at a transfer window.
    pub fn timing_error(&self) -> f64 {
        self.travel_time - self.meeting_time
    }

    pub fn hyperbolic_excess_escape_velocity(&self) -> f64 {
        (self.transfer_departure_velocity - self.source_velocity).abs()
    }

    pub fn hyperbolic_excess_capture_velocity(&self) -> f64 {
        (self.target_velocity - self.transfer_arrival_velocity).abs()
    }
}

impl TransferLeg {
    /// Classify a transfer from `source_orbit` around `source_body` to `target_orbit`
    /// around `target_body`.
    pub fn classify(
        catalog: &Catalog,
        source_body: BodyId,
        source_orbit: &Orbit,
        target_body: BodyId,
        target_orbit: &Orbit,
    ) -> Result<Self, ManeuverError> {
        let source = catalog.body(source_body).defined("source body")?;
        let target = catalog.body(target_body).defined("target body")?;

        if target.primary == Some(source_body) {
            return Ok(Self {
                kind: TransferKind::ToSecondary,
                source: *source_orbit,
                target: target.orbit.defined("target body orbit")?,
                primary: source_body,
            });
        }
        if source.primary == Some(target_body) {
            return Ok(Self {
                kind: TransferKind::ToPrimary,
                source: source.orbit.defined("source body orbit")?,
                target: *target_orbit,
                primary: target_body,
            });
        }
        match (source.primary, target.primary) {
            (Some(a), Some(b)) if a == b => Ok(Self {
                kind: TransferKind::BetweenSecondaries,
                source: source.orbit.defined("source body orbit")?,
                target: target.orbit.defined("target body orbit")?,
                primary: a,
            }),
            _ => Err(ManeuverError::UnsupportedTopology {
                from: source.name.clone(),
                to: target.name.clone(),
            }),
        }
    }

    /// Angle from the source's true longitude forward to the target's at `time`.
    pub fn phase_angle_at(&self, time: f64, catalog: &Catalog) -> Option<f64> {
        let source = self.source.true_longitude_at_time(time, catalog)?;
        let target = self.target.true_longitude_at_time(time, catalog)?;
        Some(normalize(target - source))
    }

    /// Build the transfer ellipse for a departure at `time`.
    pub fn evaluate(&self, time: f64, catalog: &Catalog) -> Option<TransferEvaluation> {
        let source_anomaly = self.source.true_anomaly_at_time(time, catalog)?;
        let target_anomaly = self.target.true_anomaly_at_time(time, catalog)?;
        let source_longitude = self.source.true_longitude(source_anomaly);
        let target_longitude = self.target.true_longitude(target_anomaly);

        // the target is met on the far side of the primary
        let rendezvous_anomaly = self
            .target
            .true_anomaly_with_true_longitude(source_longitude + PI);

        let departure_radius = self.source.radius_with_true_anomaly(source_anomaly);
        let arrival_radius = self.target.radius_with_true_anomaly(rendezvous_anomaly);
        let span = departure_radius + arrival_radius;
        if !(span > 0.0) {
            return None;
        }

        let first_arrival = normalize(
            self.target.mean_anomaly_with_true_anomaly(rendezvous_anomaly)
                - self.target.mean_anomaly_with_true_anomaly(target_anomaly),
        ) / self.target.mean_motion(catalog)?;
        let target_period = self.target.period(catalog)?;

        let orbit = Orbit {
            semi_major_axis: span / 2.0,
            eccentricity: (arrival_radius - departure_radius).abs() / span,
            inclination: self.source.inclination,
            argument_of_periapsis: normalize(self.source.argument_of_periapsis + source_anomaly),
            longitude_of_ascending_node: self.source.longitude_of_ascending_node,
            mean_anomaly_at_epoch: 0.0,
            epoch: time,
            primary: Some(self.primary),
            gravitational_parameter: None,
        };
        let travel_time = orbit.period(catalog)? / 2.0;

        // slow transfers let the target finish whole laps before the rendezvous
        let laps = ((travel_time - first_arrival) / target_period).round().max(0.0);
        let meeting_time = first_arrival + laps * target_period;

        let arrival_anomaly = self.target.true_anomaly_at_time(time + travel_time, catalog)?;
        let declination_change =
            self.target.declination(arrival_anomaly) - orbit.declination(FRAC_PI_2);
        let node_speed = orbit
            .relative_velocity_with_radius(orbit.radius_with_true_anomaly(FRAC_PI_2), catalog)?;

        let evaluation = TransferEvaluation {
            time,
            orbit,
            travel_time,
            meeting_time,
            phase_angle: normalize(target_longitude - source_longitude),
            departure_radius,
            arrival_radius,
            source_velocity: self
                .source
                .relative_velocity_with_radius(departure_radius, catalog)?,
            transfer_departure_velocity: orbit
                .relative_velocity_with_radius(departure_radius, catalog)?,
            transfer_arrival_velocity: orbit
                .relative_velocity_with_radius(arrival_radius, catalog)?,
            target_velocity: self
                .target
                .relative_velocity_with_radius(arrival_radius, catalog)?,
            plane_change_delta_v: plane_change_delta_v(node_speed, declination_change),
        };
        evaluation.timing_error().is_finite().then_some(evaluation)
    }
}
