//! Classical-element orbit state and its geometric derived quantities.
//!
//! Heights (periapsis, apoapsis) are measured above the primary's surface;
//! radii are measured from the primary's centre.

use std::f64::consts::FRAC_PI_2;

use kerbol_core::angle::normalize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::body::{Body, BodyId};
use crate::catalog::Catalog;
use crate::{finite, positive};

const BELOW_CENTRE: OrbitError = OrbitError::Degenerate("apsis at or below the primary's centre");

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrbitError {
    #[error("orbit has no primary body or gravitational parameter")]
    MissingPrimary,
    #[error("degenerate orbit: {0}")]
    Degenerate(&'static str),
}

/// Keplerian elements of an elliptic orbit. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orbit {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub argument_of_periapsis: f64,
    pub longitude_of_ascending_node: f64,
    pub mean_anomaly_at_epoch: f64,
    pub epoch: f64,
    /// Gravitating centre; its gravitational parameter drives all motion.
    pub primary: Option<BodyId>,
    /// Overrides the primary's gravitational parameter (synthetic orbits).
    pub gravitational_parameter: Option<f64>,
}

impl Orbit {
    /// Orbit around `primary` with the given apsis heights above its surface.
    ///
    /// Fails when either apsis reaches the primary's centre.
    pub fn with_apsides(primary: &Body, periapsis: f64, apoapsis: f64) -> Result<Self, OrbitError> {
        let (eccentricity, semi_major_axis) =
            apsides_to_elements(periapsis, apoapsis, primary.radius).ok_or(BELOW_CENTRE)?;
        Ok(Self {
            semi_major_axis,
            eccentricity,
            primary: Some(primary.id),
            ..Self::default()
        })
    }

    /// Circular orbit `altitude` metres above the surface of `primary`.
    pub fn circular(primary: &Body, altitude: f64) -> Result<Self, OrbitError> {
        Self::with_apsides(primary, altitude, altitude)
    }

    /// Gravitational parameter driving this orbit, from the override or the primary.
    pub fn gravitational_parameter(&self, catalog: &Catalog) -> Option<f64> {
        if let Some(mu) = self.gravitational_parameter {
            return positive(mu);
        }
        positive(catalog.body(self.primary?)?.gravitational_parameter)
    }

    pub fn primary_body<'a>(&self, catalog: &'a Catalog) -> Option<&'a Body> {
        catalog.body(self.primary?)
    }

    pub fn primary_radius(&self, catalog: &Catalog) -> Option<f64> {
        finite(self.primary_body(catalog)?.radius)
    }

    pub fn periapsis(&self, catalog: &Catalog) -> Option<f64> {
        finite(self.semi_major_axis * (1.0 - self.eccentricity) - self.primary_radius(catalog)?)
    }

    pub fn apoapsis(&self, catalog: &Catalog) -> Option<f64> {
        finite(self.semi_major_axis * (1.0 + self.eccentricity) - self.primary_radius(catalog)?)
    }

    /// Move the periapsis while holding the apoapsis fixed.
    pub fn set_periapsis(&mut self, periapsis: f64, catalog: &Catalog) -> Result<(), OrbitError> {
        let radius = self.primary_radius(catalog).ok_or(OrbitError::MissingPrimary)?;
        let apoapsis = self.apoapsis(catalog).ok_or(OrbitError::MissingPrimary)?;
        self.set_apsides(periapsis, apoapsis, radius)
    }

    /// Move the apoapsis while holding the periapsis fixed.
    pub fn set_apoapsis(&mut self, apoapsis: f64, catalog: &Catalog) -> Result<(), OrbitError> {
        let radius = self.primary_radius(catalog).ok_or(OrbitError::MissingPrimary)?;
        let periapsis = self.periapsis(catalog).ok_or(OrbitError::MissingPrimary)?;
        self.set_apsides(periapsis, apoapsis, radius)
    }

    fn set_apsides(&mut self, periapsis: f64, apoapsis: f64, radius: f64) -> Result<(), OrbitError> {
        let (eccentricity, semi_major_axis) =
            apsides_to_elements(periapsis, apoapsis, radius).ok_or(BELOW_CENTRE)?;
        self.eccentricity = eccentricity;
        self.semi_major_axis = semi_major_axis;
        Ok(())
    }

    /// Distance from the primary's centre at true anomaly `ν`.
    pub fn radius_with_true_anomaly(&self, true_anomaly: f64) -> f64 {
        let e = self.eccentricity;
        self.semi_major_axis * (1.0 - e * e) / (1.0 + e * true_anomaly.cos())
    }

    /// Vis-viva speed relative to the primary at radius `r`.
    pub fn relative_velocity_with_radius(&self, radius: f64, catalog: &Catalog) -> Option<f64> {
        let radius = positive(radius)?;
        let a = positive(self.semi_major_axis)?;
        let mu = self.gravitational_parameter(catalog)?;
        let squared = mu * (2.0 / radius - 1.0 / a);
        // beyond apoapsis (within rounding) the ellipse cannot reach
        if squared < 0.0 {
            return (squared > -1e-9 * mu / a).then_some(0.0);
        }
        finite(squared.sqrt())
    }

    pub fn true_longitude(&self, true_anomaly: f64) -> f64 {
        normalize(true_anomaly + self.argument_of_periapsis + self.longitude_of_ascending_node)
    }

    pub fn true_anomaly_with_true_longitude(&self, true_longitude: f64) -> f64 {
        normalize(true_longitude - self.argument_of_periapsis - self.longitude_of_ascending_node)
    }

    /// Angle above the reference plane at true anomaly `ν`.
    pub fn declination(&self, true_anomaly: f64) -> f64 {
        (self.inclination.sin() * (true_anomaly + self.argument_of_periapsis).sin()).asin()
    }

    pub fn true_longitude_at_time(&self, time: f64, catalog: &Catalog) -> Option<f64> {
        Some(self.true_longitude(self.true_anomaly_at_time(time, catalog)?))
    }

    /// Angle from this orbit's radius vector forward to the primary's own prograde direction.
    pub fn angle_prograde(&self, time: f64, catalog: &Catalog) -> Option<f64> {
        let parent_orbit = self.primary_body(catalog)?.orbit.as_ref()?;
        let prograde = parent_orbit.true_longitude_at_time(time, catalog)? + FRAC_PI_2;
        let position = self.true_longitude_at_time(time, catalog)?;
        Some(normalize(prograde - position))
    }

    /// Time from `time` until the craft sits `ejection_angle` behind the primary's prograde vector.
    pub fn time_until_ejection_angle(
        &self,
        time: f64,
        ejection_angle: f64,
        catalog: &Catalog,
    ) -> Option<f64> {
        let period = self.period(catalog)?;
        let angle = self.angle_prograde(time, catalog)?;
        Some(period * normalize(angle - ejection_angle) / kerbol_core::constants::TAU)
    }

    /// Periapsis above the atmosphere and apoapsis inside the primary's sphere of influence.
    pub fn is_stable(&self, catalog: &Catalog) -> Option<bool> {
        let primary = self.primary_body(catalog)?;
        let above_atmosphere = self.periapsis(catalog)? > primary.max_atmosphere_height;
        let inside_soi = primary.sphere_of_influence <= 0.0
            || self.apoapsis(catalog)? + primary.radius < primary.sphere_of_influence;
        Some(above_atmosphere && inside_soi)
    }
}

/// Eccentricity and semi-major axis from two apsis heights above a surface of `radius`.
///
/// Undefined unless both apses lie strictly above the centre, which keeps `e < 1`.
pub fn apsides_to_elements(periapsis: f64, apoapsis: f64, radius: f64) -> Option<(f64, f64)> {
    positive(periapsis + radius)?;
    positive(apoapsis + radius)?;
    let span = apoapsis + periapsis + 2.0 * radius;
    let eccentricity = (apoapsis - periapsis).abs() / span;
    let semi_major_axis = (apoapsis + periapsis) / 2.0 + radius;
    Some((eccentricity, semi_major_axis))
}
