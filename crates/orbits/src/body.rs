//! Immutable descriptors for gravitating bodies.

use std::collections::BTreeSet;

use kerbol_core::constants::TAU;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::orbit::Orbit;
use crate::positive;

/// Default parking altitude above the atmosphere (or the surface for airless bodies).
const PARKING_MARGIN_M: f64 = 10_000.0;

/// Index of a body inside its [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);

/// Catalog record for a body before it is linked into the body tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    pub mass: f64,
    pub gravitational_parameter: f64,
    pub radius: f64,
    /// Sidereal rotation period in seconds (0 when unknown).
    pub rotation_period: f64,
    pub sphere_of_influence: f64,
    /// Height of the top of the atmosphere above the surface (0 if airless).
    pub max_atmosphere_height: f64,
    pub atmosphere_contains_oxygen: bool,
    pub parking_orbit_height: Option<f64>,
    /// Fitted ascent cost into a circular parking orbit, when one is known.
    pub launch_delta_v: Option<f64>,
    /// Orbit around the parent body; `primary` is filled in when the catalog is built.
    pub orbit: Option<Orbit>,
}

impl BodyDescriptor {
    pub fn new(name: impl Into<String>, gravitational_parameter: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            mass: gravitational_parameter / kerbol_core::constants::G,
            gravitational_parameter,
            radius,
            rotation_period: 0.0,
            sphere_of_influence: 0.0,
            max_atmosphere_height: 0.0,
            atmosphere_contains_oxygen: false,
            parking_orbit_height: None,
            launch_delta_v: None,
            orbit: None,
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_orbit(mut self, orbit: Orbit) -> Self {
        self.orbit = Some(orbit);
        self
    }

    pub fn with_rotation_period(mut self, seconds: f64) -> Self {
        self.rotation_period = seconds;
        self
    }

    pub fn with_sphere_of_influence(mut self, radius: f64) -> Self {
        self.sphere_of_influence = radius;
        self
    }

    pub fn with_atmosphere(mut self, height: f64, contains_oxygen: bool) -> Self {
        self.max_atmosphere_height = height;
        self.atmosphere_contains_oxygen = contains_oxygen;
        self
    }

    pub fn with_parking_orbit_height(mut self, height: f64) -> Self {
        self.parking_orbit_height = Some(height);
        self
    }

    pub fn with_launch_delta_v(mut self, delta_v: f64) -> Self {
        self.launch_delta_v = Some(delta_v);
        self
    }
}

/// A body resolved into the catalog tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub mass: f64,
    pub gravitational_parameter: f64,
    pub radius: f64,
    pub rotation_period: f64,
    pub sphere_of_influence: f64,
    pub max_atmosphere_height: f64,
    pub atmosphere_contains_oxygen: bool,
    pub parking_orbit_height: f64,
    pub launch_delta_v: Option<f64>,
    pub orbit: Option<Orbit>,
    pub primary: Option<BodyId>,
    pub secondaries: BTreeSet<BodyId>,
}

impl Body {
    pub(crate) fn from_descriptor(id: BodyId, descriptor: BodyDescriptor) -> Self {
        let parking_orbit_height = descriptor.parking_orbit_height.unwrap_or(
            if descriptor.max_atmosphere_height > 0.0 {
                descriptor.max_atmosphere_height + PARKING_MARGIN_M
            } else {
                PARKING_MARGIN_M
            },
        );
        Self {
            id,
            name: descriptor.name,
            mass: descriptor.mass,
            gravitational_parameter: descriptor.gravitational_parameter,
            radius: descriptor.radius,
            rotation_period: descriptor.rotation_period,
            sphere_of_influence: descriptor.sphere_of_influence,
            max_atmosphere_height: descriptor.max_atmosphere_height,
            atmosphere_contains_oxygen: descriptor.atmosphere_contains_oxygen,
            parking_orbit_height,
            launch_delta_v: descriptor.launch_delta_v,
            orbit: descriptor.orbit,
            primary: None,
            secondaries: BTreeSet::new(),
        }
    }

    /// True when the body has an atmosphere usable for aerobraking.
    pub fn has_atmosphere(&self) -> bool {
        self.max_atmosphere_height > 0.0
    }

    /// Equatorial surface speed due to rotation, `2πR / T`.
    pub fn surface_rotation_speed(&self) -> Option<f64> {
        let period = positive(self.rotation_period)?;
        Some(TAU * self.radius / period)
    }

    /// Whether the body rotates once per orbit (within one second).
    pub fn tidally_locked(&self, catalog: &Catalog) -> Option<bool> {
        let rotation = positive(self.rotation_period)?;
        let period = self.orbit.as_ref()?.period(catalog)?;
        Some((rotation - period).abs() < 1.0)
    }

    /// Height above the surface of a circular orbit whose period equals the rotation period.
    pub fn synchronous_orbit_height(&self) -> Option<f64> {
        self.orbit_height_with_period(self.rotation_period)
    }

    /// As [`Body::synchronous_orbit_height`] for half the rotation period.
    pub fn semi_synchronous_orbit_height(&self) -> Option<f64> {
        self.orbit_height_with_period(self.rotation_period / 2.0)
    }

    fn orbit_height_with_period(&self, period: f64) -> Option<f64> {
        let period = positive(period)?;
        let mu = positive(self.gravitational_parameter)?;
        Some((mu * period * period / (TAU * TAU)).cbrt() - self.radius)
    }
}
