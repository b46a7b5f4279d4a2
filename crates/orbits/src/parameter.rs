use crate::catalog::Catalog;
use crate::orbit::{Orbit, OrbitError};

/// Selects one apsis of an orbit, for UIs that edit "this" apsis and "the other".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitalParameter {
    Apoapsis,
    Periapsis,
}

impl OrbitalParameter {
    pub fn other(self) -> Self {
        match self {
            Self::Apoapsis => Self::Periapsis,
            Self::Periapsis => Self::Apoapsis,
        }
    }

    pub fn value(self, orbit: &Orbit, catalog: &Catalog) -> Option<f64> {
        match self {
            Self::Apoapsis => orbit.apoapsis(catalog),
            Self::Periapsis => orbit.periapsis(catalog),
        }
    }

    pub fn set_value(self, orbit: &mut Orbit, value: f64, catalog: &Catalog) -> Result<(), OrbitError> {
        match self {
            Self::Apoapsis => orbit.set_apoapsis(value, catalog),
            Self::Periapsis => orbit.set_periapsis(value, catalog),
        }
    }

    pub fn other_value(self, orbit: &Orbit, catalog: &Catalog) -> Option<f64> {
        self.other().value(orbit, catalog)
    }

    pub fn set_other_value(
        self,
        orbit: &mut Orbit,
        value: f64,
        catalog: &Catalog,
    ) -> Result<(), OrbitError> {
        self.other().set_value(orbit, value, catalog)
    }
}
