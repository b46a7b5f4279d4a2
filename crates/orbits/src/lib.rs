//! Bodies, body catalogs and two-body orbit helpers for patched-conic calculations.
//!
//! Every quantity that depends on a gravitating primary is resolved through an
//! explicit [`Catalog`] supplied by the caller. Missing dependencies surface as
//! `None` rather than NaN or zero.

pub mod anomaly;
pub mod body;
pub mod catalog;
pub mod orbit;
pub mod parameter;

pub use body::{Body, BodyDescriptor, BodyId};
pub use catalog::{Catalog, CatalogBuilder, CatalogError};
pub use orbit::{Orbit, OrbitError};
pub use parameter::OrbitalParameter;

/// Returns `Some(v)` when `v` is a finite number.
#[inline]
pub(crate) fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Returns `Some(v)` when `v` is finite and strictly positive.
#[inline]
pub(crate) fn positive(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}
