//! Time ↔ anomaly conversions.
//!
//! Propagation (time → true anomaly) uses the second-order equation-of-centre
//! series, a closed-form approximation. The inverse (true anomaly → mean anomaly)
//! is exact, so `M → ν → M'` only round-trips approximately: within 0.1° up to
//! e ≈ 0.1, degrading as e³ beyond that. [`Orbit::eccentric_anomaly_with_mean_anomaly`]
//! offers an exact Newton solve for callers that need it.

use std::f64::consts::PI;

use kerbol_core::angle::normalize;
use kerbol_core::constants::TAU;

use crate::catalog::Catalog;
use crate::orbit::Orbit;
use crate::{finite, positive};

const KEPLER_MAX_ITERATIONS: usize = 50;
const KEPLER_TOLERANCE: f64 = 1e-12;

impl Orbit {
    /// `sqrt(µ / a³)`, undefined without a gravitational parameter or with a non-positive axis.
    pub fn mean_motion(&self, catalog: &Catalog) -> Option<f64> {
        let a = positive(self.semi_major_axis)?;
        let mu = self.gravitational_parameter(catalog)?;
        positive((mu / (a * a * a)).sqrt())
    }

    pub fn period(&self, catalog: &Catalog) -> Option<f64> {
        positive(TAU / self.mean_motion(catalog)?)
    }

    pub fn mean_anomaly_at_time(&self, time: f64, catalog: &Catalog) -> Option<f64> {
        let n = self.mean_motion(catalog)?;
        finite(normalize(self.mean_anomaly_at_epoch + n * (time - self.epoch)))
    }

    /// Approximate true anomaly: `M + 2e·sin M + 1.25e²·sin 2M`.
    pub fn true_anomaly_with_mean_anomaly(&self, mean_anomaly: f64) -> f64 {
        let e = self.eccentricity;
        normalize(
            mean_anomaly + 2.0 * e * mean_anomaly.sin() + 1.25 * e * e * (2.0 * mean_anomaly).sin(),
        )
    }

    pub fn true_anomaly_at_time(&self, time: f64, catalog: &Catalog) -> Option<f64> {
        Some(self.true_anomaly_with_mean_anomaly(self.mean_anomaly_at_time(time, catalog)?))
    }

    pub fn eccentric_anomaly_with_true_anomaly(&self, true_anomaly: f64) -> f64 {
        let e = self.eccentricity;
        let cos_nu = true_anomaly.cos();
        let anomaly = ((e + cos_nu) / (1.0 + e * cos_nu)).clamp(-1.0, 1.0).acos();
        if normalize(true_anomaly) >= PI {
            TAU - anomaly
        } else {
            anomaly
        }
    }

    /// Exact Kepler equation `M = E − e·sin E`.
    pub fn mean_anomaly_with_true_anomaly(&self, true_anomaly: f64) -> f64 {
        let anomaly = self.eccentric_anomaly_with_true_anomaly(true_anomaly);
        normalize(anomaly - self.eccentricity * anomaly.sin())
    }

    /// Solve Kepler's equation for E by Newton iteration.
    pub fn eccentric_anomaly_with_mean_anomaly(&self, mean_anomaly: f64) -> f64 {
        let e = self.eccentricity;
        let m = normalize(mean_anomaly);
        let mut anomaly = if e < 0.8 { m } else { PI };
        for _ in 0..KEPLER_MAX_ITERATIONS {
            let step = (anomaly - e * anomaly.sin() - m) / (1.0 - e * anomaly.cos());
            anomaly -= step;
            if step.abs() < KEPLER_TOLERANCE {
                break;
            }
        }
        normalize(anomaly)
    }

    pub fn true_anomaly_with_eccentric_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        let e = self.eccentricity;
        let half = eccentric_anomaly / 2.0;
        let y = (1.0 + e).sqrt() * half.sin();
        let x = (1.0 - e).sqrt() * half.cos();
        normalize(2.0 * y.atan2(x))
    }

    /// Epoch of the most recent periapsis passage at or before `epoch`.
    pub fn time_of_periapsis_passage(&self, catalog: &Catalog) -> Option<f64> {
        let n = self.mean_motion(catalog)?;
        Some(self.epoch - normalize(self.mean_anomaly_at_epoch) / n)
    }

    pub fn time_to_periapsis(&self, time: f64, catalog: &Catalog) -> Option<f64> {
        let n = self.mean_motion(catalog)?;
        Some(normalize(-self.mean_anomaly_at_time(time, catalog)?) / n)
    }

    pub fn time_to_apoapsis(&self, time: f64, catalog: &Catalog) -> Option<f64> {
        let n = self.mean_motion(catalog)?;
        Some(normalize(PI - self.mean_anomaly_at_time(time, catalog)?) / n)
    }
}
