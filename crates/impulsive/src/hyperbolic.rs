//! Patched-conic escape and capture burns.

use std::f64::consts::PI;

/// Periapsis speed of a hyperbola with excess speed `v_infinity` at radius `radius`.
pub fn hyperbolic_periapsis_speed(mu: f64, radius: f64, v_infinity: f64) -> f64 {
    (v_infinity * v_infinity + 2.0 * mu / radius).sqrt()
}

/// Burn at periapsis from an orbit moving at `orbital_speed` onto an escape hyperbola.
pub fn ejection_delta_v(mu: f64, radius: f64, v_infinity: f64, orbital_speed: f64) -> f64 {
    (hyperbolic_periapsis_speed(mu, radius, v_infinity) - orbital_speed).abs()
}

/// Burn at periapsis from an arrival hyperbola into an orbit moving at `orbital_speed`.
pub fn capture_delta_v(mu: f64, radius: f64, v_infinity: f64, orbital_speed: f64) -> f64 {
    ejection_delta_v(mu, radius, v_infinity, orbital_speed)
}

/// Angle between the periapsis burn point and the hyperbola's escape asymptote,
/// `π − acos(1/e)`. For an outward escape this is measured from the primary's
/// prograde direction.
///
/// Undefined when the burn does not reach escape speed.
pub fn ejection_angle(mu: f64, radius: f64, periapsis_speed: f64) -> Option<f64> {
    let energy = periapsis_speed * periapsis_speed / 2.0 - mu / radius;
    let momentum = radius * periapsis_speed;
    let eccentricity = (1.0 + 2.0 * energy * momentum * momentum / (mu * mu)).sqrt();
    if !eccentricity.is_finite() || eccentricity < 1.0 {
        return None;
    }
    Some(PI - (1.0 / eccentricity).acos())
}

/// Cost of rotating a velocity of magnitude `speed` through `angle`.
pub fn plane_change_delta_v(speed: f64, angle: f64) -> f64 {
    2.0 * speed * (angle / 2.0).sin().abs()
}
