//! Core units, constants, and shared primitives for the Kerbol mechanics workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Full turn in radians.
    pub const TAU: f64 = std::f64::consts::TAU;
    /// Newtonian constant of gravitation (m³ kg⁻¹ s⁻²).
    pub const G: f64 = 6.674e-11;
    /// Seconds per Kerbin day (six hours).
    pub const SECONDS_PER_DAY: f64 = 6.0 * 3_600.0;
    /// Kerbin days per Kerbin year.
    pub const DAYS_PER_YEAR: f64 = 426.0;
    /// Seconds per Kerbin year.
    pub const SECONDS_PER_YEAR: f64 = DAYS_PER_YEAR * SECONDS_PER_DAY;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{SECONDS_PER_DAY, SECONDS_PER_YEAR};

    /// Convert Kerbin days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to Kerbin days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Split a duration into whole (years, days, hours, minutes) on the Kerbin calendar.
    pub fn split_duration(seconds: f64) -> (i64, i64, i64, i64) {
        let total = seconds.max(0.0);
        let years = (total / SECONDS_PER_YEAR).floor();
        let remaining = total - years * SECONDS_PER_YEAR;
        let days = (remaining / SECONDS_PER_DAY).floor();
        let remaining = remaining - days * SECONDS_PER_DAY;
        let hours = (remaining / 3_600.0).floor();
        let minutes = ((remaining - hours * 3_600.0) / 60.0).floor();
        (years as i64, days as i64, hours as i64, minutes as i64)
    }
}

/// Angle helpers. Every angle leaving this workspace is normalised into `[0, 2π)`.
pub mod angle {
    use super::constants::TAU;

    /// Normalise an angle into `[0, 2π)`.
    #[inline]
    pub fn normalize(angle: f64) -> f64 {
        let wrapped = angle.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU { 0.0 } else { wrapped }
    }

    /// Signed smallest difference `a - b`, in `(-π, π]`.
    #[inline]
    pub fn difference(a: f64, b: f64) -> f64 {
        let d = normalize(a - b);
        if d > std::f64::consts::PI { d - TAU } else { d }
    }
}
