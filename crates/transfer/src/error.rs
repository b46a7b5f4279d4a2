use kerbol_orbits::OrbitError;
use thiserror::Error;

/// Reasons a maneuver cannot be computed with its current inputs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ManeuverError {
    #[error("maneuver has neither a source nor a target orbit")]
    Empty,
    #[error("undefined {0}")]
    MissingDependency(&'static str),
    #[error("degenerate orbit: {0}")]
    DegenerateOrbit(&'static str),
    #[error("{0} orbit does not orbit the {0} body")]
    OrbitBodyMismatch(&'static str),
    #[error("no direct transfer between '{from}' and '{to}'")]
    UnsupportedTopology { from: String, to: String },
    #[error("no transfer window found after {iterations} iterations")]
    NoTransferWindowFound { iterations: usize },
    #[error(transparent)]
    Orbit(#[from] OrbitError),
}

/// Shorthand for turning an undefined derived quantity into a [`ManeuverError`].
pub(crate) trait Defined<T> {
    fn defined(self, what: &'static str) -> Result<T, ManeuverError>;
}

impl<T> Defined<T> for Option<T> {
    fn defined(self, what: &'static str) -> Result<T, ManeuverError> {
        self.ok_or(ManeuverError::MissingDependency(what))
    }
}
