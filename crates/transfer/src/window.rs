//! Transfer window search: find the departure time at which the transfer's travel
//! time equals the time the target needs to reach the rendezvous point.

use kerbol_orbits::Catalog;
use tracing::{debug, trace};

use crate::error::ManeuverError;
use crate::geometry::{TransferEvaluation, TransferLeg};

/// How the bracketed root is refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Refinement {
    #[default]
    Bisection,
    /// Regula falsi on the timing error; falls back to the midpoint on flat brackets.
    FalsePosition,
}

/// Tuning knobs for [`find_transfer_window`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSearchConfig {
    /// The bracketing step is the shorter of the two periods divided by this.
    pub step_divisor: f64,
    /// Stop once either bracket end is within this many seconds of a window.
    pub tolerance_seconds: f64,
    /// Upper bound on transfer evaluations before giving up.
    pub max_iterations: usize,
    pub refinement: Refinement,
}

impl Default for WindowSearchConfig {
    fn default() -> Self {
        Self {
            step_divisor: 6.0,
            tolerance_seconds: 1.0,
            max_iterations: 500,
            refinement: Refinement::Bisection,
        }
    }
}

/// The first transfer window at or after the search start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferWindow {
    pub evaluation: TransferEvaluation,
    /// Number of transfer evaluations the search needed.
    pub iterations: usize,
}

struct Search<'a> {
    leg: &'a TransferLeg,
    catalog: &'a Catalog,
    limit: usize,
    iterations: usize,
}

impl Search<'_> {
    fn sample(&mut self, time: f64) -> Result<TransferEvaluation, ManeuverError> {
        if self.iterations >= self.limit {
            return Err(ManeuverError::NoTransferWindowFound {
                iterations: self.iterations,
            });
        }
        self.iterations += 1;
        let evaluation = self
            .leg
            .evaluate(time, self.catalog)
            .ok_or(ManeuverError::NoTransferWindowFound {
                iterations: self.iterations,
            })?;
        trace!(
            time,
            error = evaluation.timing_error(),
            iteration = self.iterations,
            "transfer sample"
        );
        Ok(evaluation)
    }
}

/// Step forward from `earliest` until the timing error changes sign, then refine the
/// bracket until one end is within tolerance. Returns the end with the smaller error.
pub fn find_transfer_window(
    leg: &TransferLeg,
    catalog: &Catalog,
    earliest: f64,
    config: &WindowSearchConfig,
) -> Result<TransferWindow, ManeuverError> {
    let periods = (leg.source.period(catalog), leg.target.period(catalog));
    let (Some(source_period), Some(target_period)) = periods else {
        return Err(ManeuverError::NoTransferWindowFound { iterations: 0 });
    };
    let step = source_period.min(target_period) / config.step_divisor;
    if !(step.is_finite() && step > 0.0) {
        return Err(ManeuverError::NoTransferWindowFound { iterations: 0 });
    }

    // the faster body starts ahead of the window when it is the source
    let start_positive = source_period < target_period;
    let before_window = |error: f64| {
        if start_positive {
            error > 0.0
        } else {
            error < 0.0
        }
    };

    let mut search = Search {
        leg,
        catalog,
        limit: config.max_iterations,
        iterations: 0,
    };

    let mut lower = search.sample(earliest)?;
    while !before_window(lower.timing_error()) {
        lower = search.sample(lower.time + step)?;
    }
    let mut upper = search.sample(lower.time + step)?;
    while before_window(upper.timing_error()) {
        lower = upper;
        upper = search.sample(lower.time + step)?;
    }
    debug!(
        lower = lower.time,
        upper = upper.time,
        iterations = search.iterations,
        "transfer window bracketed"
    );

    while lower.timing_error().abs().min(upper.timing_error().abs()) >= config.tolerance_seconds {
        let (e_lower, e_upper) = (lower.timing_error(), upper.timing_error());
        let midpoint = (lower.time + upper.time) / 2.0;
        let time = match config.refinement {
            Refinement::Bisection => midpoint,
            Refinement::FalsePosition if e_upper != e_lower => {
                lower.time - e_lower * (upper.time - lower.time) / (e_upper - e_lower)
            }
            Refinement::FalsePosition => midpoint,
        };
        let guess = search.sample(time)?;
        if before_window(guess.timing_error()) {
            lower = guess;
        } else {
            upper = guess;
        }
    }

    let evaluation = if lower.timing_error().abs() < upper.timing_error().abs() {
        lower
    } else {
        upper
    };
    debug!(
        time = evaluation.time,
        iterations = search.iterations,
        "transfer window found"
    );
    Ok(TransferWindow {
        evaluation,
        iterations: search.iterations,
    })
}
