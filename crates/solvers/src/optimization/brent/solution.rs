use strand_core::Snapshot;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The bracket width met the configured tolerances.
    Converged,

    /// Ran `max_iters` trials without meeting the tolerances.
    MaxIters,

    /// An observer returned `StopEarly`.
    StoppedByObserver,
}

/// The result of a Brent minimization (or maximization).
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the run ended.
    pub status: Status,

    /// Lowest point found (highest, when maximizing).
    pub x: f64,

    /// Objective at `x`, with its original sign.
    pub objective: f64,

    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,

    /// Final bracket `[lower, upper]`, which always contains `x`.
    pub bracket: [f64; 2],

    /// Number of trial evaluations, not counting initialization.
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    /// Whether the status is [`Status::Converged`].
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
