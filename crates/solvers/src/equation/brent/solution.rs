use strand_core::Snapshot;

use crate::equation::Evaluation;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The bracket met the tolerances or a residual was exactly zero.
    Converged,

    /// Ran `max_iters` trials without meeting the tolerances.
    MaxIters,

    /// An observer returned `StopEarly`.
    StoppedByObserver,
}

/// The result of a Brent root solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the run ended.
    pub status: Status,

    /// Root estimate, the midpoint of `bracket`.
    pub x: f64,

    /// Residual at the reported root estimate.
    pub residual: f64,

    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,

    /// Final sign-change bracket `[lower, upper]`.
    ///
    /// Collapses to `[x, x]` when a residual is exactly zero.
    pub bracket: [f64; 2],

    /// Number of trial evaluations, not counting initialization.
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    pub(super) fn from_eval(
        eval: Evaluation<I, O, 1>,
        bracket: [f64; 2],
        status: Status,
        iters: usize,
    ) -> Self {
        Self {
            status,
            x: eval.x[0],
            residual: eval.residual(),
            snapshot: eval.snapshot,
            bracket,
            iters,
        }
    }

    /// Whether the status is [`Status::Converged`].
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
