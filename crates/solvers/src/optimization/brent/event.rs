use strand_core::{Model, OptimizationProblem};

use crate::optimization::evaluate::{EvalError, EvaluateResult};

use super::Point;

/// Events emitted by the Brent minimizer.
///
/// Each event carries the trial (or failed) evaluation, the bracket the trial
/// was drawn from, and the current `best` point. Observers can compare
/// against `best` to stop early or steer the search with
/// [`AssumeWorse`](super::Action::AssumeWorse).
pub enum Event<'a, M, P>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// Successful evaluation of a trial point.
    Evaluated {
        /// The evaluated point (x and objective).
        point: Point,

        /// The model input at this point.
        input: &'a M::Input,

        /// The model output at this point.
        output: &'a M::Output,

        /// The bracket before this trial is applied.
        bracket: [f64; 2],

        /// The best point so far.
        best: Point,
    },

    /// Model evaluation failed.
    ModelFailed {
        /// The x value where evaluation failed.
        x: f64,

        /// The bracket before this trial is applied.
        bracket: [f64; 2],

        /// The best point so far.
        best: Point,

        /// The model error.
        error: &'a M::Error,
    },

    /// Problem method failed (input construction or objective computation).
    ProblemFailed {
        /// The x value where evaluation failed.
        x: f64,

        /// The bracket before this trial is applied.
        bracket: [f64; 2],

        /// The best point so far.
        best: Point,

        /// The problem error.
        error: &'a P::Error,
    },
}

impl<'a, M, P> Event<'a, M, P>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    pub(super) fn new(
        x: f64,
        bracket: [f64; 2],
        best: Point,
        result: &'a EvaluateResult<M, P, 1>,
    ) -> Self {
        match result {
            Ok(eval) => Self::Evaluated {
                point: Point::from(eval),
                input: &eval.snapshot.input,
                output: &eval.snapshot.output,
                bracket,
                best,
            },
            Err(EvalError::Model(error)) => Self::ModelFailed {
                x,
                bracket,
                best,
                error,
            },
            Err(EvalError::Problem(error)) => Self::ProblemFailed {
                x,
                bracket,
                best,
                error,
            },
        }
    }

    /// Returns the x value that was evaluated (or attempted).
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Self::Evaluated { point, .. } => point.x,
            Self::ModelFailed { x, .. } | Self::ProblemFailed { x, .. } => *x,
        }
    }

    /// Returns the bracket the trial was drawn from.
    #[must_use]
    pub fn bracket(&self) -> [f64; 2] {
        match self {
            Self::Evaluated { bracket, .. }
            | Self::ModelFailed { bracket, .. }
            | Self::ProblemFailed { bracket, .. } => *bracket,
        }
    }

    /// Returns the best point so far.
    #[must_use]
    pub fn best(&self) -> Point {
        match self {
            Self::Evaluated { best, .. }
            | Self::ModelFailed { best, .. }
            | Self::ProblemFailed { best, .. } => *best,
        }
    }
}
