use strand_core::{EquationProblem, Model};

use crate::equation::{EvalError, EvaluateResult};

/// Events emitted by the Brent root finder, one per trial evaluation.
pub enum Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// Successful evaluation of a trial point.
    Evaluated {
        /// The trial x value.
        x: f64,

        /// Residual at the trial point.
        residual: f64,

        /// The model input at this point.
        input: &'a M::Input,

        /// The model output at this point.
        output: &'a M::Output,

        /// The sign-change bracket the trial was drawn from.
        bracket: [f64; 2],
    },

    /// Model evaluation failed.
    ModelFailed {
        /// The x value where evaluation failed.
        x: f64,

        /// The sign-change bracket the trial was drawn from.
        bracket: [f64; 2],

        /// The model error.
        error: &'a M::Error,
    },

    /// Problem method failed (input construction or residual computation).
    ProblemFailed {
        /// The x value where evaluation failed.
        x: f64,

        /// The sign-change bracket the trial was drawn from.
        bracket: [f64; 2],

        /// The problem error.
        error: &'a P::Error,
    },
}

impl<'a, M, P> Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    pub(super) fn new(x: f64, bracket: [f64; 2], result: &'a EvaluateResult<M, P, 1>) -> Self {
        match result {
            Ok(eval) => Self::Evaluated {
                x,
                residual: eval.residual(),
                input: &eval.snapshot.input,
                output: &eval.snapshot.output,
                bracket,
            },
            Err(EvalError::Model(error)) => Self::ModelFailed {
                x,
                bracket,
                error,
            },
            Err(EvalError::Problem(error)) => Self::ProblemFailed {
                x,
                bracket,
                error,
            },
        }
    }

    /// Returns the x value that was evaluated (or attempted).
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Self::Evaluated { x, .. } | Self::ModelFailed { x, .. } | Self::ProblemFailed { x, .. } => {
                *x
            }
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

    /// Returns the residual if the evaluation succeeded.
    #[must_use]
    pub fn residual(&self) -> Option<f64> {
        match self {
            Self::Evaluated { residual, .. } => Some(*residual),
            Self::ModelFailed { .. } | Self::ProblemFailed { .. } => None,
        }
    }
}
