use std::error::Error as StdError;

use crate::optimization::evaluate::EvalError;

use super::BracketError;

/// Failure modes of [`minimize`](super::minimize) and
/// [`maximize`](super::maximize).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The starting bracket was rejected before any iteration.
    #[error("bracket rejected: {0}")]
    InvalidBracket(#[from] BracketError),

    /// An evaluation produced a NaN objective.
    #[error("NaN objective at x = {x}")]
    NanObjective { x: f64 },

    /// The model failed and the observer did not intervene.
    #[error("model failed: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    /// The problem failed to map x or score the output.
    #[error("problem failed: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(failure: EvalError<ME, PE>) -> Self {
        match failure {
            EvalError::Model(source) => Self::Model(Box::new(source)),
            EvalError::Problem(source) => Self::Problem(Box::new(source)),
        }
    }
}
