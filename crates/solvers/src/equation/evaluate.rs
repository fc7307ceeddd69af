use thiserror::Error;

use strand_core::{EquationProblem, Model, Snapshot};

/// Residuals of an equation problem at one `x`, with the model call behind
/// them.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    /// The solver variables that were evaluated.
    pub x: [f64; N],

    /// Residuals at `x`, all zero at a solution.
    pub residuals: [f64; N],

    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,
}

impl<I, O> Evaluation<I, O, 1> {
    /// Returns the single residual of a scalar problem.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.residuals[0]
    }
}

/// Which stage of an equation evaluation failed.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// Mapping `x` to an input or computing residuals failed.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Result of [`evaluate`] for a model and equation problem pair.
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as EquationProblem<N>>::Error>,
>;

/// Maps `x` to a model input, calls the model and computes the residuals.
///
/// # Errors
///
/// Returns the first stage that fails: input mapping, the model call, or the
/// residual computation.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Problem)?;

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
    })
}
