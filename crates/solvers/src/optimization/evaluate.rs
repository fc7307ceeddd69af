use thiserror::Error;

use strand_core::{Model, OptimizationProblem, Snapshot};

/// The objective of an optimization problem at one `x`, with the model call
/// behind it.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    /// The solver variables that were evaluated.
    pub x: [f64; N],

    /// Objective value at `x`.
    pub objective: f64,

    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,
}

/// Which stage of an objective evaluation failed.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// Mapping `x` to an input or computing the objective failed.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Result of [`evaluate`] for a model and optimization problem pair.
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as OptimizationProblem<N>>::Error>,
>;

/// Maps `x` to a model input, calls the model and computes the objective.
///
/// Grid scans that pick a starting point for a solver use this directly.
///
/// # Errors
///
/// Returns the first stage that fails: input mapping, the model call, or the
/// objective computation.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: OptimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let objective = problem
        .objective(&input, &output)
        .map_err(EvalError::Problem)?;

    Ok(Evaluation {
        x,
        objective,
        snapshot: Snapshot::new(input, output),
    })
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use approx::assert_relative_eq;

    use super::*;

    #[derive(Debug, Error)]
    #[error("x = {0} is outside the domain")]
    struct OutsideDomain(f64);

    /// Squares its input.
    struct Square;

    impl Model for Square {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Infallible> {
            Ok(x * x)
        }
    }

    /// Objective `x²` on `[-1, 1]`, rejecting inputs outside.
    struct UnitInterval;

    impl OptimizationProblem<1> for UnitInterval {
        type Input = f64;
        type Output = f64;
        type Error = OutsideDomain;

        fn input(&self, x: &[f64; 1]) -> Result<f64, OutsideDomain> {
            if x[0].abs() > 1.0 {
                return Err(OutsideDomain(x[0]));
            }
            Ok(x[0])
        }

        fn objective(&self, _input: &f64, output: &f64) -> Result<f64, OutsideDomain> {
            Ok(*output)
        }
    }

    #[test]
    fn objective_comes_from_model_output() {
        let eval = evaluate(&Square, &UnitInterval, [0.5]).expect("inside domain");
        assert_relative_eq!(eval.objective, 0.25);
        assert_relative_eq!(eval.snapshot.output, 0.25);
    }

    #[test]
    fn problem_errors_stop_before_the_model() {
        let result = evaluate(&Square, &UnitInterval, [2.0]);
        assert!(matches!(result, Err(EvalError::Problem(OutsideDomain(x))) if x > 1.0));
    }
}
