use strand_core::{Model, OptimizationProblem};

use crate::optimization::evaluate::{Evaluation, evaluate};

use super::{Bracket, BracketError, Error, Point, state::State};

/// Evaluates the three bracket points and builds the initial state.
///
/// Initialization is not observed: any evaluation failure is returned as an
/// error, since a bracket cannot be confirmed without all three objectives.
pub(super) fn init<M, P, F>(
    model: &M,
    problem: &P,
    bracket: &Bracket,
    transform: &F,
) -> Result<State<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
    F: Fn(f64) -> f64,
{
    bracket.validate()?;

    let lower = checked(evaluate(model, problem, [bracket.lower])?)?;
    let upper = checked(evaluate(model, problem, [bracket.upper])?)?;
    let guess = checked(evaluate(model, problem, [bracket.guess])?)?;

    let f_lower = transform(lower.objective);
    let f_upper = transform(upper.objective);
    let f_guess = transform(guess.objective);

    if !(f_guess < f_lower && f_guess < f_upper) {
        return Err(BracketError::NoMinimum {
            lower: bracket.lower,
            guess: bracket.guess,
            upper: bracket.upper,
            f_lower: lower.objective,
            f_guess: guess.objective,
            f_upper: upper.objective,
        }
        .into());
    }

    let point = Point::from(&guess);
    Ok(State::new(
        bracket.lower,
        bracket.upper,
        point,
        guess.snapshot,
    ))
}

/// Rejects evaluations whose objective is NaN.
pub(super) fn checked<I, O>(eval: Evaluation<I, O, 1>) -> Result<Evaluation<I, O, 1>, Error> {
    if eval.objective.is_nan() {
        return Err(Error::NanObjective { x: eval.x[0] });
    }
    Ok(eval)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use thiserror::Error;

    struct IdentityModel;

    impl Model for IdentityModel {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Self::Error> {
            Ok(*x)
        }
    }

    struct SquaredDistance {
        target: f64,
    }

    impl OptimizationProblem<1> for SquaredDistance {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            Ok(x[0])
        }

        fn objective(&self, _: &f64, output: &f64) -> Result<f64, Self::Error> {
            Ok((output - self.target).powi(2))
        }
    }

    fn identity_transform(x: f64) -> f64 {
        x
    }

    #[test]
    fn valid_bracket_starts_at_guess() {
        let problem = SquaredDistance { target: 2.0 };
        let bracket = Bracket::new(0.0, 1.5, 5.0);

        let state = init(&IdentityModel, &problem, &bracket, &identity_transform)
            .expect("should initialize");

        assert_relative_eq!(state.best().x, 1.5);
        assert_relative_eq!(state.best().objective, 0.25);
        assert_eq!(state.bracket(), [0.0, 5.0]);
    }

    #[test]
    fn guess_not_below_ends_is_rejected() {
        // Minimum at 4.5 lies between guess and upper, but f(upper) < f(guess).
        let problem = SquaredDistance { target: 4.5 };
        let bracket = Bracket::new(0.0, 1.0, 5.0);

        let result = init(&IdentityModel, &problem, &bracket, &identity_transform);

        assert!(matches!(
            result,
            Err(Error::InvalidBracket(BracketError::NoMinimum { .. }))
        ));
    }

    #[test]
    fn unordered_bracket_fails_before_evaluating() {
        let problem = SquaredDistance { target: 1.0 };
        let bracket = Bracket::new(2.0, 1.0, 3.0);

        let result = init(&IdentityModel, &problem, &bracket, &identity_transform);

        assert!(matches!(
            result,
            Err(Error::InvalidBracket(BracketError::NotOrdered { .. }))
        ));
    }

    #[derive(Debug, Error)]
    #[error("no output below zero")]
    struct NegativeInput;

    struct NonNegative;

    impl Model for NonNegative {
        type Input = f64;
        type Output = f64;
        type Error = NegativeInput;

        fn call(&self, x: &f64) -> Result<f64, Self::Error> {
            if *x < 0.0 { Err(NegativeInput) } else { Ok(*x) }
        }
    }

    #[test]
    fn endpoint_failure_is_an_error() {
        let problem = SquaredDistance { target: 1.0 };
        let bracket = Bracket::new(-1.0, 1.0, 3.0);

        let result = init(&NonNegative, &problem, &bracket, &identity_transform);

        assert!(matches!(result, Err(Error::Model(_))));
    }

    #[test]
    fn nan_objective_is_an_error() {
        let problem = SquaredDistance { target: f64::NAN };
        let bracket = Bracket::new(0.0, 1.0, 3.0);

        let result = init(&IdentityModel, &problem, &bracket, &identity_transform);

        assert!(matches!(result, Err(Error::NanObjective { .. })));
    }
}
