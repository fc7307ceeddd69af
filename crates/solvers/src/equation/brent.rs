//! Brent's method for single-variable root finding.
//!
//! # Algorithm
//!
//! The solver keeps two points whose residuals differ in sign, so a root
//! always lies between them. Each iteration tries an inverse quadratic (or
//! secant) step from the point with the smaller residual and falls back to
//! bisection whenever that step would leave the bracket or fail to shrink it
//! fast enough.
//!
//! # Termination
//!
//! The solver stops with [`Status::Converged`] once the bracket width is below
//! `x_abs_tol + x_rel_tol * |midpoint|`, or when a residual is exactly zero.
//! Reaching `max_iters` first yields [`Status::MaxIters`].
//!
//! The reported root is the midpoint of the final bracket. The solver
//! evaluates it once more so that [`Solution::residual`] and
//! [`Solution::snapshot`] describe the reported `x`.
//!
//! # Observer Events
//!
//! The endpoint evaluations and the final midpoint evaluation are not
//! observed. Every trial evaluation in between emits one [`Event`] with the
//! bracket it was drawn from. Observers can return [`Action::StopEarly`].

mod action;
mod bracket;
mod config;
mod error;
mod event;
mod solution;
mod state;


pub use action::Action;
pub use bracket::{BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use strand_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use bracket::Bounds;
use state::{Proposal, State};

/// Finds a root of the residual using Brent's method.
///
/// The endpoint residuals must differ in sign, or one of them must be exactly
/// zero (in which case that endpoint is returned immediately).
///
/// # Errors
///
/// Returns an error if the bracket is invalid, a residual is non-finite, or
/// the model or problem fails during evaluation.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();

    let left_eval = checked(evaluate(model, problem, [left])?)?;
    if left_eval.residual() == 0.0 {
        return Ok(Solution::from_eval(left_eval, [left, left], Status::Converged, 0));
    }

    let right_eval = checked(evaluate(model, problem, [right])?)?;
    if right_eval.residual() == 0.0 {
        return Ok(Solution::from_eval(right_eval, [right, right], Status::Converged, 0));
    }

    let left_residual = left_eval.residual();
    let right_residual = right_eval.residual();
    if Sign::of(left_residual) == Sign::of(right_residual) {
        return Err(BracketError::NoSignChange {
            left,
            right,
            left_residual,
            right_residual,
        }
        .into());
    }

    let mut state = State::new([left, left_residual], [right, right_residual]);

    for iter in 1..=config.max_iters() {
        if state.is_converged(config) {
            return finish(model, problem, &state, Status::Converged, iter - 1);
        }

        let bracket = state.bracket();
        let x = match state.propose() {
            Proposal::Trial(x) => x,
            Proposal::Exhausted => {
                return finish(model, problem, &state, Status::Converged, iter - 1);
            }
        };

        let result = evaluate(model, problem, [x]);
        let event = Event::new(x, bracket, &result);
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return finish(model, problem, &state, Status::StoppedByObserver, iter);
        }

        let eval = checked(result?)?;
        state.apply(x, eval.residual());
    }

    let status = if state.is_converged(config) {
        Status::Converged
    } else {
        Status::MaxIters
    };
    finish(model, problem, &state, status, config.max_iters())
}

/// Finds a root without observer support.
///
/// # Errors
///
/// Returns an error if the bracket is invalid, a residual is non-finite, or
/// the model or problem fails during evaluation.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Evaluates the bracket midpoint and packages the solution.
fn finish<M, P>(
    model: &M,
    problem: &P,
    state: &State,
    status: Status,
    iters: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    let eval = checked(evaluate(model, problem, [state.midpoint()])?)?;
    Ok(Solution::from_eval(eval, state.bracket(), status, iters))
}

/// Rejects evaluations whose residual is not finite.
fn checked<I, O>(eval: Evaluation<I, O, 1>) -> Result<Evaluation<I, O, 1>, Error> {
    let residual = eval.residual();
    if !residual.is_finite() {
        return Err(Error::NonFiniteResidual {
            x: eval.x[0],
            residual,
        });
    }
    Ok(eval)
}
