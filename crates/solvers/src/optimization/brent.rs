//! Brent's method for single-variable minimization.
//!
//! # Algorithm
//!
//! Brent's method keeps a bracket `[lower, upper]` whose interior holds the
//! lowest point found so far. Each iteration proposes one trial point: a
//! parabolic step through the three best points when that step is safely
//! inside the bracket and shrinking, otherwise a golden-section step into the
//! larger side. Either way the bracket tightens around the best point.
//!
//! # Initial bracket
//!
//! The caller supplies a [`Bracket`] of three ordered points
//! `lower < guess < upper` such that the objective at `guess` is strictly
//! below the objective at both ends. The solver checks this before iterating
//! and fails with [`Error::InvalidBracket`] otherwise.
//!
//! # Termination
//!
//! The solver stops with [`Status::Converged`] once
//! `upper - lower < x_abs_tol + x_rel_tol * |x|`, where `x` is the current
//! best point. Reaching `max_iters` first yields [`Status::MaxIters`], which
//! still carries the best point found.
//!
//! # Observer Events
//!
//! The three initial evaluations are not observed. After that, the solver
//! emits one [`Event`] per trial evaluation:
//!
//! - [`Event::Evaluated`]: evaluation succeeded
//! - [`Event::ModelFailed`]: model returned an error
//! - [`Event::ProblemFailed`]: problem returned an error (input or objective)
//!
//! Each event includes the bracket the trial was drawn from and the current
//! best point. Observers can return [`Action::StopEarly`] to halt immediately,
//! or [`Action::AssumeWorse`] to treat the trial as worse than the best point.

mod action;
mod bracket;
mod config;
mod error;
mod event;
mod init;
mod point;
mod search;
mod solution;
mod state;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use bracket::{Bracket, BracketError};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use point::Point;
pub use solution::{Solution, Status};

use strand_core::{Model, Observer, OptimizationProblem};

use search::search;

/// Finds the minimum of the objective using Brent's method.
///
/// The observer receives an [`Event`] for each trial evaluation.
/// See the [module docs](self) for details on event timing and observer actions.
///
/// # Errors
///
/// Returns an error if the bracket is invalid, or if the model or problem
/// fails during evaluation and the observer does not recover with
/// [`Action::AssumeWorse`] or [`Action::StopEarly`].
pub fn minimize<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: Bracket,
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    search(model, problem, bracket, config, observer, |v| v)
}

/// Finds the minimum of the objective without observer support.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or an evaluation fails.
pub fn minimize_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: Bracket,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    minimize(model, problem, bracket, config, ())
}

/// Finds the maximum of the objective using Brent's method.
///
/// The bracket must hold a `guess` whose objective is strictly above the
/// objective at both ends. Reported objectives keep their original sign.
///
/// # Errors
///
/// Returns an error if the bracket is invalid, or if the model or problem
/// fails during evaluation and the observer does not recover.
pub fn maximize<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: Bracket,
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    search(model, problem, bracket, config, observer, |v| -v)
}

/// Finds the maximum of the objective without observer support.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or an evaluation fails.
pub fn maximize_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: Bracket,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    maximize(model, problem, bracket, config, ())
}
