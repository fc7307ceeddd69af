use strand_core::{Model, Observer, OptimizationProblem};

use crate::optimization::evaluate::evaluate;

use super::{
    Action, Bracket, Config, Error, Event, Point, Solution,
    init::{checked, init},
    solution::Status,
};

/// Runs Brent's iteration on `transform(objective)`.
///
/// `transform` is the identity for minimization and negation for
/// maximization. Reported objectives are never transformed.
pub(super) fn search<M, P, Obs, F>(
    model: &M,
    problem: &P,
    bracket: Bracket,
    config: &Config,
    mut observer: Obs,
    transform: F,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
    F: Fn(f64) -> f64,
{
    let mut state = init(model, problem, &bracket, &transform)?;

    for iter in 1..=config.max_iters() {
        if state.is_converged(config) {
            return Ok(state.into_solution(Status::Converged, iter - 1));
        }

        let bracket = state.bracket();
        let best = state.best();
        let x = state.propose(&transform);

        let result = evaluate(model, problem, [x]);
        let action = observer.observe(&Event::new(x, bracket, best, &result));

        match (action, result) {
            (Some(Action::StopEarly), _) => {
                return Ok(state.into_solution(Status::StoppedByObserver, iter));
            }
            (Some(Action::AssumeWorse), _) => {
                state.apply(Point::new(x, transform(f64::INFINITY)), None, &transform);
            }
            (None, Ok(eval)) => {
                let eval = checked(eval)?;
                state.apply(Point::from(&eval), Some(eval.snapshot), &transform);
            }
            (None, Err(error)) => return Err(error.into()),
        }
    }

    let status = if state.is_converged(config) {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Ok(state.into_solution(status, config.max_iters()))
}
