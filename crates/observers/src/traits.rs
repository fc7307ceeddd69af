//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, so one
//! observer can watch both the Brent minimizer and the Brent root finder.
//!
//! # Event traits
//!
//! - [`HasBracket`]: events that carry a trial point and the bracket it was
//!   drawn from
//! - [`HasResidual`]: events that carry a residual value
//! - [`HasObjective`]: events that carry an objective value
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//! - [`CanAssumeWorse`]: actions that can signal a worse-than-evaluated outcome
//!
//! # Example
//!
//! ```rust
//! use strand_core::Observer;
//! use strand_observers::traits::{CanStopEarly, HasBracket};
//!
//! /// Stops once the bracket is narrower than `width`.
//! struct NarrowEnough {
//!     width: f64,
//! }
//!
//! impl<E: HasBracket, A: CanStopEarly> Observer<E, A> for NarrowEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         let [lower, upper] = event.bracket();
//!         (upper - lower < self.width).then(A::stop_early)
//!     }
//! }
//! ```

use strand_core::{EquationProblem, Model, OptimizationProblem};

use strand_solvers::{equation::brent as root, optimization::brent as min};

/// An event emitted for one trial evaluation inside a bracket.
pub trait HasBracket {
    /// Returns the trial x value.
    fn x(&self) -> f64;

    /// Returns the bracket `[lower, upper]` the trial was drawn from.
    fn bracket(&self) -> [f64; 2];

    /// Returns the solver's value at the trial point.
    ///
    /// This is the objective for minimizer events and the residual for root
    /// finder events, or `None` when the evaluation failed.
    fn value(&self) -> Option<f64>;
}

/// An event that carries a residual value.
pub trait HasResidual {
    /// Returns the residual for this event.
    ///
    /// Returns `f64::NAN` when the event represents an error and no residual
    /// is available.
    fn residual(&self) -> f64;
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    ///
    /// Returns `f64::NAN` when the event represents an error and no objective
    /// is available.
    fn objective(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

/// An action type that can signal a worse-than-evaluated outcome.
pub trait CanAssumeWorse {
    /// Returns the action that treats this evaluation as worse than the best.
    fn assume_worse() -> Self;
}

impl<M, P> HasBracket for min::Event<'_, M, P>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    fn x(&self) -> f64 {
        min::Event::x(self)
    }

    fn bracket(&self) -> [f64; 2] {
        min::Event::bracket(self)
    }

    fn value(&self) -> Option<f64> {
        match self {
            min::Event::Evaluated { point, .. } => Some(point.objective),
            min::Event::ModelFailed { .. } | min::Event::ProblemFailed { .. } => None,
        }
    }
}

impl<M, P> HasBracket for root::Event<'_, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    fn x(&self) -> f64 {
        root::Event::x(self)
    }

    fn bracket(&self) -> [f64; 2] {
        root::Event::bracket(self)
    }

    fn value(&self) -> Option<f64> {
        root::Event::residual(self)
    }
}

impl<M, P> HasResidual for root::Event<'_, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    fn residual(&self) -> f64 {
        root::Event::residual(self).unwrap_or(f64::NAN)
    }
}

impl<M, P> HasObjective for min::Event<'_, M, P>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    fn objective(&self) -> f64 {
        HasBracket::value(self).unwrap_or(f64::NAN)
    }
}

impl CanStopEarly for root::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for min::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanAssumeWorse for min::Action {
    fn assume_worse() -> Self {
        Self::AssumeWorse
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use strand_core::{EquationProblem, Model, Observer};
    use strand_solvers::equation::brent::{Config, Status, solve};

    use super::*;

    struct Line;

    impl Model for Line {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, x: &f64) -> Result<f64, Infallible> {
            Ok(2.0 * x - 1.0)
        }
    }

    struct Passthrough;

    impl EquationProblem<1> for Passthrough {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
            Ok(x[0])
        }

        fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
            Ok([*output])
        }
    }

    struct NarrowEnough {
        width: f64,
        seen: Vec<[f64; 2]>,
    }

    impl<E: HasBracket + HasResidual, A: CanStopEarly> Observer<E, A> for NarrowEnough {
        fn observe(&mut self, event: &E) -> Option<A> {
            assert_relative_eq!(event.value().unwrap_or(f64::NAN), event.residual());
            let [lower, upper] = event.bracket();
            self.seen.push([lower, upper]);
            (upper - lower < self.width).then(A::stop_early)
        }
    }

    #[test]
    fn generic_observer_drives_root_finder() {
        let mut observer = NarrowEnough {
            width: 10.0,
            seen: Vec::new(),
        };
        let config = Config::default();

        let solution = solve(
            &Line,
            &Passthrough,
            [-4.0, 4.0],
            &config,
            |event: &root::Event<'_, _, _>| observer.observe(event),
        )
        .expect("line has a root");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(observer.seen, vec![[-4.0, 4.0]]);
    }

    #[test]
    fn actions_map_to_solver_variants() {
        assert_eq!(root::Action::stop_early(), root::Action::StopEarly);
        assert_eq!(min::Action::stop_early(), min::Action::StopEarly);
        assert_eq!(min::Action::assume_worse(), min::Action::AssumeWorse);
    }
}
