use std::convert::Infallible;

use approx::assert_relative_eq;
use thiserror::Error;

use strand_core::{Model, OptimizationProblem};

use super::{
    Action, Bracket, BracketError, Config, Error, Event, Status, maximize_unobserved, minimize,
    minimize_unobserved,
};

/// A simple polynomial: f(x) = x³ - 4x.
struct Polynomial;

impl Model for Polynomial {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(x.powi(3) - 4.0 * x)
    }
}

/// Objective: just use the model output as the objective.
struct ObjectiveOutput;

impl OptimizationProblem<1> for ObjectiveOutput {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Self::Error> {
        Ok(*output)
    }
}

#[test]
fn minimizes_polynomial() {
    // Local minimum at x = 2/sqrt(3) ≈ 1.1547.
    let expected_x = 2.0 / 3.0_f64.sqrt();

    let solution = minimize_unobserved(
        &Polynomial,
        &ObjectiveOutput,
        Bracket::new(0.0, 1.0, 2.0),
        &Config::default(),
    )
    .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, expected_x, epsilon = 1e-6);
    assert!(solution.iters < 100);
}

#[test]
fn maximizes_polynomial() {
    // Local maximum at x = -2/sqrt(3) ≈ -1.1547.
    let expected_x = -2.0 / 3.0_f64.sqrt();

    let solution = maximize_unobserved(
        &Polynomial,
        &ObjectiveOutput,
        Bracket::new(-2.0, -1.0, 0.0),
        &Config::default(),
    )
    .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, expected_x, epsilon = 1e-6);
    // Objective keeps its original sign: f(-2/√3) = 16 / (3√3).
    assert_relative_eq!(
        solution.objective,
        16.0 / (3.0 * 3.0_f64.sqrt()),
        epsilon = 1e-9
    );
}

#[test]
fn maximize_rejects_a_minimum_bracket() {
    let result = maximize_unobserved(
        &Polynomial,
        &ObjectiveOutput,
        Bracket::new(0.0, 1.0, 2.0),
        &Config::default(),
    );

    assert!(matches!(
        result,
        Err(Error::InvalidBracket(BracketError::NoMinimum { .. }))
    ));
}

/// Quadratic model: f(x) = (x - 5)².
struct Quadratic;

impl Model for Quadratic {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok((x - 5.0).powi(2))
    }
}

#[test]
fn bracket_never_widens_and_keeps_best_inside() {
    let mut widths = Vec::new();
    let mut inside = true;
    let observer = |event: &Event<'_, _, _>| {
        let [lower, upper] = event.bracket();
        widths.push(upper - lower);
        let best = event.best().x;
        inside &= lower <= best && best <= upper;
        None
    };

    let config = Config::new(100, 1e-3, 0.0).unwrap();
    let solution = minimize(
        &Quadratic,
        &ObjectiveOutput,
        Bracket::new(0.0, 2.0, 10.0),
        &config,
        observer,
    )
    .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert!(inside);
    assert!(widths.windows(2).all(|w| w[1] <= w[0]));

    let [lower, upper] = solution.bracket;
    assert!(upper - lower < 1e-3);
    assert!(lower <= solution.x && solution.x <= upper);
    assert_relative_eq!(solution.x, 5.0, epsilon = 1e-3);
}

#[test]
fn exact_parabola_needs_few_iterations() {
    let solution = minimize_unobserved(
        &Quadratic,
        &ObjectiveOutput,
        Bracket::new(0.0, 2.0, 10.0),
        &Config::default(),
    )
    .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 5.0, epsilon = 1e-8);
    assert!(solution.iters < 50, "took {} iterations", solution.iters);
}

#[test]
fn iteration_cap_reports_max_iters() {
    let config = Config::new(3, 0.0, 0.0).unwrap();

    let solution = minimize_unobserved(
        &Quadratic,
        &ObjectiveOutput,
        Bracket::new(0.0, 2.0, 10.0),
        &config,
    )
    .expect("should return best so far");

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 3);
    assert!(!solution.is_converged());
    // Best so far is still better than the guess.
    assert!(solution.objective < 9.0);
}

#[test]
fn observer_can_stop_early() {
    let mut eval_count = 0;
    let observer = |_event: &Event<'_, _, _>| {
        eval_count += 1;
        (eval_count >= 3).then_some(Action::StopEarly)
    };

    let solution = minimize(
        &Polynomial,
        &ObjectiveOutput,
        Bracket::new(0.0, 1.0, 3.0),
        &Config::default(),
        observer,
    )
    .expect("should stop cleanly");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 3);
    assert_eq!(eval_count, 3);
}

#[test]
fn assume_worse_steers_away_from_true_minimum() {
    // True minimum at 5; mark everything above 4 as worse.
    let observer = |event: &Event<'_, _, _>| (event.x() > 4.0).then_some(Action::AssumeWorse);

    let config = Config::new(100, 1e-6, 0.0).unwrap();
    let solution = minimize(
        &Quadratic,
        &ObjectiveOutput,
        Bracket::new(0.0, 2.0, 10.0),
        &config,
        observer,
    )
    .expect("should complete");

    assert!(
        solution.x <= 4.0,
        "search should stay left of 4, got {}",
        solution.x
    );
}

#[derive(Debug, Clone, Error)]
#[error("model failed at x={x}")]
struct BandError {
    x: f64,
}

/// Model that fails on a band of x values inside the bracket.
struct GapModel;

impl Model for GapModel {
    type Input = f64;
    type Output = f64;
    type Error = BandError;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        if (4.0..5.0).contains(x) {
            Err(BandError { x: *x })
        } else {
            Ok((x - 2.0).powi(2))
        }
    }
}

#[test]
fn failures_recover_with_assume_worse() {
    // Minimum at 2; the first golden step from guess 1 lands near 4.44,
    // inside the failing band.
    let observer = |event: &Event<'_, _, _>| {
        matches!(event, Event::ModelFailed { .. }).then_some(Action::AssumeWorse)
    };

    let solution = minimize(
        &GapModel,
        &ObjectiveOutput,
        Bracket::new(0.0, 1.0, 10.0),
        &Config::default(),
        observer,
    )
    .expect("should recover and converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 2.0, epsilon = 1e-6);
}

#[test]
fn failing_trial_without_action_errors() {
    // Guess 7.5 sits below both ends; the second trial lands near 9.2.
    struct Valley;

    impl Model for Valley {
        type Input = f64;
        type Output = f64;
        type Error = BandError;

        fn call(&self, x: &f64) -> Result<f64, Self::Error> {
            if (5.0..7.0).contains(x) || (8.0..10.0).contains(x) {
                Err(BandError { x: *x })
            } else {
                Ok((x - 7.5).powi(2))
            }
        }
    }

    let result = minimize_unobserved(
        &Valley,
        &ObjectiveOutput,
        Bracket::new(0.0, 7.5, 12.0),
        &Config::default(),
    );

    assert!(matches!(result, Err(Error::Model(_))));
}
