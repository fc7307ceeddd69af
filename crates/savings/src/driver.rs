//! Solves the savings problem for every asset state on a grid.
//!
//! States are independent. Each one builds fresh [`ObjectiveParams`], a fresh
//! solver state over `[X[0], X[m - 1]]` and, for the minimization approach,
//! its own interpolation accelerator. With the `parallel` feature the states
//! run on the rayon pool; the resulting [`Policy`] is in grid order either
//! way.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use strand_core::Observer;
use strand_observers::IterationLog;
use strand_solvers::{
    equation::brent as root,
    optimization::{self, brent as min},
};

use crate::{
    grid::Grid,
    interp::{InterpError, LinearTable},
    objective::{
        Budget, EulerResidual, Household, LifetimeValue, ObjectiveParams, ParamsError,
        closed_form,
    },
};

/// Which solver computes the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Approach {
    /// Minimize the negated lifetime value with Brent's minimizer.
    Minimize,

    /// Find the root of the first-order condition with Brent's root finder.
    RootFind,
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimize => f.write_str("minimize"),
            Self::RootFind => f.write_str("root-find"),
        }
    }
}

/// Errors from building [`SolveOptions`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OptionsError {
    #[error("minimizer config: {0}")]
    Minimizer(#[from] min::ConfigError),

    #[error("root finder config: {0}")]
    RootFinder(#[from] root::ConfigError),
}

/// Solver settings shared by every state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOptions {
    minimizer: min::Config,
    root_finder: root::Config,
    verbose: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self::new(100, 1e-3, 0.0).unwrap()
    }
}

impl SolveOptions {
    /// Applies the same iteration cap and tolerances to both solvers.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite.
    pub fn new(max_iters: usize, x_abs_tol: f64, x_rel_tol: f64) -> Result<Self, OptionsError> {
        Ok(Self {
            minimizer: min::Config::new(max_iters, x_abs_tol, x_rel_tol)?,
            root_finder: root::Config::new(max_iters, x_abs_tol, x_rel_tol)?,
            verbose: false,
        })
    }

    /// Enables per-iteration `debug` logs.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn minimizer(&self) -> &min::Config {
        &self.minimizer
    }

    #[must_use]
    pub fn root_finder(&self) -> &root::Config {
        &self.root_finder
    }
}

/// How a state's solve terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Converged,
    MaxIters,
    StoppedByObserver,
}

impl From<min::Status> for Status {
    fn from(status: min::Status) -> Self {
        match status {
            min::Status::Converged => Self::Converged,
            min::Status::MaxIters => Self::MaxIters,
            min::Status::StoppedByObserver => Self::StoppedByObserver,
        }
    }
}

impl From<root::Status> for Status {
    fn from(status: root::Status) -> Self {
        match status {
            root::Status::Converged => Self::Converged,
            root::Status::MaxIters => Self::MaxIters,
            root::Status::StoppedByObserver => Self::StoppedByObserver,
        }
    }
}

/// A state's solved savings choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    /// Numerical savings choice.
    pub savings: f64,

    /// Closed-form savings for the same state.
    pub benchmark: f64,

    pub status: Status,

    pub iters: usize,
}

impl Choice {
    /// Returns `|savings - benchmark|`.
    #[must_use]
    pub fn error(&self) -> f64 {
        (self.savings - self.benchmark).abs()
    }
}

/// Why a state has no [`Choice`].
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("interpolation table: {0}")]
    Table(#[from] InterpError),

    #[error("savings grid has no interior node to start the minimizer from")]
    NoInteriorNode,

    #[error("minimizer: {0}")]
    Minimizer(#[from] min::Error),

    #[error("root finder: {0}")]
    RootFinder(#[from] root::Error),
}

/// The solve outcome for one asset state.
#[derive(Debug)]
pub struct PolicyEntry {
    pub assets: f64,
    pub outcome: Result<Choice, SolveError>,
}

/// Per-state outcomes in asset-grid order.
#[derive(Debug)]
pub struct Policy {
    approach: Approach,
    entries: Vec<PolicyEntry>,
}

impl Policy {
    #[must_use]
    pub fn approach(&self) -> Approach {
        self.approach
    }

    #[must_use]
    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }

    /// Returns the savings choice per state, `None` where the solve failed.
    #[must_use]
    pub fn savings(&self) -> Vec<Option<f64>> {
        self.entries
            .iter()
            .map(|entry| entry.outcome.as_ref().ok().map(|choice| choice.savings))
            .collect()
    }

    /// Returns the largest closed-form error among converged states.
    #[must_use]
    pub fn max_error(&self) -> Option<f64> {
        self.choices()
            .filter(|choice| choice.status == Status::Converged)
            .map(Choice::error)
            .reduce(f64::max)
    }

    /// Returns true if every state converged.
    #[must_use]
    pub fn all_converged(&self) -> bool {
        self.entries.iter().all(|entry| {
            matches!(&entry.outcome, Ok(choice) if choice.status == Status::Converged)
        })
    }

    fn choices(&self) -> impl Iterator<Item = &Choice> {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.as_ref().ok())
    }
}

/// Solves every asset state of `grid` with the chosen approach.
///
/// Per-state failures are recorded in the returned [`Policy`] and never stop
/// other states.
#[must_use]
pub fn solve_policy(grid: &Grid, beta: f64, approach: Approach, options: &SolveOptions) -> Policy {
    info!(
        %approach,
        states = grid.assets().len(),
        nodes = grid.savings().len(),
        beta,
        "solving savings policy"
    );

    // Only the minimizer reads the continuation table.
    let table = match approach {
        Approach::Minimize => Some(LinearTable::from_fn(grid.savings().to_vec(), f64::ln)),
        Approach::RootFind => None,
    };

    let solve = |&assets: &f64| {
        let outcome = match &table {
            Some(Ok(table)) => minimize_state(grid, table, assets, beta, options),
            Some(Err(error)) => Err(SolveError::Table(*error)),
            None => root_find_state(grid, assets, beta, options),
        };
        report(approach, assets, &outcome);
        PolicyEntry { assets, outcome }
    };

    #[cfg(feature = "parallel")]
    let entries = {
        use rayon::prelude::*;
        grid.assets().par_iter().map(solve).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let entries = grid.assets().iter().map(solve).collect();

    Policy { approach, entries }
}

fn minimize_state(
    grid: &Grid,
    table: &LinearTable,
    assets: f64,
    beta: f64,
    options: &SolveOptions,
) -> Result<Choice, SolveError> {
    let params = ObjectiveParams::new(assets, beta)?;
    let household = Household::new(table);
    let problem = LifetimeValue::new(params);

    let [lower, upper] = grid.savings_bounds();
    let guess = lowest_interior_node(&household, &problem, grid.savings())?;

    let mut log = IterationLog::new(format!("minimize a={assets}")).enabled(options.verbose);
    let solution = min::minimize(
        &household,
        &problem,
        min::Bracket::new(lower, guess, upper),
        options.minimizer(),
        |event: &min::Event<'_, _, _>| log.observe(event),
    )?;

    Ok(Choice {
        savings: solution.x,
        benchmark: closed_form(&params),
        status: solution.status.into(),
        iters: solution.iters,
    })
}

/// Scans the interior savings nodes for the lowest objective.
///
/// The minimizer rejects the guess if it does not beat both endpoints.
fn lowest_interior_node(
    household: &Household<'_>,
    problem: &LifetimeValue,
    savings: &[f64],
) -> Result<f64, SolveError> {
    let interior = savings.get(1..savings.len().saturating_sub(1)).unwrap_or(&[]);

    let mut best: Option<(f64, f64)> = None;
    for &x in interior {
        let objective = optimization::evaluate(household, problem, [x])
            .map_err(min::Error::from)?
            .objective;
        if best.is_none_or(|(_, lowest)| objective < lowest) {
            best = Some((x, objective));
        }
    }

    best.map(|(x, _)| x).ok_or(SolveError::NoInteriorNode)
}

fn root_find_state(
    grid: &Grid,
    assets: f64,
    beta: f64,
    options: &SolveOptions,
) -> Result<Choice, SolveError> {
    let params = ObjectiveParams::new(assets, beta)?;

    let mut log = IterationLog::new(format!("root-find a={assets}")).enabled(options.verbose);
    let solution = root::solve(
        &Budget,
        &EulerResidual::new(params),
        grid.savings_bounds(),
        options.root_finder(),
        |event: &root::Event<'_, _, _>| log.observe(event),
    )?;

    Ok(Choice {
        savings: solution.x,
        benchmark: closed_form(&params),
        status: solution.status.into(),
        iters: solution.iters,
    })
}

fn report(approach: Approach, assets: f64, outcome: &Result<Choice, SolveError>) {
    match outcome {
        Ok(choice) if choice.status == Status::Converged => debug!(
            %approach,
            assets,
            savings = choice.savings,
            error = choice.error(),
            iters = choice.iters,
            "state converged"
        ),
        Ok(choice) => warn!(
            %approach,
            assets,
            savings = choice.savings,
            status = ?choice.status,
            iters = choice.iters,
            "state did not converge; keeping best estimate"
        ),
        Err(error) => warn!(%approach, assets, %error, "state failed"),
    }
}
