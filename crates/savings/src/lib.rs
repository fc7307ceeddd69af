//! A two-period savings problem solved state by state.
//!
//! A household with assets `a` chooses savings `x` to maximize
//! `ln(a - x) + beta * ln(x)`. The optimum is `a * beta / (1 + beta)`, which
//! makes the problem a check on two numerical routes to the same policy:
//!
//! - [`Approach::Minimize`]: Brent minimization of the negated lifetime value,
//!   with the continuation value `ln(x)` linearly interpolated on the savings
//!   grid.
//! - [`Approach::RootFind`]: Brent root finding on the first-order condition
//!   `x = beta * (a - x)`.
//!
//! ```no_run
//! use strand_savings::{Approach, SavingsConfig, solve_policy};
//!
//! let config = SavingsConfig::default();
//! let grid = config.grid()?;
//! let policy = solve_policy(&grid, config.beta, Approach::RootFind, &config.options()?);
//! println!("{:?}", policy.savings());
//! # Ok::<(), strand_savings::ConfigFileError>(())
//! ```

pub mod config;
pub mod driver;
pub mod grid;
pub mod interp;
pub mod objective;

pub use config::{ConfigFileError, SavingsConfig, SolverSettings};
pub use driver::{
    Approach, Choice, OptionsError, Policy, PolicyEntry, SolveError, SolveOptions, Status,
    solve_policy,
};
pub use grid::{Grid, GridError, GridSpec, linspace};
pub use interp::{Accel, InterpError, LinearTable};
pub use objective::{
    Budget, EulerResidual, Household, INFEASIBLE_PENALTY, LifetimeValue, ObjectiveParams,
    ParamsError, Plan, Valuation, closed_form,
};
