//! The household's two-period problem in solver terms.
//!
//! A household with assets `a` saves `x` and consumes `a - x`, valuing the
//! plan at `ln(a - x) + beta * V(x)`. The continuation value `V` is `ln`,
//! approximated by a [`LinearTable`] for the minimization approach.
//!
//! - [`Household`] and [`LifetimeValue`] pose the choice as a minimization.
//! - [`Budget`] and [`EulerResidual`] pose the first-order condition
//!   `x = beta * (a - x)` as a root-finding problem.

use std::convert::Infallible;

use thiserror::Error;

use strand_core::{EquationProblem, Model, OptimizationProblem};

use crate::interp::{Accel, InterpError, LinearTable};

/// Objective reported to the minimizer for plans without positive consumption.
pub const INFEASIBLE_PENALTY: f64 = 1e9;

/// Errors from validating [`ObjectiveParams`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParamsError {
    #[error("assets must be positive and finite, got {0}")]
    Assets(f64),

    #[error("beta must lie in (0, 1), got {0}")]
    Beta(f64),
}

/// The parameters of one state's problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveParams {
    assets: f64,
    beta: f64,
}

impl ObjectiveParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns an error unless `assets` is positive and finite and `beta`
    /// lies strictly between zero and one.
    pub fn new(assets: f64, beta: f64) -> Result<Self, ParamsError> {
        if !(assets.is_finite() && assets > 0.0) {
            return Err(ParamsError::Assets(assets));
        }
        if !(beta > 0.0 && beta < 1.0) {
            return Err(ParamsError::Beta(beta));
        }
        Ok(Self { assets, beta })
    }

    #[must_use]
    pub fn assets(&self) -> f64 {
        self.assets
    }

    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Maps a savings choice to a plan in this state.
    #[must_use]
    pub fn plan(&self, savings: f64) -> Plan {
        Plan {
            assets: self.assets,
            savings,
        }
    }
}

/// The optimal savings `a * beta / (1 + beta)` for a `ln` continuation value.
#[must_use]
pub fn closed_form(params: &ObjectiveParams) -> f64 {
    params.assets * params.beta / (1.0 + params.beta)
}

/// A savings choice in a given state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub assets: f64,
    pub savings: f64,
}

impl Plan {
    #[must_use]
    pub fn consumption(&self) -> f64 {
        self.assets - self.savings
    }
}

/// The outcome of valuing a [`Plan`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Valuation {
    /// Positive consumption with its utility and the continuation value.
    Feasible {
        consumption: f64,
        utility: f64,
        continuation: f64,
    },

    /// Consumption of zero or less; `shortfall` is `x - a`.
    Infeasible { shortfall: f64 },
}

impl Valuation {
    /// Returns `utility + beta * continuation`, or `None` if infeasible.
    #[must_use]
    pub fn lifetime_value(&self, beta: f64) -> Option<f64> {
        match *self {
            Self::Feasible {
                utility,
                continuation,
                ..
            } => Some(utility + beta * continuation),
            Self::Infeasible { .. } => None,
        }
    }
}

/// Values plans using an interpolated continuation value.
///
/// Each household owns its accelerator, so one household serves one solve.
#[derive(Debug)]
pub struct Household<'t> {
    table: &'t LinearTable,
    accel: Accel,
}

impl<'t> Household<'t> {
    #[must_use]
    pub fn new(table: &'t LinearTable) -> Self {
        Self {
            table,
            accel: Accel::new(),
        }
    }
}

impl Model for Household<'_> {
    type Input = Plan;
    type Output = Valuation;
    type Error = InterpError;

    /// Interpolates the continuation value only for feasible plans.
    fn call(&self, plan: &Plan) -> Result<Valuation, InterpError> {
        let consumption = plan.consumption();
        if consumption <= 0.0 {
            return Ok(Valuation::Infeasible {
                shortfall: -consumption,
            });
        }

        Ok(Valuation::Feasible {
            consumption,
            utility: consumption.ln(),
            continuation: self.table.eval(&self.accel, plan.savings)?,
        })
    }
}

/// The minimization form of the lifetime value.
///
/// Feasible plans score `-(ln(a - x) + beta * V(x))`; infeasible plans score
/// [`INFEASIBLE_PENALTY`].
#[derive(Debug, Clone, Copy)]
pub struct LifetimeValue {
    params: ObjectiveParams,
}

impl LifetimeValue {
    #[must_use]
    pub fn new(params: ObjectiveParams) -> Self {
        Self { params }
    }
}

impl OptimizationProblem<1> for LifetimeValue {
    type Input = Plan;
    type Output = Valuation;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Plan, Self::Error> {
        Ok(self.params.plan(x[0]))
    }

    fn objective(&self, _plan: &Plan, valuation: &Valuation) -> Result<f64, Self::Error> {
        Ok(valuation
            .lifetime_value(self.params.beta)
            .map_or(INFEASIBLE_PENALTY, |value| -value))
    }
}

/// Returns the consumption a plan leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Budget;

impl Model for Budget {
    type Input = Plan;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, plan: &Plan) -> Result<f64, Infallible> {
        Ok(plan.consumption())
    }
}

/// The first-order condition `x - beta * (a - x) = 0`.
#[derive(Debug, Clone, Copy)]
pub struct EulerResidual {
    params: ObjectiveParams,
}

impl EulerResidual {
    #[must_use]
    pub fn new(params: ObjectiveParams) -> Self {
        Self { params }
    }
}

impl EquationProblem<1> for EulerResidual {
    type Input = Plan;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Plan, Self::Error> {
        Ok(self.params.plan(x[0]))
    }

    fn residuals(&self, plan: &Plan, consumption: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([plan.savings - self.params.beta * consumption])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use strand_solvers::{equation, optimization};

    fn log_table() -> LinearTable {
        LinearTable::from_fn(vec![0.5, 1.0, 2.0, 4.0], f64::ln).expect("valid table")
    }

    #[test]
    fn params_are_validated() {
        assert!(ObjectiveParams::new(2.0, 0.95).is_ok());
        assert_eq!(ObjectiveParams::new(0.0, 0.95), Err(ParamsError::Assets(0.0)));
        assert_eq!(ObjectiveParams::new(2.0, 1.0), Err(ParamsError::Beta(1.0)));
        assert!(matches!(
            ObjectiveParams::new(2.0, f64::NAN),
            Err(ParamsError::Beta(_))
        ));
    }

    #[test]
    fn closed_form_matches_tutorial_values() {
        let low = ObjectiveParams::new(2.0, 0.95).expect("valid params");
        let high = ObjectiveParams::new(10.0, 0.95).expect("valid params");
        assert_relative_eq!(closed_form(&low), 0.974_358_974, epsilon = 1e-9);
        assert_relative_eq!(closed_form(&high), 4.871_794_872, epsilon = 1e-9);
    }

    #[test]
    fn feasible_plan_uses_table_at_nodes() {
        let table = log_table();
        let household = Household::new(&table);
        let params = ObjectiveParams::new(3.0, 0.9).expect("valid params");

        let eval = optimization::evaluate(&household, &LifetimeValue::new(params), [2.0])
            .expect("feasible plan");

        assert_eq!(
            eval.snapshot.output,
            Valuation::Feasible {
                consumption: 1.0,
                utility: 0.0,
                continuation: 2.0_f64.ln(),
            }
        );
        assert_relative_eq!(eval.objective, -0.9 * 2.0_f64.ln());
    }

    #[test]
    fn infeasible_plans_get_the_penalty() {
        let table = log_table();
        let household = Household::new(&table);

        for beta in [0.1, 0.5, 0.95] {
            let problem = LifetimeValue::new(ObjectiveParams::new(2.0, beta).expect("valid"));
            for x in [2.0, 3.0, 4.0] {
                let eval = optimization::evaluate(&household, &problem, [x]).expect("no lookup");
                assert_eq!(eval.objective, INFEASIBLE_PENALTY);
                assert!(matches!(
                    eval.snapshot.output,
                    Valuation::Infeasible { shortfall } if shortfall >= 0.0
                ));
            }
        }
    }

    #[test]
    fn feasible_plan_outside_table_is_a_model_error() {
        let table = log_table();
        let household = Household::new(&table);
        let plan = Plan {
            assets: 1.0,
            savings: 0.25,
        };

        assert!(matches!(
            household.call(&plan),
            Err(InterpError::OutOfRange { query, .. }) if query == 0.25
        ));
    }

    #[test]
    fn euler_residual_vanishes_at_closed_form() {
        let params = ObjectiveParams::new(4.0, 0.95).expect("valid params");
        let x = closed_form(&params);

        let eval = equation::evaluate(&Budget, &EulerResidual::new(params), [x])
            .expect("infallible");

        assert_relative_eq!(eval.residuals[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(eval.snapshot.output, 4.0 - x);
    }
}
