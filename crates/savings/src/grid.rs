//! Asset and savings grids.

use serde::Deserialize;
use thiserror::Error;

/// Errors from building a [`GridSpec`] or [`Grid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("grid bounds must be finite, got [{lower}, {upper}]")]
    NonFinite { lower: f64, upper: f64 },

    #[error("grid lower bound {lower} must be below upper bound {upper}")]
    NotOrdered { lower: f64, upper: f64 },

    #[error("grid needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("savings grid must start above zero, got {0}")]
    NonPositiveSavings(f64),
}

/// `points` evenly spaced values from `lower` to `upper` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSpec {
    pub lower: f64,
    pub upper: f64,
    pub points: usize,
}

impl GridSpec {
    /// Creates a validated spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are non-finite or unordered, or if
    /// `points < 2`.
    pub fn new(lower: f64, upper: f64, points: usize) -> Result<Self, GridError> {
        let spec = Self {
            lower,
            upper,
            points,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Checks the spec, which may have been deserialized without validation.
    ///
    /// # Errors
    ///
    /// Same as [`GridSpec::new`].
    pub fn validate(&self) -> Result<(), GridError> {
        let Self {
            lower,
            upper,
            points,
        } = *self;

        if !lower.is_finite() || !upper.is_finite() {
            return Err(GridError::NonFinite { lower, upper });
        }
        if lower >= upper {
            return Err(GridError::NotOrdered { lower, upper });
        }
        if points < 2 {
            return Err(GridError::TooFewPoints(points));
        }
        Ok(())
    }

    /// Expands the spec into its values.
    ///
    /// # Errors
    ///
    /// Same as [`GridSpec::new`].
    pub fn values(&self) -> Result<Vec<f64>, GridError> {
        self.validate()?;
        Ok(linspace(self.lower, self.upper, self.points))
    }
}

/// Returns `n` evenly spaced values from `lower` to `upper` inclusive.
///
/// The last value is exactly `upper`. Returns `[lower]` when `n == 1` and an
/// empty vector when `n == 0`.
#[must_use]
pub fn linspace(lower: f64, upper: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lower],
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let steps = (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        upper
                    } else {
                        #[allow(clippy::cast_precision_loss)]
                        let i = i as f64;
                        lower + (upper - lower) * i / steps
                    }
                })
                .collect()
        }
    }
}

/// The asset states and the savings choices available in each.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    assets: Vec<f64>,
    savings: Vec<f64>,
}

impl Grid {
    /// Builds both grids from their specs.
    ///
    /// # Errors
    ///
    /// Returns an error if either spec is invalid or the savings grid does
    /// not start above zero.
    pub fn from_specs(assets: &GridSpec, savings: &GridSpec) -> Result<Self, GridError> {
        let assets = assets.values()?;
        if savings.lower <= 0.0 {
            return Err(GridError::NonPositiveSavings(savings.lower));
        }
        let savings = savings.values()?;
        Ok(Self { assets, savings })
    }

    /// Ascending asset levels, one per state.
    #[must_use]
    pub fn assets(&self) -> &[f64] {
        &self.assets
    }

    /// Ascending savings nodes; their span is every solver's bracket.
    #[must_use]
    pub fn savings(&self) -> &[f64] {
        &self.savings
    }

    /// Returns the bracket `[X[0], X[m - 1]]` shared by every state.
    #[must_use]
    pub fn savings_bounds(&self) -> [f64; 2] {
        [self.savings[0], self.savings[self.savings.len() - 1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(0.1, 11.0, 50);
        assert_eq!(xs.len(), 50);
        assert_relative_eq!(xs[0], 0.1);
        assert_relative_eq!(xs[1] - xs[0], 10.9 / 49.0, epsilon = 1e-12);
        assert_eq!(xs[49], 11.0);
    }

    #[test]
    fn linspace_small_counts() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn tutorial_asset_grid_is_integers() {
        let assets = GridSpec::new(2.0, 10.0, 9).expect("valid spec").values();
        assert_eq!(
            assets,
            Ok(vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0])
        );
    }

    #[test]
    fn rejects_invalid_specs() {
        assert_eq!(
            GridSpec::new(1.0, 1.0, 5),
            Err(GridError::NotOrdered {
                lower: 1.0,
                upper: 1.0
            })
        );
        assert_eq!(GridSpec::new(0.0, 1.0, 1), Err(GridError::TooFewPoints(1)));
        assert!(matches!(
            GridSpec::new(f64::NEG_INFINITY, 1.0, 3),
            Err(GridError::NonFinite { .. })
        ));
    }

    #[test]
    fn savings_grid_must_be_positive() {
        let assets = GridSpec::new(2.0, 10.0, 9).expect("valid spec");
        let savings = GridSpec::new(0.0, 11.0, 50).expect("valid spec");
        assert_eq!(
            Grid::from_specs(&assets, &savings),
            Err(GridError::NonPositiveSavings(0.0))
        );
    }
}
