use thiserror::Error;

/// Errors that can occur when validating a minimization bracket.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    /// One or more points are non-finite.
    #[error("non-finite bracket point(s)")]
    NonFinite,

    /// The points are not strictly ordered.
    #[error("expected lower < guess < upper, got {lower}, {guess}, {upper}")]
    NotOrdered { lower: f64, guess: f64, upper: f64 },

    /// The guess is not strictly better than both ends.
    #[error(
        "guess does not bracket a minimum: f({guess}) = {f_guess}, \
         f({lower}) = {f_lower}, f({upper}) = {f_upper}"
    )]
    NoMinimum {
        lower: f64,
        guess: f64,
        upper: f64,
        f_lower: f64,
        f_guess: f64,
        f_upper: f64,
    },
}

/// Three points that bracket a minimum.
///
/// A valid bracket has `lower < guess < upper`, and the objective at `guess`
/// is strictly better than at either end. Ordering is checked by
/// [`Bracket::validate`]; the objective condition is checked by the solver
/// once the three points are evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    pub guess: f64,
    pub upper: f64,
}

impl Bracket {
    /// Creates a bracket from its three points.
    #[must_use]
    pub fn new(lower: f64, guess: f64, upper: f64) -> Self {
        Self {
            lower,
            guess,
            upper,
        }
    }

    /// Creates a bracket with the guess at the midpoint of `[lower, upper]`.
    #[must_use]
    pub fn centered(lower: f64, upper: f64) -> Self {
        Self::new(lower, 0.5 * (lower + upper), upper)
    }

    /// Checks that the points are finite and strictly ordered.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NonFinite`] or [`BracketError::NotOrdered`].
    pub fn validate(&self) -> Result<(), BracketError> {
        let Self {
            lower,
            guess,
            upper,
        } = *self;

        if !lower.is_finite() || !guess.is_finite() || !upper.is_finite() {
            return Err(BracketError::NonFinite);
        }

        if !(lower < guess && guess < upper) {
            return Err(BracketError::NotOrdered {
                lower,
                guess,
                upper,
            });
        }

        Ok(())
    }

    /// Returns the width of the bracket.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
