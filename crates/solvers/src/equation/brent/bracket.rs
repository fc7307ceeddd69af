use thiserror::Error;

/// Reasons a root-finding bracket is rejected before iterating.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    /// An endpoint is NaN or infinite.
    #[error("bracket endpoints must be finite")]
    NonFinite,

    /// Both endpoints are the same point.
    #[error("bracket has zero width")]
    ZeroWidth,

    /// Both endpoint residuals are nonzero and share a sign.
    #[error(
        "no sign change: residual({left}) = {left_residual}, residual({right}) = {right_residual}"
    )]
    NoSignChange {
        left: f64,
        right: f64,
        left_residual: f64,
        right_residual: f64,
    },
}

/// Which side of zero a residual falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Zero or above.
    Positive,

    /// Below zero.
    Negative,
}

impl Sign {
    /// Classifies `value`, counting zero as positive.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// A validated bracket with `left < right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Sorts the endpoints after checking they are finite and distinct.
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [left, right] = bracket;

        if !left.is_finite() || !right.is_finite() {
            return Err(BracketError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if left == right {
            return Err(BracketError::ZeroWidth);
        }

        Ok(Self {
            left: left.min(right),
            right: left.max(right),
        })
    }

    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn bounds_reorders_endpoints() {
        let [left, right] = Bounds::new([3.0, 1.0]).expect("valid bracket").as_array();
        assert_relative_eq!(left, 1.0);
        assert_relative_eq!(right, 3.0);
    }

    #[test]
    fn bounds_rejects_non_finite() {
        assert_eq!(Bounds::new([f64::NAN, 1.0]), Err(BracketError::NonFinite));
        assert_eq!(
            Bounds::new([0.0, f64::INFINITY]),
            Err(BracketError::NonFinite)
        );
    }

    #[test]
    fn bounds_rejects_zero_width() {
        assert_eq!(Bounds::new([2.0, 2.0]), Err(BracketError::ZeroWidth));
    }

    #[test]
    fn zero_counts_as_positive() {
        assert_eq!(Sign::of(0.0), Sign::Positive);
        assert_eq!(Sign::of(-1e-300), Sign::Negative);
    }
}
