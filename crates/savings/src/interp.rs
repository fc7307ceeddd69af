//! Piecewise linear interpolation with a lookup accelerator.
//!
//! A [`LinearTable`] is immutable and can be shared across threads. The
//! [`Accel`] that speeds up sequential lookups holds mutable state, so every
//! concurrent solve owns its own.

use std::cell::Cell;

use thiserror::Error;

/// Errors from building or evaluating a [`LinearTable`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InterpError {
    #[error("xs has {xs} points but ys has {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("need at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("non-finite sample at index {0}")]
    NonFinite(usize),

    #[error("xs must be strictly increasing (index {0})")]
    NotIncreasing(usize),

    #[error("query {query} is outside [{lower}, {upper}]")]
    OutOfRange { query: f64, lower: f64, upper: f64 },
}

/// Ordered samples `(xs[k], ys[k])` joined by straight segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTable {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearTable {
    /// Builds a table from strictly increasing `xs` and matching `ys`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ, there are fewer than two
    /// points, any sample is non-finite, or `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, InterpError> {
        if xs.len() != ys.len() {
            return Err(InterpError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(InterpError::TooFewPoints(xs.len()));
        }
        if let Some(k) = (0..xs.len()).find(|&k| !xs[k].is_finite() || !ys[k].is_finite()) {
            return Err(InterpError::NonFinite(k));
        }
        if let Some(k) = (1..xs.len()).find(|&k| xs[k] <= xs[k - 1]) {
            return Err(InterpError::NotIncreasing(k));
        }

        Ok(Self { xs, ys })
    }

    /// Builds a table by sampling `f` at each of `xs`.
    ///
    /// # Errors
    ///
    /// Same as [`LinearTable::new`].
    pub fn from_fn(xs: Vec<f64>, f: impl Fn(f64) -> f64) -> Result<Self, InterpError> {
        let ys = xs.iter().map(|&x| f(x)).collect();
        Self::new(xs, ys)
    }

    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Returns the table's domain `[xs[0], xs[n - 1]]`.
    #[must_use]
    pub fn domain(&self) -> [f64; 2] {
        [self.xs[0], self.xs[self.xs.len() - 1]]
    }

    /// Interpolates the table at `query`.
    ///
    /// Node queries return the stored `ys[k]` exactly. The accelerator is
    /// consulted first and updated to the located interval; it never changes
    /// the returned value.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::OutOfRange`] if `query` is outside the domain or
    /// not finite.
    pub fn eval(&self, accel: &Accel, query: f64) -> Result<f64, InterpError> {
        let [lower, upper] = self.domain();
        if !(lower..=upper).contains(&query) {
            return Err(InterpError::OutOfRange {
                query,
                lower,
                upper,
            });
        }

        let k = self.locate(accel, query);
        accel.interval.set(k);

        let (x0, x1) = (self.xs[k], self.xs[k + 1]);
        let (y0, y1) = (self.ys[k], self.ys[k + 1]);

        #[allow(clippy::float_cmp)]
        if query == x0 {
            return Ok(y0);
        }
        #[allow(clippy::float_cmp)]
        if query == x1 {
            return Ok(y1);
        }

        // Rounding can push the result past a node value, so keep it between
        // the segment's endpoints.
        let y = y0 + (y1 - y0) * (query - x0) / (x1 - x0);
        Ok(y.clamp(y0.min(y1), y0.max(y1)))
    }

    /// Finds `k` with `xs[k] <= query <= xs[k + 1]`.
    fn locate(&self, accel: &Accel, query: f64) -> usize {
        let last = self.xs.len() - 2;
        let hint = accel.hint().min(last);

        if self.xs[hint] <= query && query <= self.xs[hint + 1] {
            return hint;
        }
        if hint < last && self.xs[hint + 1] <= query && query <= self.xs[hint + 2] {
            return hint + 1;
        }

        self.xs
            .partition_point(|&x| x <= query)
            .saturating_sub(1)
            .min(last)
    }
}

/// Cache of the last interval located by [`LinearTable::eval`].
#[derive(Debug, Default)]
pub struct Accel {
    interval: Cell<usize>,
}

impl Accel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the cached interval.
    pub fn reset(&self) {
        self.interval.set(0);
    }

    /// Returns the index of the last located interval.
    #[must_use]
    pub fn hint(&self) -> usize {
        self.interval.get()
    }
}
