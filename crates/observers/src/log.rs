//! Per-iteration diagnostics through `tracing`.

use strand_core::Observer;
use tracing::debug;

use crate::traits::HasBracket;

/// An observer that logs one `debug` record per solver iteration.
///
/// Each record carries the label, the iteration number, the trial `x`, the
/// bracket it was drawn from, the bracket width and the solver value at `x`.
/// A disabled log still counts iterations but emits nothing.
///
/// The observer never returns an action. Pass `&mut IterationLog` through a
/// closure to keep access to [`IterationLog::iters`] after the solve:
///
/// ```ignore
/// let mut log = IterationLog::new("a = 2").enabled(verbose);
/// brent::minimize(&model, &problem, bracket, &config, |event: &brent::Event<'_, _, _>| {
///     log.observe(event)
/// })?;
/// ```
#[derive(Debug, Clone)]
pub struct IterationLog {
    label: String,
    enabled: bool,
    iters: usize,
}

impl IterationLog {
    /// Creates an enabled log with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            iters: 0,
        }
    }

    /// Turns logging on or off.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns the number of iterations observed so far.
    #[must_use]
    pub fn iters(&self) -> usize {
        self.iters
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<E: HasBracket, A> Observer<E, A> for IterationLog {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.iters += 1;
        if !self.enabled {
            return None;
        }

        let [lower, upper] = event.bracket();
        match event.value() {
            Some(value) => debug!(
                label = %self.label,
                iter = self.iters,
                x = event.x(),
                lower,
                upper,
                width = upper - lower,
                value,
                "iteration"
            ),
            None => debug!(
                label = %self.label,
                iter = self.iters,
                x = event.x(),
                lower,
                upper,
                width = upper - lower,
                "evaluation failed"
            ),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Trial {
        x: f64,
        bracket: [f64; 2],
        value: Option<f64>,
    }

    impl HasBracket for Trial {
        fn x(&self) -> f64 {
            self.x
        }

        fn bracket(&self) -> [f64; 2] {
            self.bracket
        }

        fn value(&self) -> Option<f64> {
            self.value
        }
    }

    fn feed(log: &mut IterationLog, trial: &Trial) -> Option<()> {
        log.observe(trial)
    }

    #[test]
    fn counts_every_event() {
        let mut log = IterationLog::new("a = 2");
        let ok = Trial {
            x: 1.0,
            bracket: [0.0, 2.0],
            value: Some(-0.5),
        };
        let failed = Trial {
            x: 1.5,
            bracket: [1.0, 2.0],
            value: None,
        };

        assert!(feed(&mut log, &ok).is_none());
        assert!(feed(&mut log, &failed).is_none());
        assert_eq!(log.iters(), 2);
        assert_eq!(log.label(), "a = 2");
    }

    #[test]
    fn disabled_log_still_counts() {
        let mut log = IterationLog::new("quiet").enabled(false);
        let trial = Trial {
            x: 0.5,
            bracket: [0.0, 1.0],
            value: Some(0.0),
        };

        for _ in 0..3 {
            assert!(feed(&mut log, &trial).is_none());
        }
        assert_eq!(log.iters(), 3);
    }
}
