/// Something a solver can evaluate: an input goes in, an output comes out.
///
/// Models know nothing about solver variables. A problem type translates
/// `x` into [`Model::Input`] and scores the resulting [`Model::Output`].
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the model once.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the input is outside what the model can
    /// evaluate.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// The input a model was called with and the output it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Pairs an input with its output.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    struct Doubler;

    impl Model for Doubler {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &f64) -> Result<f64, Self::Error> {
            Ok(2.0 * input)
        }
    }

    #[test]
    fn model_call_and_snapshot() {
        let input = 1.5;
        let Ok(output) = Doubler.call(&input);
        let snapshot = Snapshot::new(input, output);

        assert_eq!(snapshot, Snapshot { input: 1.5, output: 3.0 });
    }
}
