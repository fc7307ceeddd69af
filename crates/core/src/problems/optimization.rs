/// Scores a model evaluation for an optimizer.
///
/// The problem turns `N` solver variables into a model input, then reduces
/// the model's input and output to one objective. The direction (minimize or
/// maximize) belongs to the solver entry point, so the same problem serves
/// both.
pub trait OptimizationProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the model input for the trial point `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Reduces one evaluation to its objective value.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the evaluation cannot be scored.
    fn objective(&self, input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error>;
}
