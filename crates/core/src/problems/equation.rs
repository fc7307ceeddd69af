/// Measures how far a model evaluation is from satisfying `N` equations.
///
/// The problem turns `N` solver variables into a model input, then reports
/// one residual per equation. A root finder drives every residual to zero.
pub trait EquationProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the model input for the trial point `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from `x`.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Computes the residuals of one evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residuals cannot be computed.
    fn residuals(&self, input: &Self::Input, output: &Self::Output)
    -> Result<[f64; N], Self::Error>;
}
