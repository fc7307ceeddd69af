use crate::optimization::evaluate::Evaluation;

/// A trial location and the objective observed there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub objective: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, objective: f64) -> Self {
        Self { x, objective }
    }
}

impl<I, O> From<&Evaluation<I, O, 1>> for Point {
    fn from(eval: &Evaluation<I, O, 1>) -> Self {
        Self {
            x: eval.x[0],
            objective: eval.objective,
        }
    }
}
