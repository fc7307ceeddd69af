/// Actions an observer can take during a Brent minimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the best solution found so far.
    StopEarly,

    /// Treat this trial as worse than the current best point.
    ///
    /// The bracket shrinks past the trial and the evaluation (if successful)
    /// is not considered for the best solution. Use this to recover from
    /// model or problem errors, or to steer the search out of a region.
    AssumeWorse,
}
