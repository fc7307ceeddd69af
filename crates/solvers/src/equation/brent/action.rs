/// Control actions supported by the Brent root finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and report the midpoint of the current bracket.
    StopEarly,
}
