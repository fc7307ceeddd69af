/// Hook called by a solver after each trial evaluation.
///
/// Each solver defines its own event type `E` and action type `A`. Returning
/// `None` lets the iteration continue as it would unobserved; returning an
/// action asks the solver to intervene.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer. `()` is the observer
/// that never acts.
pub trait Observer<E, A> {
    /// Inspects one event and optionally requests an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
