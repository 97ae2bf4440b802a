/// Receives solver events and decides how the iteration should proceed.
///
/// Observers let callers watch or steer a run without changing the solver's
/// signature: tracing, building a human-readable report, or stopping early.
///
/// `observe` returns `Option<A>`, where `Some(action)` requests a
/// solver-specific action and `None` lets the solver continue unchanged.
///
/// Closures automatically implement `Observer`, and `()` is a no-op observer
/// that always returns `None`.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Stop {
        Now,
    }

    fn drive<O: Observer<usize, Stop>>(mut observer: O, events: usize) -> Option<usize> {
        (1..=events).find(|event| observer.observe(event).is_some())
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 5), None);
    }

    #[test]
    fn closure_observer_can_act() {
        let observer = |event: &usize| (*event == 3).then_some(Stop::Now);
        assert_eq!(drive(observer, 5), Some(3));
    }

    #[test]
    fn borrowed_observer_keeps_its_state() {
        let mut seen = Vec::new();
        let mut observer = |event: &usize| {
            seen.push(*event);
            None::<Stop>
        };

        drive(&mut observer, 2);
        drive(&mut observer, 1);

        assert_eq!(seen, vec![1, 2, 1]);
    }
}
