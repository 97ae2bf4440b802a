/// Actions an observer can take during steepest descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop after the current iteration's step is applied.
    ///
    /// The solution reports [`Status::StoppedByObserver`](super::Status) and
    /// the point the step moved to.
    StopEarly,
}
