//! Timer capability used to sequence animation phases.

use std::time::Duration;

/// Pause between attaching the overlay and flipping the reveal flags.
///
/// Long enough for the attach to be rendered before the transition starts,
/// short enough to go unnoticed.
pub const MIN_DELAY: Duration = Duration::from_millis(11);

/// Default length of a full open or close animation.
pub const ANIMATION_TIME: Duration = Duration::from_millis(500);

/// Continuation resumed once a delay has elapsed.
pub type Continuation = Box<dyn FnOnce()>;

/// Suspends a transition flow for a fixed duration.
///
/// A flow "suspends" by handing its remaining steps to [`Scheduler::delay`];
/// the scheduler resumes it by calling the continuation once `duration` has
/// elapsed. Continuations run on the same thread as the caller, never inline.
pub trait Scheduler {
    fn delay(&self, duration: Duration, continuation: Continuation);
}
