use std::time::Duration;

use gloo::timers::callback::Timeout;
use modal_shared::{Continuation, Scheduler};

/// Scheduler backed by browser timeouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn delay(&self, duration: Duration, continuation: Continuation) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, continuation).forget();
    }
}
