//! # Lifecycle state machine
//!
//! Shared by every controller variant. Holds the current [`Phase`], the
//! single state-change listener slot and the last trigger.
//!
//! ```text
//!   Closed ──open──▶ Opening(Attaching) ──11ms──▶ Opening(Revealing) ──duration──▶ Open
//!     ▲                                                                              │
//!     └───────────────────────────── duration ◀── Closing ◀──────close──────────────┘
//! ```
//!
//! Requests that arrive outside of `Closed` (for open) or `Open` (for close)
//! are rejected. Rejection is silent: triggers are idempotent and may be fired
//! repeatedly from uncoordinated UI code.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;

/// Per-controller status record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ModalStatus {
    /// Whether the panel is logically open.
    pub is_open: bool,
    /// Whether a transition is in flight.
    pub is_animated: bool,
}

/// Step of an in-flight open transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpeningStep {
    /// Overlay attached, waiting for the attach to render.
    Attaching,
    /// Reveal flags applied, waiting for the animation to finish.
    Revealing,
}

/// Where a controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Closed,
    Opening(OpeningStep),
    Open,
    Closing,
}

impl Phase {
    pub fn status(self) -> ModalStatus {
        match self {
            Phase::Closed => ModalStatus { is_open: false, is_animated: false },
            Phase::Opening(_) => ModalStatus { is_open: true, is_animated: true },
            Phase::Open => ModalStatus { is_open: true, is_animated: false },
            Phase::Closing => ModalStatus { is_open: false, is_animated: true },
        }
    }
}

/// Notification delivered to a registered listener.
#[derive(Debug, Clone, PartialEq)]
pub struct StateChange<N> {
    /// New logical open state.
    pub is_open: bool,
    /// Element whose activation caused the change, if any.
    pub trigger: Option<N>,
}

type Listener<N> = Rc<dyn Fn(StateChange<N>)>;

/// Status record, listener slot and guard logic composed into each controller.
pub struct TransitionGuard<N> {
    phase: Cell<Phase>,
    listener: RefCell<Listener<N>>,
    last_trigger: RefCell<Option<N>>,
}

impl<N: Clone + 'static> TransitionGuard<N> {
    pub fn new() -> Self {
        Self {
            phase: Cell::new(Phase::Closed),
            listener: RefCell::new(Rc::new(|_: StateChange<N>| {})),
            last_trigger: RefCell::new(None),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn status(&self) -> ModalStatus {
        self.phase.get().status()
    }

    pub fn last_trigger(&self) -> Option<N> {
        self.last_trigger.borrow().clone()
    }

    /// Replace the listener. Last registration wins.
    pub fn register_listener(&self, listener: impl Fn(StateChange<N>) + 'static) {
        *self.listener.borrow_mut() = Rc::new(listener);
    }

    /// True when an open request would be admitted.
    pub fn can_open(&self) -> bool {
        self.phase.get() == Phase::Closed
    }

    /// Enter `Opening(Attaching)` and notify the listener.
    ///
    /// Returns `false` without side effects unless the controller is `Closed`.
    pub fn begin_open(&self, trigger: Option<N>) -> bool {
        if !self.can_open() {
            return false;
        }
        self.enter(Phase::Opening(OpeningStep::Attaching), trigger, true);
        true
    }

    /// Enter `Closing` and notify the listener.
    ///
    /// Returns `false` without side effects unless the controller is `Open`.
    pub fn begin_close(&self, trigger: Option<N>) -> bool {
        if self.phase.get() != Phase::Open {
            return false;
        }
        self.enter(Phase::Closing, trigger, false);
        true
    }

    /// Move an in-flight open to its reveal step.
    pub fn reveal(&self) {
        debug_assert!(matches!(self.phase.get(), Phase::Opening(_)));
        self.phase.set(Phase::Opening(OpeningStep::Revealing));
    }

    pub fn finish_open(&self) {
        debug_assert!(matches!(self.phase.get(), Phase::Opening(_)));
        self.phase.set(Phase::Open);
    }

    pub fn finish_close(&self) {
        debug_assert_eq!(self.phase.get(), Phase::Closing);
        self.phase.set(Phase::Closed);
    }

    fn enter(&self, phase: Phase, trigger: Option<N>, is_open: bool) {
        *self.last_trigger.borrow_mut() = trigger.clone();
        self.phase.set(phase);

        // Cloned out so the listener may re-register or query the guard.
        let listener = self.listener.borrow().clone();
        listener(StateChange { is_open, trigger });
    }
}

impl<N: Clone + 'static> Default for TransitionGuard<N> {
    fn default() -> Self {
        Self::new()
    }
}
