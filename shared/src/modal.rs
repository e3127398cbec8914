//! # Standard modal controller
//!
//! Drives one panel through its open and close animations:
//!
//! - **open**: raise the panel (`forward`), lock page scrolling, attach the
//!   overlay, wait [`MIN_DELAY`], flip `active` on panel and overlay, wait the
//!   configured duration.
//! - **close**: drop `active` from overlay and panel, wait the configured
//!   duration, lower the panel, detach the overlay, unlock scrolling.
//!
//! The flags are applied to the container's visual ancestor, which is the
//! element the page styles as the modal wrapper.

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use crate::lifecycle::{ModalStatus, Phase, StateChange, TransitionGuard};
use crate::overlay::{ModalId, SharedOverlay};
use crate::timer::{Scheduler, MIN_DELAY};
use crate::tree::{VisualTree, ACTIVE, FORWARD, SCROLL_LOCK};

/// Operations shared by every controller variant.
///
/// Every transition method returns the controller, whether or not the request
/// was admitted.
pub trait ModalBehavior: Clone + 'static {
    type Node: Clone + PartialEq + 'static;

    fn open(&self, trigger: Option<Self::Node>) -> &Self;

    fn close(&self, trigger: Option<Self::Node>) -> &Self;

    /// Close if open, open otherwise. Does not wait for the transition.
    fn toggle(&self, trigger: Option<Self::Node>) -> &Self {
        if self.status().is_open {
            self.close(trigger)
        } else {
            self.open(trigger)
        }
    }

    fn phase(&self) -> Phase;

    fn status(&self) -> ModalStatus {
        self.phase().status()
    }

    /// Replace the state-change listener. Called synchronously on every
    /// admitted open or close, before any presentation flag changes.
    fn register_listener(&self, listener: impl Fn(StateChange<Self::Node>) + 'static);

    /// Trigger of the most recent admitted transition.
    fn last_trigger(&self) -> Option<Self::Node>;

    /// Element whose activation counts as a click on the dimmed backdrop.
    fn backdrop_anchor(&self) -> Self::Node;
}

struct ModalInner<T: VisualTree> {
    id: ModalId,
    tree: Rc<T>,
    scheduler: Rc<dyn Scheduler>,
    anchor: T::Node,
    body: T::Node,
    overlay: SharedOverlay<T::Node>,
    duration: Duration,
    guard: TransitionGuard<T::Node>,
}

/// Controller for a regular overlay panel.
pub struct StandardModal<T: VisualTree> {
    inner: Rc<ModalInner<T>>,
}

impl<T: VisualTree> Clone for StandardModal<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: VisualTree> StandardModal<T> {
    pub fn new(
        tree: Rc<T>,
        scheduler: Rc<dyn Scheduler>,
        container: T::Node,
        body: T::Node,
        overlay: SharedOverlay<T::Node>,
        duration: Duration,
    ) -> Self {
        let anchor = tree.parent(&container).unwrap_or(container);
        let id = overlay.register();
        Self {
            inner: Rc::new(ModalInner {
                id,
                tree,
                scheduler,
                anchor,
                body,
                overlay,
                duration,
                guard: TransitionGuard::new(),
            }),
        }
    }

    pub fn id(&self) -> ModalId {
        self.inner.id
    }

    pub fn duration(&self) -> Duration {
        self.inner.duration
    }

    fn reveal(&self) {
        let inner = &self.inner;
        inner.guard.reveal();
        inner.tree.add_flag(&inner.anchor, ACTIVE);
        inner.tree.add_flag(inner.overlay.node(), ACTIVE);

        let this = self.clone();
        inner
            .scheduler
            .delay(inner.duration, Box::new(move || this.settle_open()));
    }

    fn settle_open(&self) {
        self.inner.guard.finish_open();
        info!(modal = %self.inner.id, "modal opened");
    }

    fn settle_closed(&self) {
        let inner = &self.inner;
        inner.tree.remove_flag(&inner.anchor, FORWARD);
        inner.tree.remove_child(&inner.body, inner.overlay.node());
        inner.tree.remove_flag(&inner.body, SCROLL_LOCK);
        inner.overlay.release(inner.id);
        inner.guard.finish_close();
        info!(modal = %inner.id, "modal closed");
    }
}

impl<T: VisualTree> ModalBehavior for StandardModal<T> {
    type Node = T::Node;

    fn open(&self, trigger: Option<T::Node>) -> &Self {
        let inner = &self.inner;
        if !inner.guard.can_open() {
            debug!(modal = %inner.id, phase = ?inner.guard.phase(), "open ignored");
            return self;
        }
        if !inner.overlay.acquire(inner.id) {
            debug!(
                modal = %inner.id,
                holder = ?inner.overlay.holder(),
                "open ignored, overlay in use"
            );
            return self;
        }
        inner.guard.begin_open(trigger);

        inner.tree.add_flag(&inner.anchor, FORWARD);
        inner.tree.add_flag(&inner.body, SCROLL_LOCK);
        inner.tree.append_child(&inner.body, inner.overlay.node());

        let this = self.clone();
        inner
            .scheduler
            .delay(MIN_DELAY, Box::new(move || this.reveal()));
        self
    }

    fn close(&self, trigger: Option<T::Node>) -> &Self {
        let inner = &self.inner;
        if !inner.guard.begin_close(trigger) {
            debug!(modal = %inner.id, phase = ?inner.guard.phase(), "close ignored");
            return self;
        }

        inner.tree.remove_flag(inner.overlay.node(), ACTIVE);
        inner.tree.remove_flag(&inner.anchor, ACTIVE);

        let this = self.clone();
        inner
            .scheduler
            .delay(inner.duration, Box::new(move || this.settle_closed()));
        self
    }

    fn phase(&self) -> Phase {
        self.inner.guard.phase()
    }

    fn register_listener(&self, listener: impl Fn(StateChange<T::Node>) + 'static) {
        self.inner.guard.register_listener(listener);
    }

    fn last_trigger(&self) -> Option<T::Node> {
        self.inner.guard.last_trigger()
    }

    fn backdrop_anchor(&self) -> T::Node {
        self.inner.anchor.clone()
    }
}
