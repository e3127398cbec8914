//! Navigation header controller.
//!
//! Opens the slide-down navigation dropdown. The dropdown's open height
//! depends on its content, so it is measured from the rendered navigation
//! items every time the header opens and applied as an explicit height.
//! The header always operates on its own fixed set of elements: the trigger
//! is only passed through to the listener.

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use crate::lifecycle::{Phase, StateChange, TransitionGuard};
use crate::modal::ModalBehavior;
use crate::overlay::{ModalId, SharedOverlay};
use crate::timer::Scheduler;
use crate::tree::{VisualTree, ACTIVE, FORWARD, SCROLL_LOCK};

/// Default selector for the navigation items measured on open.
pub const NAV_ITEM_SELECTOR: &str = ".js-nav__item";

/// Elements a [`NavigationHeader`] drives, all resolved up front.
pub struct HeaderParts<N> {
    pub container: N,
    pub body: N,
    pub dropdown: N,
    pub burger: N,
    pub nav_item_selector: String,
}

struct HeaderInner<T: VisualTree> {
    id: ModalId,
    tree: Rc<T>,
    scheduler: Rc<dyn Scheduler>,
    parts: HeaderParts<T::Node>,
    anchor: T::Node,
    overlay: SharedOverlay<T::Node>,
    duration: Duration,
    guard: TransitionGuard<T::Node>,
}

/// Controller for the header's navigation dropdown.
pub struct NavigationHeader<T: VisualTree> {
    inner: Rc<HeaderInner<T>>,
}

impl<T: VisualTree> Clone for NavigationHeader<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: VisualTree> NavigationHeader<T> {
    /// `duration` is used for both the open and the close animation.
    pub fn new(
        tree: Rc<T>,
        scheduler: Rc<dyn Scheduler>,
        parts: HeaderParts<T::Node>,
        overlay: SharedOverlay<T::Node>,
        duration: Duration,
    ) -> Self {
        let anchor = tree
            .parent(&parts.container)
            .unwrap_or_else(|| parts.container.clone());
        let id = overlay.register();
        Self {
            inner: Rc::new(HeaderInner {
                id,
                tree,
                scheduler,
                parts,
                anchor,
                overlay,
                duration,
                guard: TransitionGuard::new(),
            }),
        }
    }

    pub fn id(&self) -> ModalId {
        self.inner.id
    }

    /// Sum of the rendered heights of every navigation item.
    pub fn measure_dropdown(&self) -> f64 {
        let inner = &self.inner;
        inner
            .tree
            .query_all(&inner.parts.nav_item_selector)
            .iter()
            .map(|item| inner.tree.rendered_height(item))
            .sum()
    }

    fn settle_closed(&self) {
        let inner = &self.inner;
        inner.tree.remove_child(&inner.parts.body, inner.overlay.node());
        inner.tree.remove_flag(&inner.parts.container, FORWARD);
        inner.tree.remove_flag(&inner.parts.body, SCROLL_LOCK);
        inner.overlay.release(inner.id);
        inner.guard.finish_close();
        info!(modal = %inner.id, "navigation closed");
    }
}

impl<T: VisualTree> ModalBehavior for NavigationHeader<T> {
    type Node = T::Node;

    fn open(&self, trigger: Option<T::Node>) -> &Self {
        let inner = &self.inner;
        if !inner.guard.can_open() {
            debug!(modal = %inner.id, phase = ?inner.guard.phase(), "navigation open ignored");
            return self;
        }
        if !inner.overlay.acquire(inner.id) {
            debug!(
                modal = %inner.id,
                holder = ?inner.overlay.holder(),
                "navigation open ignored, overlay in use"
            );
            return self;
        }
        inner.guard.begin_open(trigger);

        let tree = &inner.tree;
        let parts = &inner.parts;
        tree.add_flag(&parts.body, SCROLL_LOCK);
        tree.add_flag(&parts.burger, ACTIVE);
        tree.add_flag(&parts.dropdown, ACTIVE);
        tree.add_flag(&parts.container, FORWARD);

        let height = self.measure_dropdown();
        debug!(modal = %inner.id, height, "dropdown measured");
        tree.set_height(&parts.dropdown, Some(height));

        tree.append_child(&parts.body, inner.overlay.node());
        inner.guard.reveal();
        tree.add_flag(inner.overlay.node(), ACTIVE);

        let this = self.clone();
        inner.scheduler.delay(
            inner.duration,
            Box::new(move || {
                this.inner.guard.finish_open();
                info!(modal = %this.inner.id, "navigation opened");
            }),
        );
        self
    }

    fn close(&self, trigger: Option<T::Node>) -> &Self {
        let inner = &self.inner;
        if !inner.guard.begin_close(trigger) {
            debug!(modal = %inner.id, phase = ?inner.guard.phase(), "navigation close ignored");
            return self;
        }

        let tree = &inner.tree;
        let parts = &inner.parts;
        tree.remove_flag(&parts.burger, ACTIVE);
        tree.remove_flag(&parts.dropdown, ACTIVE);
        tree.set_height(&parts.dropdown, None);
        tree.remove_flag(inner.overlay.node(), ACTIVE);

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
