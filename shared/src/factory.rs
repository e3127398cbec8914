//! Builds controllers for the panels present on a page.
//!
//! A missing container is not an error: it means the panel is not installed
//! on this page, and the factory returns `None` without subscribing anything.

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::binder::{bind, TriggerGroups};
use crate::header::{HeaderParts, NavigationHeader, NAV_ITEM_SELECTOR};
use crate::modal::StandardModal;
use crate::overlay::SharedOverlay;
use crate::timer::Scheduler;
use crate::tree::VisualTree;

/// Elements of a standard modal.
pub struct ModalElements<N> {
    pub container: Option<N>,
    pub body: N,
    pub overlay: SharedOverlay<N>,
}

/// Elements of the navigation header.
pub struct HeaderElements<N> {
    pub container: Option<N>,
    pub body: N,
    pub overlay: SharedOverlay<N>,
    pub dropdown: Option<N>,
    pub burger: Option<N>,
    pub nav_item_selector: String,
}

impl<N> HeaderElements<N> {
    /// Header elements measuring the default navigation item selector.
    pub fn new(
        container: Option<N>,
        body: N,
        overlay: SharedOverlay<N>,
        dropdown: Option<N>,
        burger: Option<N>,
    ) -> Self {
        Self {
            container,
            body,
            overlay,
            dropdown,
            burger,
            nav_item_selector: NAV_ITEM_SELECTOR.to_string(),
        }
    }
}

/// Constructs controllers against one visual tree and scheduler.
pub struct ModalFactory<T: VisualTree> {
    tree: Rc<T>,
    scheduler: Rc<dyn Scheduler>,
}

impl<T: VisualTree> ModalFactory<T> {
    pub fn new(tree: Rc<T>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self { tree, scheduler }
    }

    pub fn tree(&self) -> &Rc<T> {
        &self.tree
    }

    pub fn create_modal(
        &self,
        elements: ModalElements<T::Node>,
        duration: Duration,
        triggers: TriggerGroups<T::Node>,
    ) -> Option<StandardModal<T>> {
        let ModalElements { container, body, overlay } = elements;
        let Some(container) = container else {
            debug!("modal container absent, skipping");
            return None;
        };

        let shadow = overlay.node().clone();
        let modal = StandardModal::new(
            Rc::clone(&self.tree),
            Rc::clone(&self.scheduler),
            container,
            body,
            overlay,
            duration,
        );
        Some(bind(self.tree.as_ref(), triggers, modal, &shadow))
    }

    pub fn create_header(
        &self,
        elements: HeaderElements<T::Node>,
        duration: Duration,
        triggers: TriggerGroups<T::Node>,
    ) -> Option<NavigationHeader<T>> {
        let HeaderElements {
            container,
            body,
            overlay,
            dropdown,
            burger,
            nav_item_selector,
        } = elements;
        let Some(container) = container else {
            debug!("header container absent, skipping");
            return None;
        };
        let (Some(dropdown), Some(burger)) = (dropdown, burger) else {
            warn!("header present without dropdown or burger, skipping");
            return None;
        };

        let shadow = overlay.node().clone();
        let header = NavigationHeader::new(
            Rc::clone(&self.tree),
            Rc::clone(&self.scheduler),
            HeaderParts {
                container,
                body,
                dropdown,
                burger,
                nav_item_selector,
            },
            overlay,
            duration,
        );
        Some(bind(self.tree.as_ref(), triggers, header, &shadow))
    }
}
