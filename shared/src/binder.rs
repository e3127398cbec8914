//! Wires trigger elements and backdrop clicks to a controller.

use tracing::debug;

use crate::modal::ModalBehavior;
use crate::tree::{Activation, VisualTree};

/// Which controller method a trigger group invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Open,
    Close,
    Toggle,
}

/// Elements that open, close or toggle one controller. Each group is optional.
#[derive(Debug, Clone)]
pub struct TriggerGroups<N> {
    pub to_open: Option<Vec<N>>,
    pub to_close: Option<Vec<N>>,
    pub to_toggle: Option<Vec<N>>,
}

impl<N> Default for TriggerGroups<N> {
    fn default() -> Self {
        Self {
            to_open: None,
            to_close: None,
            to_toggle: None,
        }
    }
}

impl<N> TriggerGroups<N> {
    pub fn opening(mut self, elements: Vec<N>) -> Self {
        self.to_open = Some(elements);
        self
    }

    pub fn closing(mut self, elements: Vec<N>) -> Self {
        self.to_close = Some(elements);
        self
    }

    pub fn toggling(mut self, elements: Vec<N>) -> Self {
        self.to_toggle = Some(elements);
        self
    }
}

fn dispatch<M: ModalBehavior>(modal: &M, kind: TriggerKind, trigger: M::Node) {
    match kind {
        TriggerKind::Open => modal.open(Some(trigger)),
        TriggerKind::Close => modal.close(Some(trigger)),
        TriggerKind::Toggle => modal.toggle(Some(trigger)),
    };
}

/// Attach every trigger handler and the backdrop listener for `modal`.
///
/// Trigger activations have their default behavior suppressed. An activation
/// anywhere in the tree whose target is exactly the modal's backdrop anchor or
/// the overlay closes the modal.
pub fn bind<T, M>(tree: &T, groups: TriggerGroups<T::Node>, modal: M, overlay: &T::Node) -> M
where
    T: VisualTree,
    M: ModalBehavior<Node = T::Node>,
{
    let TriggerGroups { to_open, to_close, to_toggle } = groups;
    let grouped = [
        (TriggerKind::Open, to_open),
        (TriggerKind::Close, to_close),
        (TriggerKind::Toggle, to_toggle),
    ];

    for (kind, group) in grouped {
        let Some(elements) = group else { continue };
        for element in elements {
            let target = modal.clone();
            let trigger = element.clone();
            tree.on_activate(
                &element,
                Box::new(move |event: &T::Event| {
                    event.prevent_default();
                    dispatch(&target, kind, trigger.clone());
                }),
            );
            debug!(?kind, ?element, "trigger bound");
        }
    }

    let target = modal.clone();
    let anchor = modal.backdrop_anchor();
    let overlay = overlay.clone();
    tree.on_background_activate(Box::new(move |event: &T::Event| {
        let Some(clicked) = event.target() else { return };
        if clicked == anchor || clicked == overlay {
            target.close(None);
        }
    }));

    modal
}
