//! Open/close lifecycle for overlay panels layered over a page.
//!
//! Controllers ([`StandardModal`], [`NavigationHeader`]) run a guarded,
//! timed state machine against an abstract [`VisualTree`] and [`Scheduler`].
//! [`ModalFactory`] builds them for the panels that exist on a page and
//! [`bind`] wires trigger elements and backdrop clicks to them. All panels on
//! a page share one [`SharedOverlay`], held by at most one controller at a time.

pub mod binder;
pub mod factory;
pub mod header;
pub mod lifecycle;
pub mod modal;
pub mod overlay;
pub mod timer;
pub mod tree;

#[cfg(test)]
mod testing;

pub use binder::{bind, TriggerGroups, TriggerKind};
pub use factory::{HeaderElements, ModalElements, ModalFactory};
pub use header::{HeaderParts, NavigationHeader, NAV_ITEM_SELECTOR};
pub use lifecycle::{ModalStatus, OpeningStep, Phase, StateChange, TransitionGuard};
pub use modal::{ModalBehavior, StandardModal};
pub use overlay::{ModalId, SharedOverlay};
pub use timer::{Continuation, Scheduler, ANIMATION_TIME, MIN_DELAY};
pub use tree::{Activation, ActivationHandler, VisualTree, ACTIVE, FORWARD, SCROLL_LOCK};
