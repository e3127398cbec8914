//! Capabilities the controllers need from the surrounding page.
//!
//! The core never touches a concrete document. Everything it does to the
//! page goes through [`VisualTree`]: looking nodes up by selector, flipping
//! presentation flags, moving the overlay in and out of the scroll-root,
//! measuring rendered heights and subscribing to activation events.

use std::fmt;

/// Presentation flag that raises a panel above the page content.
pub const FORWARD: &str = "forward";

/// Presentation flag that starts the CSS-driven reveal transition.
pub const ACTIVE: &str = "active";

/// Presentation flag that locks background scrolling on the scroll-root.
pub const SCROLL_LOCK: &str = "body-fixed";

/// An activation (click, tap) delivered by the visual tree.
pub trait Activation {
    type Node;

    /// The node the activation originated from, if it is an element.
    fn target(&self) -> Option<Self::Node>;

    /// Suppress the node's default activation behavior (link navigation, form submit).
    fn prevent_default(&self);
}

/// Handler invoked for every activation delivered to a subscribed node.
pub type ActivationHandler<E> = Box<dyn Fn(&E)>;

/// Query and mutation surface over the page's element tree.
///
/// All operations are infallible from the core's point of view. Implementations
/// backed by a real document are expected to log and swallow platform errors.
pub trait VisualTree: 'static {
    /// Cheap, clonable handle to one element.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// Activation event type delivered to handlers.
    type Event: Activation<Node = Self::Node>;

    fn query(&self, selector: &str) -> Option<Self::Node>;

    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Visual ancestor of `node`, `None` for a detached or root node.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn add_flag(&self, node: &Self::Node, flag: &str);

    fn remove_flag(&self, node: &Self::Node, flag: &str);

    fn has_flag(&self, node: &Self::Node, flag: &str) -> bool;

    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    fn remove_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Rendered vertical extent of `node` in CSS pixels.
    fn rendered_height(&self, node: &Self::Node) -> f64;

    /// Set (`Some`) or clear (`None`) an explicit height directive on `node`.
    fn set_height(&self, node: &Self::Node, height: Option<f64>);

    /// Subscribe `handler` to activations of `node`.
    fn on_activate(&self, node: &Self::Node, handler: ActivationHandler<Self::Event>);

    /// Subscribe `handler` to every activation anywhere in the tree.
    fn on_background_activate(&self, handler: ActivationHandler<Self::Event>);
}
