//! `VisualTree` over the live browser document.

use gloo::events::EventListener;
use modal_shared::{Activation, ActivationHandler, VisualTree};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::error::DomError;
use crate::services::logging::Logger;

/// Activation event from the browser.
pub struct DomActivation(Event);

impl Activation for DomActivation {
    type Node = Element;

    fn target(&self) -> Option<Element> {
        self.0.target().and_then(|target| target.dyn_into::<Element>().ok())
    }

    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

pub struct DomTree {
    window: Window,
    document: Document,
}

impl DomTree {
    pub fn new() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let document = window.document().ok_or(DomError::NoDocument)?;
        Ok(Self { window, document })
    }

    /// Like `query`, but a missing element is an error.
    pub fn require(&self, selector: &str) -> Result<Element, DomError> {
        self.query(selector)
            .ok_or_else(|| DomError::MissingElement(selector.to_string()))
    }

    pub fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        Ok(self.document.create_element(tag)?)
    }

    fn report(&self, operation: &str, result: Result<(), DomError>) {
        if let Err(err) = result {
            Logger::warn_with_component("dom", &format!("{operation} failed: {err}"));
        }
    }
}

impl VisualTree for DomTree {
    type Node = Element;
    type Event = DomActivation;

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                self.report("query", Err(err.into()));
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                self.report("query_all", Err(err.into()));
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn add_flag(&self, node: &Element, flag: &str) {
        let result = node.class_list().add_1(flag).map_err(DomError::from);
        self.report("add_flag", result);
    }

    fn remove_flag(&self, node: &Element, flag: &str) {
        let result = node.class_list().remove_1(flag).map_err(DomError::from);
        self.report("remove_flag", result);
    }

    fn has_flag(&self, node: &Element, flag: &str) -> bool {
        node.class_list().contains(flag)
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        let result = parent.append_child(child).map(|_| ()).map_err(DomError::from);
        self.report("append_child", result);
    }

    fn remove_child(&self, parent: &Element, child: &Element) {
        let result = parent.remove_child(child).map(|_| ()).map_err(DomError::from);
        self.report("remove_child", result);
    }

    fn rendered_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|element| f64::from(element.offset_height()))
            .unwrap_or(0.0)
    }

    fn set_height(&self, node: &Element, height: Option<f64>) {
        let style = match height {
            Some(height) => format!("height: {height}px;"),
            None => String::new(),
        };
        let result = node.set_attribute("style", &style).map_err(DomError::from);
        self.report("set_height", result);
    }

    fn on_activate(&self, node: &Element, handler: ActivationHandler<DomActivation>) {
        // Listeners live as long as the page.
        EventListener::new(node, "click", move |event| {
            handler(&DomActivation(event.clone()));
        })
        .forget();
    }

    fn on_background_activate(&self, handler: ActivationHandler<DomActivation>) {
        EventListener::new(&self.window, "click", move |event| {
            handler(&DomActivation(event.clone()));
        })
        .forget();
    }
}
