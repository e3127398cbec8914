//! Installs the panels of the boards page.
//!
//! Every panel is optional: a page that lacks a panel's container simply
//! doesn't get that controller.

use std::collections::BTreeMap;
use std::rc::Rc;

use modal_shared::{
    HeaderElements, ModalBehavior, ModalElements, ModalFactory, ModalStatus, NavigationHeader,
    SharedOverlay, StandardModal, TriggerGroups, VisualTree, ANIMATION_TIME,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::DomTree;
use crate::error::DomError;
use crate::scheduler::GlooScheduler;
use crate::services::logging::Logger;

/// Controllers installed on the current page.
#[derive(Default)]
pub struct Installed {
    pub header: Option<NavigationHeader<DomTree>>,
    pub profile: Option<StandardModal<DomTree>>,
    pub filter_board: Option<StandardModal<DomTree>>,
    pub setup_board: Option<StandardModal<DomTree>>,
    pub create_board: Option<StandardModal<DomTree>>,
}

impl Installed {
    pub fn count(&self) -> usize {
        [
            self.header.is_some(),
            self.profile.is_some(),
            self.filter_board.is_some(),
            self.setup_board.is_some(),
            self.create_board.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Status of every installed controller, keyed by panel name.
    pub fn statuses(&self) -> BTreeMap<&'static str, ModalStatus> {
        let mut statuses = BTreeMap::new();
        if let Some(header) = &self.header {
            statuses.insert("header", header.status());
        }
        let modals = [
            ("profile", &self.profile),
            ("filter_board", &self.filter_board),
            ("setup_board", &self.setup_board),
            ("create_board", &self.create_board),
        ];
        for (name, modal) in modals {
            if let Some(modal) = modal {
                statuses.insert(name, modal.status());
            }
        }
        statuses
    }
}

pub fn install() -> Result<Installed, DomError> {
    let tree = Rc::new(DomTree::new()?);
    let body = tree.require(".js-body")?;
    let shadow = tree.create_element("div")?;
    tree.add_flag(&shadow, "modal-shadow");
    let overlay = SharedOverlay::new(shadow);

    let factory = ModalFactory::new(Rc::clone(&tree), Rc::new(GlooScheduler));
    let one = |selector: &str| tree.query(selector).into_iter().collect::<Vec<_>>();
    let modal_elements = |selector: &str| ModalElements {
        container: tree.query(selector),
        body: body.clone(),
        overlay: overlay.clone(),
    };

    let header = factory.create_header(
        HeaderElements::new(
            tree.query(".js-header"),
            body.clone(),
            overlay.clone(),
            tree.query(".js-nav"),
            tree.query(".js-burger"),
        ),
        ANIMATION_TIME,
        TriggerGroups::default().toggling(one(".js-burger")),
    );

    let profile = factory.create_modal(
        modal_elements(".js-profile-setup"),
        ANIMATION_TIME,
        TriggerGroups::default()
            .opening(one(".js-customize"))
            .closing(one(".js-profile-setup-close")),
    );
    if profile.is_some() {
        prefill_profile(factory.tree());
    }

    let filter_board = factory.create_modal(
        modal_elements(".js-filter-boards"),
        ANIMATION_TIME,
        TriggerGroups::default()
            .opening(one(".js-filter-boards-btn"))
            .closing(one(".js-filter-boards-close")),
    );

    let setup_board = factory.create_modal(
        modal_elements(".js-setup-boards"),
        ANIMATION_TIME,
        TriggerGroups::default()
            .opening(tree.query_all(".js-setup-boards-btn"))
            .closing(one(".js-setup-boards-close")),
    );
    if let Some(setup_board) = &setup_board {
        let tree = Rc::clone(&tree);
        setup_board.register_listener(move |change| {
            if !change.is_open {
                return;
            }
            if let Some(trigger) = change.trigger {
                copy_board_title(&tree, &trigger);
            }
        });
    }

    let create_board = factory.create_modal(
        modal_elements(".js-board-create"),
        ANIMATION_TIME,
        TriggerGroups::default()
            .opening(one(".js-board-create-btn"))
            .closing(one(".js-board-create-close")),
    );

    Ok(Installed {
        header,
        profile,
        filter_board,
        setup_board,
        create_board,
    })
}

fn input(tree: &DomTree, selector: &str) -> Option<HtmlInputElement> {
    tree.query(selector)?.dyn_into::<HtmlInputElement>().ok()
}

/// Seed the profile form with the profile text shown on the page.
fn prefill_profile(tree: &DomTree) {
    let (Some(info), Some(field)) = (
        tree.query(".js-profile-info"),
        input(tree, ".js-profile-setup-info"),
    ) else {
        Logger::debug_with_component("bootstrap", "profile form incomplete, not prefilled");
        return;
    };
    field.set_value(info.inner_html().trim());
}

/// Copy the title of the board card holding `trigger` into the setup form.
fn copy_board_title(tree: &DomTree, trigger: &Element) {
    let title = trigger
        .parent_element()
        .and_then(|card| card.query_selector(".js-board-card-title").ok().flatten())
        .and_then(|title| title.text_content());
    match (title, input(tree, ".js-setup-name")) {
        (Some(title), Some(field)) => field.set_value(&title),
        _ => Logger::debug_with_component("bootstrap", "board title not copied"),
    }
}
