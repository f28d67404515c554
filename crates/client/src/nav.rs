//! Navigation behaviors run on every page.

use crate::page::{Document, NodePath};

pub const TOGGLE_SELECTOR: &str = "[data-nav-toggle]";
pub const LINKS_SELECTOR: &str = "[data-nav-links]";
pub const ACTIVE_LINKS_SELECTOR: &str = ".nav-links a";
pub const OPEN_CLASS: &str = "open";
pub const ACTIVE_CLASS: &str = "active";

/// Mobile menu button flipping the links panel open and closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuToggle {
    toggle: NodePath,
    links: NodePath,
}

impl MenuToggle {
    /// `None` unless the page has both the button and the panel.
    pub fn attach(document: &Document) -> Option<Self> {
        Some(Self {
            toggle: document.query_selector(TOGGLE_SELECTOR)?,
            links: document.query_selector(LINKS_SELECTOR)?,
        })
    }

    pub fn toggle(&self) -> &NodePath {
        &self.toggle
    }

    /// Returns whether the panel is open afterwards.
    pub fn click(&self, document: &mut Document) -> bool {
        document
            .get_mut(&self.links)
            .map(|links| links.class_list.toggle(OPEN_CLASS))
            .unwrap_or_default()
    }
}

pub struct ActiveLinkMarker;

impl ActiveLinkMarker {
    /// Last segment of the path, `index.html` when empty.
    pub fn current_page(path: &str) -> &str {
        match path.rsplit('/').next() {
            Some(page) if !page.is_empty() => page,
            _ => "index.html",
        }
    }

    /// Mark every navigation link pointing at the current page, returns how many.
    pub fn mark(document: &mut Document) -> usize {
        let page = Self::current_page(&document.path).to_owned();
        let mut marked = 0;

        for path in document.query_selector_all(ACTIVE_LINKS_SELECTOR) {
            let Some(anchor) = document.get_mut(&path) else {
                continue;
            };

            if anchor.get_attribute("href") == Some(page.as_str()) {
                anchor.class_list.add(ACTIVE_CLASS);
                marked += 1;
            }
        }

        marked
    }
}

/// Page load: mark the active link once, then wire the menu toggle if present.
pub fn on_load(document: &mut Document) -> Option<MenuToggle> {
    ActiveLinkMarker::mark(document);

    MenuToggle::attach(document)
}
