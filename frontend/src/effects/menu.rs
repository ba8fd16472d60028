//! Mobile navigation menu.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, Node};

use crate::dom::{self, Listeners};
use crate::error::Result;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub toggle: String,
    pub menu: String,
    pub open_class: String,
    /// Links inside the menu that close it.
    pub links: String,
    /// Whether clicking the toggle opens/closes the menu. Off when another
    /// script (Bootstrap's collapse) already owns the toggle.
    pub handle_toggle: bool,
    pub close_on_escape: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle: "#mobileToggle".to_string(),
            menu: "#navMenu".to_string(),
            open_class: "active".to_string(),
            links: ".nav-link".to_string(),
            handle_toggle: true,
            close_on_escape: true,
        }
    }
}

impl MenuConfig {
    pub fn bootstrap() -> Self {
        Self {
            toggle: ".navbar-toggler".to_string(),
            menu: ".navbar-collapse".to_string(),
            open_class: "show".to_string(),
            links: "a[href^=\"#\"]:not([href=\"#\"])".to_string(),
            handle_toggle: false,
            close_on_escape: false,
        }
    }
}

pub struct MobileMenu<E: Surface> {
    toggle: E,
    menu: E,
    open_class: String,
}

impl<E: Surface> MobileMenu<E> {
    pub fn new(toggle: E, menu: E, open_class: impl Into<String>) -> Self {
        Self {
            toggle,
            menu,
            open_class: open_class.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.menu.has_class(&self.open_class)
    }

    pub fn toggle(&self) {
        let open = !self.is_open();
        self.toggle.set_class(&self.open_class, open);
        self.menu.set_class(&self.open_class, open);
    }

    pub fn close(&self) {
        self.toggle.remove_class(&self.open_class);
        self.menu.remove_class(&self.open_class);
    }

    /// Document-level click. Clicks on the toggle or inside the menu are
    /// handled by their own listeners.
    pub fn on_document_click(&self, inside_menu: bool, inside_toggle: bool) {
        if !inside_menu && !inside_toggle {
            self.close();
        }
    }

    pub fn on_key(&self, key: &str) {
        if key == "Escape" && self.is_open() {
            self.close();
        }
    }
}

pub fn install(document: &Document, config: &MenuConfig) -> Result<Listeners> {
    let mut listeners = Listeners::new();
    let (Some(toggle), Some(menu)) = (
        dom::query_one(document, &config.toggle),
        dom::query_one(document, &config.menu),
    ) else {
        log::debug!("menu `{}` / `{}` not on this page", config.toggle, config.menu);
        return Ok(listeners);
    };

    let state = Rc::new(MobileMenu::new(toggle.clone(), menu.clone(), config.open_class.clone()));

    if config.handle_toggle {
        let state = state.clone();
        listeners.on(&toggle, "click", move |_| state.toggle())?;
    }

    for link in dom::query_in(&menu, &config.links) {
        let state = state.clone();
        listeners.on(&link, "click", move |_| state.close())?;
    }

    {
        let state = state.clone();
        let (menu, toggle) = (menu.clone(), toggle.clone());
        listeners.on(document, "click", move |e| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = |el: &Element| target.as_ref().map_or(false, |t| el.contains(Some(t)));
            state.on_document_click(inside(&menu), inside(&toggle));
        })?;
    }

    if config.close_on_escape {
        listeners.on(document, "keydown", move |e| {
            if let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
                state.on_key(&key);
            }
        })?;
    }

    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;
    use pretty_assertions::assert_eq;

    fn menu() -> (MobileMenu<Rc<FakeSurface>>, Rc<FakeSurface>, Rc<FakeSurface>) {
        let toggle = FakeSurface::new();
        let menu = FakeSurface::new();
        (MobileMenu::new(toggle.clone(), menu.clone(), "active"), toggle, menu)
    }

    fn both_active(toggle: &FakeSurface, menu: &FakeSurface) -> (bool, bool) {
        (toggle.has_class("active"), menu.has_class("active"))
    }

    #[test]
    fn toggle_opens_and_closes_both() {
        let (m, toggle, menu) = menu();
        m.toggle();
        assert_eq!(both_active(&toggle, &menu), (true, true));
        m.toggle();
        assert_eq!(both_active(&toggle, &menu), (false, false));
    }

    #[test]
    fn link_click_closes() {
        let (m, toggle, menu) = menu();
        m.toggle();
        m.close();
        assert_eq!(both_active(&toggle, &menu), (false, false));
    }

    #[test]
    fn outside_click_closes_inside_click_does_not() {
        let (m, toggle, menu) = menu();
        m.toggle();

        m.on_document_click(true, false);
        assert!(m.is_open());
        m.on_document_click(false, true);
        assert!(m.is_open());

        m.on_document_click(false, false);
        assert_eq!(both_active(&toggle, &menu), (false, false));
    }

    #[test]
    fn escape_closes_other_keys_do_not() {
        let (m, toggle, menu) = menu();
        m.toggle();

        m.on_key("Enter");
        assert!(m.is_open());
        m.on_key("Escape");
        assert_eq!(both_active(&toggle, &menu), (false, false));
    }

    #[test]
    fn escape_on_closed_menu_writes_nothing() {
        let (m, toggle, menu) = menu();
        m.on_key("Escape");
        assert_eq!(toggle.writes.get() + menu.writes.get(), 0);
    }

    #[test]
    fn bootstrap_menu_leaves_toggle_alone() {
        let cfg = MenuConfig::bootstrap();
        assert_eq!(cfg.open_class, "show");
        assert!(!cfg.handle_toggle);
        assert!(!cfg.close_on_escape);
        assert_eq!(cfg.links, "a[href^=\"#\"]:not([href=\"#\"])");
    }
}
