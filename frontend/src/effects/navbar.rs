//! Navbar reactions to the scroll position: the `scrolled` look and the
//! active section link.

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use web_sys::{Document, Window};

use crate::dom::{self, Listeners};
use crate::error::Result;
use crate::surface::Surface;

const SOLID_BACKGROUND: &str = "rgba(255, 255, 255, 0.98)";
const SOLID_BACKDROP: &str = "blur(10px)";
const CLEAR_BACKGROUND: &str = "white";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub selector: String,
    pub scrolled_class: String,
    pub scrolled_after: f64,
    /// Switch to an opaque blurred background past this offset.
    pub solid_after: Option<f64>,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: "#navbar, .navbar".to_string(),
            scrolled_class: "scrolled".to_string(),
            scrolled_after: 50.0,
            solid_after: None,
        }
    }
}

pub struct Navbar<E: Surface> {
    element: E,
    config: NavbarConfig,
    last_scroll: Cell<Option<f64>>,
}

impl<E: Surface> Navbar<E> {
    pub fn new(element: E, config: NavbarConfig) -> Self {
        Self {
            element,
            config,
            last_scroll: Cell::new(None),
        }
    }

    pub fn on_scroll(&self, scroll_y: f64) {
        if self.last_scroll.get() == Some(scroll_y) {
            return;
        }
        self.last_scroll.set(Some(scroll_y));

        self.element
            .set_class(&self.config.scrolled_class, scroll_y > self.config.scrolled_after);

        if let Some(solid_after) = self.config.solid_after {
            if scroll_y > solid_after {
                self.element.set_style("background", SOLID_BACKGROUND);
                self.element.set_style("backdrop-filter", SOLID_BACKDROP);
            } else {
                self.element.set_style("background", CLEAR_BACKGROUND);
            }
        }
    }

    pub fn last_scroll(&self) -> Option<f64> {
        self.last_scroll.get()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActiveLinkConfig {
    pub enabled: bool,
    pub sections: String,
    pub links: String,
    pub class: String,
    /// Fixed header height the scan compensates for.
    pub margin: f64,
    /// Link that is active at the very top of the page.
    pub home_href: String,
}

impl Default for ActiveLinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sections: "section[id]".to_string(),
            links: ".nav-link".to_string(),
            class: "active".to_string(),
            margin: 100.0,
            home_href: "#".to_string(),
        }
    }
}

/// Id of the section the reader is in: the last one, top to bottom, whose
/// top (less `margin`) is at or above `scroll_y`. Later sections win ties.
pub fn active_section<S: AsRef<str>>(sections: &[(S, f64)], scroll_y: f64, margin: f64) -> Option<&str> {
    let mut current = None;
    for (id, top) in sections {
        if scroll_y >= top - margin {
            current = Some(id.as_ref());
        }
    }
    current
}

/// Clear `class` from every link, then set it on the link pointing at
/// `current`. The home link stands in for `current` until the first section
/// is reached, and stays marked while the page is near the top.
pub fn highlight<E: Surface>(links: &[E], current: Option<&str>, scroll_y: f64, config: &ActiveLinkConfig) {
    let wanted = match current {
        Some(id) => format!("#{}", id),
        None => config.home_href.clone(),
    };
    let at_top = scroll_y < config.margin;

    for link in links {
        link.remove_class(&config.class);
        let href = link.attr("href");
        let matches_section = href.as_deref() == Some(wanted.as_str());
        let is_home = at_top && href.as_deref() == Some(config.home_href.as_str());
        if matches_section || is_home {
            link.add_class(&config.class);
        }
    }
}

pub fn install(document: &Document, window: &Window, config: &NavbarConfig) -> Result<Listeners> {
    let mut listeners = Listeners::new();
    let Some(element) = dom::query_one(document, &config.selector) else {
        // already reported by `EffectsConfig::validate`
        log::debug!("no navbar `{}` on this page", config.selector);
        return Ok(listeners);
    };

    let navbar = Navbar::new(element, config.clone());
    navbar.on_scroll(dom::scroll_y(window));

    let win = window.clone();
    listeners.on(window, "scroll", move |_| navbar.on_scroll(dom::scroll_y(&win)))?;
    Ok(listeners)
}

pub fn install_active_links(document: &Document, window: &Window, config: &ActiveLinkConfig) -> Result<Listeners> {
    let mut listeners = Listeners::new();
    if !config.enabled {
        return Ok(listeners);
    }

    let sections = dom::query_all(document, &config.sections);
    let links = dom::query_all(document, &config.links);
    if sections.is_empty() || links.is_empty() {
        log::debug!("no sections or nav links, active link tracking skipped");
        return Ok(listeners);
    }

    let win = window.clone();
    let config = config.clone();
    listeners.on(window, "scroll", move |_| {
        let scroll_y = dom::scroll_y(&win);
        // offsets move with layout, so they are read on every pass
        let offsets: Vec<(String, f64)> = sections
            .iter()
            .map(|s| (s.id(), dom::offset_top(s)))
            .collect();
        let current = active_section(&offsets, scroll_y, config.margin);
        highlight(&links, current, scroll_y, &config);
    })?;
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn link(href: &str) -> Rc<FakeSurface> {
        let l = FakeSurface::new();
        l.set_attr("href", href);
        l
    }

    #[test]
    fn picks_last_section_at_or_above_the_fold() {
        let sections = [("home", 0.0), ("services", 500.0), ("contact", 1200.0)];
        assert_eq!(active_section(&sections, 600.0, 100.0), Some("services"));
        assert_eq!(active_section(&sections, 1100.0, 100.0), Some("contact"));
        assert_eq!(active_section(&sections, 0.0, 100.0), Some("home"));
    }

    #[test]
    fn nothing_active_above_first_section() {
        let sections = [("about", 400.0)];
        assert_eq!(active_section(&sections, 100.0, 100.0), None);
    }

    #[test]
    fn later_section_wins_a_tie() {
        let sections = [("a", 300.0), ("b", 300.0)];
        assert_eq!(active_section(&sections, 300.0, 100.0), Some("b"));
    }

    #[test]
    fn exactly_one_section_link_is_marked() {
        let config = ActiveLinkConfig::default();
        let links = vec![link("#"), link("#services"), link("#doctors")];
        links[2].add_class("active");

        highlight(&links, Some("services"), 600.0, &config);

        let active: Vec<bool> = links.iter().map(|l| l.has_class("active")).collect();
        assert_eq!(active, vec![false, true, false]);
    }

    #[test]
    fn home_link_is_active_near_the_top() {
        let config = ActiveLinkConfig::default();
        let links = vec![link("#"), link("#hero"), link("#doctors")];

        highlight(&links, Some("hero"), 40.0, &config);

        assert!(links[0].has_class("active"));
        assert!(links[1].has_class("active"));
        assert!(!links[2].has_class("active"));
    }

    #[test]
    fn home_link_stays_active_before_the_first_section() {
        let config = ActiveLinkConfig::default();
        let sections = [("services", 800.0), ("doctors", 1600.0)];
        let links = vec![link("#"), link("#services"), link("#doctors")];

        let current = active_section(&sections, 300.0, config.margin);
        assert_eq!(current, None);
        highlight(&links, current, 300.0, &config);

        let active: Vec<bool> = links.iter().map(|l| l.has_class("active")).collect();
        assert_eq!(active, vec![true, false, false]);
    }

    #[test]
    fn navbar_toggles_scrolled_class_past_threshold() {
        let el = FakeSurface::new();
        let navbar = Navbar::new(el.clone(), NavbarConfig::default());

        navbar.on_scroll(50.0);
        assert!(!el.has_class("scrolled"));
        navbar.on_scroll(51.0);
        assert!(el.has_class("scrolled"));
        navbar.on_scroll(10.0);
        assert!(!el.has_class("scrolled"));
        assert_eq!(navbar.last_scroll(), Some(10.0));
    }

    #[test]
    fn navbar_skips_unchanged_position() {
        let el = FakeSurface::new();
        let navbar = Navbar::new(el.clone(), NavbarConfig::default());

        navbar.on_scroll(200.0);
        let writes = el.writes.get();
        navbar.on_scroll(200.0);
        assert_eq!(el.writes.get(), writes);
    }

    #[test]
    fn solid_background_step() {
        let el = FakeSurface::new();
        let config = NavbarConfig {
            scrolled_class: "shadow".to_string(),
            solid_after: Some(100.0),
            ..NavbarConfig::default()
        };
        let navbar = Navbar::new(el.clone(), config);

        navbar.on_scroll(80.0);
        assert!(el.has_class("shadow"));
        assert_eq!(el.style("background").as_deref(), Some("white"));

        navbar.on_scroll(150.0);
        assert_eq!(el.style("background").as_deref(), Some(SOLID_BACKGROUND));
        assert_eq!(el.style("backdrop-filter").as_deref(), Some("blur(10px)"));
    }
}
