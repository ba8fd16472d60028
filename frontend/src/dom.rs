use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::error::{EffectsError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(EffectsError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(EffectsError::NoDocument)
}

/// A blank selector switches the behaviour bound to it off.
pub fn is_disabled(selector: &str) -> bool {
    selector.trim().is_empty()
}

/// Every element matching `selector`, in document order. A bad or blank
/// selector matches nothing.
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    if is_disabled(selector) {
        return Vec::new();
    }
    let list = match root.query_selector_all(selector) {
        Ok(list) => list,
        Err(_) => {
            log::warn!("invalid selector `{}`", selector);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_in(root: &Element, selector: &str) -> Vec<Element> {
    if is_disabled(selector) {
        return Vec::new();
    }
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_one(root: &Document, selector: &str) -> Option<Element> {
    if is_disabled(selector) {
        return None;
    }
    root.query_selector(selector).ok().flatten()
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn offset_top(element: &Element) -> f64 {
    element
        .dyn_ref::<HtmlElement>()
        .map(|el| f64::from(el.offset_top()))
        .unwrap_or(0.0)
}

/// Event listener that unregisters itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    pub fn event(&self) -> &'static str {
        self.event
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Listeners for one behaviour, kept alive together.
#[derive(Default)]
pub struct Listeners(Vec<Listener>);

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, target: &EventTarget, event: &'static str, handler: F) -> Result<()>
    where
        F: FnMut(Event) + 'static,
    {
        self.0.push(Listener::new(target, event, handler)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, other: Listeners) {
        self.0.extend(other.0);
    }
}
