//! In-page anchor links scroll smoothly and stop short of the fixed header.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use web_sys::{Document, Window};

use crate::dom::{self, Listeners};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub selector: String,
    pub header_offset: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            selector: "a[href^=\"#\"]".to_string(),
            header_offset: 80.0,
        }
    }
}

/// Element id an `href` points at, or `None` for a bare `#` / non-fragment link.
pub fn fragment_target(href: &str) -> Option<Cow<'_, str>> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(urlencoding::decode(fragment).unwrap_or(Cow::Borrowed(fragment)))
}

pub fn scroll_destination(offset_top: f64, header_offset: f64) -> f64 {
    offset_top - header_offset
}

pub fn install(document: &Document, window: &Window, config: &AnchorConfig) -> Result<Listeners> {
    let mut listeners = Listeners::new();

    for anchor in dom::query_all(document, &config.selector) {
        let doc = document.clone();
        let win = window.clone();
        let header_offset = config.header_offset;
        let link = anchor.clone();
        listeners.on(&anchor, "click", move |e| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(id) = fragment_target(&href) else {
                return;
            };
            e.prevent_default();
            match doc.get_element_by_id(&id) {
                Some(target) => {
                    dom::smooth_scroll_to(&win, scroll_destination(dom::offset_top(&target), header_offset));
                }
                None => log::debug!("anchor target #{} missing", id),
            }
        })?;
    }

    Ok(listeners)
}
