//! Appointment request form. There is no backend call yet: the submit is
//! swallowed, acknowledged and the form cleared.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlFormElement, Window};

use crate::dom::{self, Listeners};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormConfig {
    pub selector: String,
    pub acknowledgment: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            selector: ".appointment-form".to_string(),
            acknowledgment: "Thank you! Your appointment request has been received. \
                             We will contact you shortly to confirm your appointment."
                .to_string(),
        }
    }
}

pub fn install(document: &Document, window: &Window, config: &FormConfig) -> Result<Listeners> {
    let mut listeners = Listeners::new();
    let Some(form) = dom::query_one(document, &config.selector)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(listeners);
    };

    let win = window.clone();
    let target = form.clone();
    let message = config.acknowledgment.clone();
    listeners.on(&form, "submit", move |e| {
        e.prevent_default();
        let _ = win.alert_with_message(&message);
        target.reset();
        log::info!("appointment request acknowledged");
    })?;
    Ok(listeners)
}
