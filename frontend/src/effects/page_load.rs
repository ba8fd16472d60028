//! Body adjustments once everything has loaded: the fade-in and the
//! scroll lock left behind by a preloader.

use serde::{Deserialize, Serialize};
use web_sys::{Document, Window};

use crate::dom::Listeners;
use crate::error::Result;
use crate::surface::Surface;
use crate::timer::Scheduler;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageLoadConfig {
    pub fade_in: bool,
    pub delay_ms: u32,
    /// Set `overflow: visible` on the body.
    pub restore_overflow: bool,
}

impl Default for PageLoadConfig {
    fn default() -> Self {
        Self {
            fade_in: true,
            delay_ms: 100,
            restore_overflow: true,
        }
    }
}

pub fn fade_in<S, T>(scheduler: &S, body: T, delay_ms: u32)
where
    S: Scheduler,
    T: Surface + 'static,
{
    body.set_style("opacity", "0");
    body.set_style("transition", "opacity 0.3s ease");
    scheduler.spawn(delay_ms, Box::new(move || body.set_style("opacity", "1")));
}

pub fn on_load<S, T>(scheduler: &S, body: T, config: &PageLoadConfig)
where
    S: Scheduler,
    T: Surface + 'static,
{
    if config.restore_overflow {
        body.set_style("overflow", "visible");
    }
    if config.fade_in {
        fade_in(scheduler, body, config.delay_ms);
    }
}

pub fn install<S: Scheduler>(
    document: &Document,
    window: &Window,
    scheduler: &S,
    config: &PageLoadConfig,
) -> Result<Listeners> {
    let mut listeners = Listeners::new();
    if !config.fade_in && !config.restore_overflow {
        return Ok(listeners);
    }

    let doc = document.clone();
    let scheduler = scheduler.clone();
    let config = config.clone();
    listeners.on(window, "load", move |_| {
        if let Some(body) = doc.body() {
            on_load(&scheduler, web_sys::Element::from(body), &config);
        }
    })?;
    Ok(listeners)
}
