//! Presentation behaviour for the Care Point Hospital site: navbar states,
//! the mobile menu, scroll-triggered reveals and counters, card feedback and
//! the scroll progress overlay.
//!
//! The pieces that decide *what* happens ([`debounce`], [`visibility`],
//! [`counter`], [`transition`] and the pure parts of [`effects`]) work against
//! the [`timer::Scheduler`] and [`surface::Surface`] seams so they run on the
//! host in tests; the `install` functions bind them to the real DOM.

pub mod config;
pub mod counter;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod page;
pub mod surface;
pub mod timer;
pub mod transition;
pub mod visibility;

pub mod components {
    pub mod overlay;
}

pub mod effects {
    pub mod anchors;
    pub mod cards;
    pub mod footer;
    pub mod form;
    pub mod menu;
    pub mod navbar;
    pub mod page_load;
    pub mod parallax;
    pub mod reveal;
    pub mod ripple;
    pub mod stats;
}

#[cfg(test)]
mod testing;

pub use config::{Banner, EffectsConfig, Profile};
pub use error::{EffectsError, Result};
pub use page::Page;

/// Load the page's config and wire everything up.
pub fn start() -> Result<Page> {
    let document = dom::document()?;
    let config = EffectsConfig::load(&document);
    let banner = config.banner;
    let page = Page::install(config)?;
    print_banner(banner);
    Ok(page)
}

/// Run [`start`] once the DOM is parsed, right away if it already is.
pub fn start_when_ready<F>(on_ready: F) -> Result<()>
where
    F: FnOnce(Result<Page>) + 'static,
{
    let document = dom::document()?;
    if document.ready_state() != "loading" {
        on_ready(start());
        return Ok(());
    }

    let mut on_ready = Some(on_ready);
    let listener = dom::Listener::new(&document, "DOMContentLoaded", move |_| {
        if let Some(f) = on_ready.take() {
            f(start());
        }
    })?;
    std::mem::forget(listener);
    Ok(())
}

fn print_banner(banner: Banner) {
    match banner {
        Banner::Welcome => {
            gloo_console::log!(
                "%c👋 Welcome to Care Point Hospital!",
                "color: #3b82f6; font-size: 20px; font-weight: bold;"
            );
            gloo_console::log!(
                "%cBuilt with care for better healthcare",
                "color: #64748b; font-size: 14px;"
            );
        }
        Banner::Loaded => gloo_console::log!("Care Point Hospital - Website Loaded Successfully!"),
        Banner::Silent => {}
    }
}
