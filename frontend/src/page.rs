//! One instance per page load that owns every wired behaviour.

use stylist::GlobalStyle;
use web_sys::{Document, Window};
use yew::AppHandle;

use crate::components::overlay::{self, Overlay};
use crate::config::EffectsConfig;
use crate::dom::{self, Listeners};
use crate::effects::{anchors, cards, footer, form, menu, navbar, page_load, parallax, reveal, ripple, stats};
use crate::error::Result;
use crate::timer::BrowserScheduler;
use crate::visibility::ViewportWatcher;

pub struct Page {
    config: EffectsConfig,
    watcher: ViewportWatcher,
    listeners: Listeners,
    overlay: Option<AppHandle<Overlay>>,
    styles: Option<GlobalStyle>,
}

/// Log and drop a failed behaviour so the rest of the page still gets wired.
fn keep<T: Default>(what: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        log::error!("{} not installed: {}", what, e);
        T::default()
    })
}

impl Page {
    pub fn install(config: EffectsConfig) -> Result<Self> {
        let window: Window = dom::window()?;
        let document: Document = dom::document()?;
        let scheduler = BrowserScheduler;

        config.validate(&document);

        let mut page = Page {
            config,
            watcher: ViewportWatcher::new(),
            listeners: Listeners::new(),
            overlay: None,
            styles: None,
        };
        let cfg = page.config.clone();

        page.add("navbar", navbar::install(&document, &window, &cfg.navbar));
        page.add(
            "active links",
            navbar::install_active_links(&document, &window, &cfg.active_links),
        );
        for menu_config in &cfg.menus {
            page.add("mobile menu", menu::install(&document, menu_config));
        }
        page.add("anchor scrolling", anchors::install(&document, &window, &cfg.anchors));

        for group in &cfg.reveals {
            let n = keep("reveal", reveal::install(&document, &page.watcher, &scheduler, group));
            log::debug!("{} element(s) waiting to reveal for `{}`", n, group.selector);
        }
        keep(
            "stat counters",
            stats::install_stats(&document, &page.watcher, &scheduler, &cfg.counters.stats),
        );
        keep(
            "section counters",
            stats::install_sections(&document, &page.watcher, &scheduler, &cfg.counters.sections),
        );
        keep(
            "lazy images",
            reveal::install_lazy_images(&document, &page.watcher, &cfg.lazy_images),
        );

        page.add("parallax", parallax::install(&document, &window, &scheduler, &cfg.parallax));
        page.add("cards", cards::install(&document, &cfg.cards));

        if !dom::is_disabled(&cfg.ripple.selector) {
            page.styles = ripple::mount_styles()
                .map_err(|e| log::error!("ripple styles not mounted: {}", e))
                .ok();
            page.add("ripple", ripple::install(&document, &scheduler, &cfg.ripple));
        }

        footer::install(&document, &cfg.footer);
        page.add("appointment form", form::install(&document, &window, &cfg.appointment_form));
        page.add("page fade", page_load::install(&document, &window, &scheduler, &cfg.page_load));

        if cfg.overlay.progress_bar || cfg.overlay.scroll_top_after.is_some() {
            page.overlay = overlay::mount(&document, cfg.overlay.clone())
                .map_err(|e| log::error!("overlay not mounted: {}", e))
                .ok();
        }

        log::info!(
            "page effects ready ({:?} profile): {} listeners, {} watched elements on {} observers",
            page.config.profile,
            page.listeners.len(),
            page.watcher.watched(),
            page.watcher.observers()
        );
        Ok(page)
    }

    fn add(&mut self, what: &str, result: Result<Listeners>) {
        self.listeners.extend(keep(what, result));
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Keep everything wired for the rest of the page's life.
    pub fn forget(self) {
        std::mem::forget(self);
    }

    /// Unhook every listener and observer and remove the overlay.
    pub fn teardown(self) {
        self.watcher.disconnect();
        if let Some(handle) = self.overlay {
            handle.destroy();
        }
        drop(self.styles);
        drop(self.listeners);
    }
}
