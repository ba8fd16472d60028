//! Scroll-triggered entrance animations for cards and feature rows, plus
//! lazy image loading, which rides on the same watcher.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use web_sys::{Document, Element};

use crate::dom;
use crate::error::Result;
use crate::surface::Surface;
use crate::timer::Scheduler;
use crate::transition::{stagger_delay, Entrance, Preset};
use crate::visibility::{RootMargin, ViewportWatcher, WatchOptions};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RevealConfig {
    pub selector: String,
    pub preset: Preset,
    #[serde(default)]
    pub watch: WatchOptions,
    /// Delay per position in the batch of elements that became visible together.
    #[serde(default)]
    pub stagger_ms: u32,
}

impl RevealConfig {
    pub fn new(selector: &str, preset: Preset, watch: WatchOptions) -> Self {
        Self {
            selector: selector.to_string(),
            preset,
            watch,
            stagger_ms: 0,
        }
    }

    pub fn staggered(mut self, step_ms: u32) -> Self {
        self.stagger_ms = step_ms;
        self
    }
}

/// Landing page: fading cards and the sliding feature list.
pub fn landing_reveals() -> Vec<RevealConfig> {
    vec![
        RevealConfig::new(
            ".service-card, .testimonial-card, .stat-card",
            Preset::FadeUp,
            WatchOptions::new(0.2, RootMargin::bottom(-50)),
        ),
        RevealConfig::new(
            ".feature-item-large",
            Preset::SlideIn,
            WatchOptions::new(0.2, RootMargin::default()),
        )
        .staggered(100),
    ]
}

/// Inner pages: every card rises once it is well inside the viewport.
pub fn inner_reveals() -> Vec<RevealConfig> {
    vec![RevealConfig::new(
        ".service-card, .doctor-card, .department-card, .contact-info-card",
        Preset::Rise,
        WatchOptions::new(0.1, RootMargin::bottom(-100)),
    )]
}

/// Both pages' groups; service cards keep the landing fade.
pub fn default_reveals() -> Vec<RevealConfig> {
    let mut reveals = landing_reveals();
    reveals.push(RevealConfig::new(
        ".doctor-card, .department-card, .contact-info-card",
        Preset::Rise,
        WatchOptions::new(0.1, RootMargin::bottom(-100)),
    ));
    reveals
}

pub fn install<S: Scheduler>(
    document: &Document,
    watcher: &ViewportWatcher,
    scheduler: &S,
    config: &RevealConfig,
) -> Result<usize> {
    let entrance = Rc::new(Entrance::preset(config.preset));
    let elements = dom::query_all(document, &config.selector);

    for element in &elements {
        entrance.prepare(element);

        let entrance = entrance.clone();
        let scheduler = scheduler.clone();
        let step = config.stagger_ms;
        watcher.register(element, &config.watch, move |el: &Element, index| {
            entrance.reveal(&scheduler, el.clone(), stagger_delay(index, step));
        })?;
    }
    Ok(elements.len())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LazyImageConfig {
    pub selector: String,
    pub watch: WatchOptions,
}

impl Default for LazyImageConfig {
    fn default() -> Self {
        Self {
            selector: "img[data-src]".to_string(),
            watch: WatchOptions::default(),
        }
    }
}

/// Move `data-src` into `src`. Returns false when there was nothing to load.
pub fn load_image(img: &impl Surface) -> bool {
    match img.attr("data-src") {
        Some(src) => {
            img.set_attr("src", &src);
            img.remove_attr("data-src");
            true
        }
        None => false,
    }
}

pub fn install_lazy_images(document: &Document, watcher: &ViewportWatcher, config: &LazyImageConfig) -> Result<usize> {
    let images = dom::query_all(document, &config.selector);
    for img in &images {
        watcher.register(img, &config.watch, |img: &Element, _| {
            load_image(img);
        })?;
    }
    Ok(images.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;
    use pretty_assertions::assert_eq;

    #[test]
    fn lazy_image_swaps_source_once() {
        let img = FakeSurface::new();
        img.set_attr("data-src", "/static/img/ward.jpg");

        assert!(load_image(&img));
        assert_eq!(img.attr("src").as_deref(), Some("/static/img/ward.jpg"));
        assert_eq!(img.attr("data-src"), None);
        assert!(!load_image(&img));
    }

    #[test]
    fn default_groups() {
        let reveals = default_reveals();
        assert_eq!(reveals.len(), 3);
        assert_eq!(reveals[1].stagger_ms, 100);
        assert_eq!(reveals[2].watch.root_margin, RootMargin::bottom(-100));
        // feature rows only slide in; they are not also faded up
        assert!(!reveals[0].selector.contains("feature-item-large"));
    }

    #[test]
    fn reveal_config_from_json() {
        let cfg: RevealConfig = serde_json::from_str(
            r#"{"selector": ".faq-item", "preset": "rise", "watch": {"threshold": 0.3}, "stagger_ms": 50}"#,
        )
        .unwrap();
        assert_eq!(cfg.preset, Preset::Rise);
        assert_eq!(cfg.watch.threshold, 0.3);
        assert!(cfg.watch.one_shot);
        assert_eq!(cfg.stagger_ms, 50);
    }
}
