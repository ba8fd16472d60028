//! Stats counters that count up once they scroll into view.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use web_sys::{Document, Element};

use crate::counter::{self, CounterStyle};
use crate::dom;
use crate::error::Result;
use crate::surface::Surface;
use crate::timer::Scheduler;
use crate::transition::Entrance;
use crate::visibility::{RootMargin, ViewportWatcher, WatchOptions};

pub const TARGET_ATTR: &str = "data-target";
pub const ANIMATED_ATTR: &str = "data-animated";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatCounterConfig {
    pub selector: String,
    pub duration_ms: u32,
    pub watch: WatchOptions,
}

impl Default for StatCounterConfig {
    fn default() -> Self {
        Self {
            selector: ".stat-number[data-target]".to_string(),
            duration_ms: 2000,
            watch: WatchOptions::new(0.2, RootMargin::bottom(-50)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SectionCounterConfig {
    pub section: String,
    pub counters: String,
    pub duration_ms: u32,
    pub watch: WatchOptions,
}

impl Default for SectionCounterConfig {
    fn default() -> Self {
        Self {
            section: ".stats-section".to_string(),
            counters: ".counter".to_string(),
            duration_ms: 2000,
            watch: WatchOptions::new(0.5, RootMargin::default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CountersConfig {
    pub stats: StatCounterConfig,
    pub sections: SectionCounterConfig,
}

fn parse_target(raw: Option<String>) -> Option<u64> {
    raw?.trim().parse().ok()
}

/// Start the counter on `surface` unless it already ran. Returns whether it started.
pub fn start_once<S, T>(scheduler: &S, surface: T, duration_ms: u32, style: CounterStyle) -> bool
where
    S: Scheduler,
    T: Surface + 'static,
{
    if surface.attr(ANIMATED_ATTR).is_some() {
        return false;
    }
    let Some(target) = parse_target(surface.attr(TARGET_ATTR)) else {
        log::warn!("counter has no usable {}", TARGET_ATTR);
        return false;
    };
    surface.set_attr(ANIMATED_ATTR, "true");
    counter::animate(scheduler.clone(), surface, target, duration_ms, style);
    true
}

/// Landing page: every stat number is watched on its own, fades in and counts.
pub fn install_stats<S: Scheduler>(
    document: &Document,
    watcher: &ViewportWatcher,
    scheduler: &S,
    config: &StatCounterConfig,
) -> Result<usize> {
    let entrance = Rc::new(Entrance::fade_up());
    let stats = dom::query_all(document, &config.selector);

    for stat in &stats {
        let entrance = entrance.clone();
        let scheduler = scheduler.clone();
        let duration = config.duration_ms;
        watcher.register(stat, &config.watch, move |el: &Element, _| {
            entrance.to.apply(el);
            start_once(&scheduler, el.clone(), duration, CounterStyle::default());
        })?;
    }
    Ok(stats.len())
}

/// Inner pages: the whole stats section starts all of its counters at once.
pub fn install_sections<S: Scheduler>(
    document: &Document,
    watcher: &ViewportWatcher,
    scheduler: &S,
    config: &SectionCounterConfig,
) -> Result<usize> {
    let Some(section) = dom::query_one(document, &config.section) else {
        return Ok(0);
    };

    let scheduler = scheduler.clone();
    let counters_selector = config.counters.clone();
    let duration = config.duration_ms;
    watcher.register(&section, &config.watch, move |section: &Element, _| {
        for counter in dom::query_in(section, &counters_selector) {
            start_once(&scheduler, counter, duration, CounterStyle::with_partial_suffix());
        }
    })?;
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeSurface, ManualScheduler};
    use pretty_assertions::assert_eq;

    #[test]
    fn counter_runs_once_per_element() {
        let sched = ManualScheduler::new();
        let el = FakeSurface::new();
        el.set_attr(TARGET_ATTR, "1500");

        assert!(start_once(&sched, el.clone(), 2000, CounterStyle::default()));
        assert!(!start_once(&sched, el.clone(), 2000, CounterStyle::default()));
        sched.advance(3000);

        assert_eq!(el.text().as_deref(), Some("1,500+"));
        assert_eq!(el.attr(ANIMATED_ATTR).as_deref(), Some("true"));
    }

    #[test]
    fn zero_target_still_renders() {
        let sched = ManualScheduler::new();
        let el = FakeSurface::new();
        el.set_attr(TARGET_ATTR, "0");

        assert!(start_once(&sched, el.clone(), 2000, CounterStyle::default()));
        sched.advance(16);
        assert_eq!(el.text().as_deref(), Some("0+"));
    }

    #[test]
    fn garbage_target_is_skipped() {
        let sched = ManualScheduler::new();
        let el = FakeSurface::new();
        el.set_attr(TARGET_ATTR, "lots");

        assert!(!start_once(&sched, el.clone(), 2000, CounterStyle::default()));
        assert_eq!(sched.pending(), 0);
        assert_eq!(el.attr(ANIMATED_ATTR), None);
    }

    #[test]
    fn section_counters_suffix_every_frame() {
        let sched = ManualScheduler::new();
        let el = FakeSurface::new();
        el.set_attr(TARGET_ATTR, " 50 ");

        start_once(&sched, el.clone(), 2000, CounterStyle::with_partial_suffix());
        sched.advance(16 * 10);
        assert!(el.texts.borrow().iter().all(|t| t.ends_with('+')));
    }

    #[test]
    fn defaults_match_the_pages() {
        let cfg = CountersConfig::default();
        assert_eq!(cfg.stats.watch.threshold, 0.2);
        assert_eq!(cfg.stats.watch.root_margin, RootMargin::bottom(-50));
        assert_eq!(cfg.sections.watch.threshold, 0.5);
    }
}
