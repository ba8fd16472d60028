//! Entrance animations: put an element in its hidden state, then move it to
//! its final state when something (usually the viewport watcher) says so.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::surface::Surface;
use crate::timer::Scheduler;

/// Inline style writes, applied in the order they were added with
/// [`StyleSet::with`]. In config it is a `{"property": "value"}` map, which
/// applies in property-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct StyleSet(Vec<(String, String)>);

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((property.into(), value.into()));
        self
    }

    pub fn apply(&self, surface: &impl Surface) {
        for (property, value) in &self.0 {
            surface.set_style(property, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for StyleSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl From<StyleSet> for BTreeMap<String, String> {
    fn from(styles: StyleSet) -> Self {
        styles.0.into_iter().collect()
    }
}

/// When the hidden (`from`) state is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prepare {
    /// Right away, so the element stays hidden until it is revealed.
    OnRegister,
    /// Only once the trigger arrives; `to` follows after the delay.
    OnReveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    FadeUp,
    SlideIn,
    Rise,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrance {
    pub from: StyleSet,
    pub to: StyleSet,
    pub transition: String,
    pub prepare: Prepare,
    /// Added to every reveal's own delay.
    pub base_delay_ms: u32,
}

impl Entrance {
    pub fn fade_up() -> Self {
        Self {
            from: StyleSet::new()
                .with("opacity", "0")
                .with("transform", "translateY(30px)"),
            to: StyleSet::new()
                .with("opacity", "1")
                .with("transform", "translateY(0)"),
            transition: "opacity 0.6s ease, transform 0.6s ease".to_string(),
            prepare: Prepare::OnRegister,
            base_delay_ms: 0,
        }
    }

    pub fn slide_in() -> Self {
        Self {
            from: StyleSet::new()
                .with("opacity", "0")
                .with("transform", "translateX(-30px)"),
            to: StyleSet::new()
                .with("opacity", "1")
                .with("transform", "translateX(0)"),
            transition: "all 0.5s ease".to_string(),
            prepare: Prepare::OnRegister,
            base_delay_ms: 0,
        }
    }

    pub fn rise() -> Self {
        Self {
            transition: "all 0.6s ease".to_string(),
            prepare: Prepare::OnReveal,
            base_delay_ms: 100,
            ..Self::fade_up()
        }
    }

    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::FadeUp => Self::fade_up(),
            Preset::SlideIn => Self::slide_in(),
            Preset::Rise => Self::rise(),
        }
    }

    /// Called when the element is registered.
    pub fn prepare(&self, surface: &impl Surface) {
        if self.prepare == Prepare::OnRegister {
            self.from.apply(surface);
            surface.set_style("transition", &self.transition);
        }
    }

    /// Move `surface` into its final state after `delay_ms` (plus the base delay).
    pub fn reveal<S, T>(&self, scheduler: &S, surface: T, delay_ms: u32)
    where
        S: Scheduler,
        T: Surface + 'static,
    {
        let delay = self.base_delay_ms.saturating_add(delay_ms);
        match self.prepare {
            Prepare::OnRegister => {
                if delay == 0 {
                    self.to.apply(&surface);
                    return;
                }
                let to = self.to.clone();
                scheduler.spawn(delay, Box::new(move || to.apply(&surface)));
            }
            Prepare::OnReveal => {
                self.from.apply(&surface);
                let to = self.to.clone();
                let transition = self.transition.clone();
                scheduler.spawn(
                    delay,
                    Box::new(move || {
                        surface.set_style("transition", &transition);
                        to.apply(&surface);
                    }),
                );
            }
        }
    }
}

pub fn stagger_delay(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(step_ms)
}
