//! Viewport visibility watching.
//!
//! [`ViewportWatcher`] keeps one `IntersectionObserver` per distinct
//! threshold/root-margin pair and a single registry of what to do when an
//! element shows up. The registry is plain Rust ([`WatchRegistry`]) so the
//! one-shot bookkeeping can be exercised without a browser.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::{EffectsError, Result};

/// Slack for ratios reported a hair under the threshold that triggered them.
const RATIO_EPSILON: f64 = 1e-3;

/// CSS margin shorthand in pixels, as taken by `rootMargin`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl RootMargin {
    pub const fn bottom(px: i32) -> Self {
        Self {
            top: 0,
            right: 0,
            bottom: px,
            left: 0,
        }
    }
}

fn parse_length(token: &str) -> Option<i32> {
    let number = match token.strip_suffix("px") {
        Some(n) => n,
        None if token == "0" || token == "-0" => token,
        None => return None,
    };
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.round() as i32)
}

impl FromStr for RootMargin {
    type Err = EffectsError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || EffectsError::RootMargin(s.to_string());
        let values = s
            .split_whitespace()
            .map(parse_length)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(bad)?;

        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(bad()),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = EffectsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchOptions {
    /// Fraction of the element that has to be on screen, 0.0..=1.0.
    pub threshold: f64,
    pub root_margin: RootMargin,
    /// Stop watching after the first signal.
    pub one_shot: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::default(),
            one_shot: true,
        }
    }
}

impl WatchOptions {
    pub fn new(threshold: f64, root_margin: RootMargin) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin,
            one_shot: true,
        }
    }

    fn same_observer(&self, threshold: f64, margin: RootMargin) -> bool {
        self.threshold.to_bits() == threshold.to_bits() && self.root_margin == margin
    }
}

pub fn crossed(intersecting: bool, ratio: f64, threshold: f64) -> bool {
    intersecting && ratio + RATIO_EPSILON >= threshold
}

pub type VisibleCallback<K> = Rc<dyn Fn(&K, usize)>;

struct Registration<K> {
    key: K,
    group: usize,
    threshold: f64,
    one_shot: bool,
    on_visible: VisibleCallback<K>,
}

/// One observation delivered by the environment.
#[derive(Debug, Clone)]
pub struct Entry<K> {
    pub key: K,
    pub intersecting: bool,
    pub ratio: f64,
}

/// Callbacks a batch triggered plus the keys nobody in that group watches anymore.
pub struct Dispatch<K> {
    fire: Vec<(VisibleCallback<K>, K, usize)>,
    released: Vec<K>,
}

impl<K> Dispatch<K> {
    pub fn is_empty(&self) -> bool {
        self.fire.is_empty()
    }

    /// Invoke the callbacks and hand back the released keys.
    pub fn run(self) -> Vec<K> {
        for (callback, key, index) in self.fire {
            callback(&key, index);
        }
        self.released
    }
}

pub struct WatchRegistry<K> {
    registrations: Vec<Registration<K>>,
}

impl<K> Default for WatchRegistry<K> {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }
}

impl<K: PartialEq + Clone> WatchRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        key: K,
        group: usize,
        threshold: f64,
        one_shot: bool,
        on_visible: VisibleCallback<K>,
    ) {
        self.registrations.push(Registration {
            key,
            group,
            threshold,
            one_shot,
            on_visible,
        });
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn is_watching(&self, key: &K) -> bool {
        self.registrations.iter().any(|r| &r.key == key)
    }

    /// Match a batch from one observer group against the registrations.
    ///
    /// One-shot registrations that fire are removed here, before any callback
    /// runs, so a callback can never see its own registration fire twice.
    pub fn dispatch(&mut self, group: usize, entries: &[Entry<K>]) -> Dispatch<K> {
        let mut fire = Vec::new();
        let mut released = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let mut spent = false;
            self.registrations.retain(|r| {
                if r.group != group || r.key != entry.key {
                    return true;
                }
                if !crossed(entry.intersecting, entry.ratio, r.threshold) {
                    return true;
                }
                fire.push((r.on_visible.clone(), entry.key.clone(), index));
                if r.one_shot {
                    spent = true;
                    false
                } else {
                    true
                }
            });

            let still_needed = self
                .registrations
                .iter()
                .any(|r| r.group == group && r.key == entry.key);
            if spent && !still_needed && !released.contains(&entry.key) {
                released.push(entry.key.clone());
            }
        }

        Dispatch { fire, released }
    }
}

struct ObserverGroup {
    threshold: f64,
    margin: RootMargin,
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// Shared `IntersectionObserver` front end keyed by element identity.
#[derive(Default)]
pub struct ViewportWatcher {
    registry: Rc<RefCell<WatchRegistry<Element>>>,
    groups: RefCell<Vec<ObserverGroup>>,
}

impl ViewportWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `on_visible(element, batch_index)` once `element` is on screen.
    pub fn register<F>(&self, element: &Element, options: &WatchOptions, on_visible: F) -> Result<()>
    where
        F: Fn(&Element, usize) + 'static,
    {
        let group = self.group_for(options)?;
        self.registry.borrow_mut().register(
            element.clone(),
            group,
            options.threshold,
            options.one_shot,
            Rc::new(on_visible),
        );
        self.groups.borrow()[group].observer.observe(element);
        Ok(())
    }

    pub fn watched(&self) -> usize {
        self.registry.borrow().len()
    }

    pub fn observers(&self) -> usize {
        self.groups.borrow().len()
    }

    pub fn disconnect(&self) {
        for group in self.groups.borrow().iter() {
            group.observer.disconnect();
        }
    }

    fn group_for(&self, options: &WatchOptions) -> Result<usize> {
        if let Some(idx) = self
            .groups
            .borrow()
            .iter()
            .position(|g| options.same_observer(g.threshold, g.margin))
        {
            return Ok(idx);
        }

        let index = self.groups.borrow().len();
        let registry = self.registry.clone();
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            let batch: Vec<Entry<Element>> = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|e| Entry {
                    key: e.target(),
                    intersecting: e.is_intersecting(),
                    ratio: e.intersection_ratio(),
                })
                .collect();

            let dispatch = registry.borrow_mut().dispatch(index, &batch);
            for element in dispatch.run() {
                observer.unobserve(&element);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin.to_string());
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        log::debug!(
            "new intersection observer #{} (threshold {}, margin {})",
            index,
            options.threshold,
            options.root_margin
        );
        self.groups.borrow_mut().push(ObserverGroup {
            threshold: options.threshold,
            margin: options.root_margin,
            observer,
            _callback: callback,
        });
        Ok(index)
    }
}

impl Drop for ViewportWatcher {
    fn drop(&mut self) {
        self.disconnect();
    }
}
