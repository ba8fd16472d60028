//! Hero background shapes drift at different speeds while scrolling.

use serde::{Deserialize, Serialize};
use web_sys::{Document, Window};

use crate::debounce::debounce;
use crate::dom::{self, Listeners};
use crate::error::Result;
use crate::surface::Surface;
use crate::timer::Scheduler;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub selector: String,
    pub base_speed: f64,
    pub speed_step: f64,
    pub debounce_ms: u32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            selector: ".shape".to_string(),
            base_speed: 0.5,
            speed_step: 0.2,
            debounce_ms: 10,
        }
    }
}

impl ParallaxConfig {
    pub fn offset(&self, scroll_y: f64, index: usize) -> f64 {
        scroll_y * (self.base_speed + index as f64 * self.speed_step)
    }
}

pub fn apply<E: Surface>(shapes: &[E], scroll_y: f64, config: &ParallaxConfig) {
    for (index, shape) in shapes.iter().enumerate() {
        let offset = config.offset(scroll_y, index);
        shape.set_style("transform", &format!("translateY({}px)", offset));
    }
}

pub fn install<S: Scheduler>(
    document: &Document,
    window: &Window,
    scheduler: &S,
    config: &ParallaxConfig,
) -> Result<Listeners> {
    let mut listeners = Listeners::new();
    let shapes = dom::query_all(document, &config.selector);
    if shapes.is_empty() {
        return Ok(listeners);
    }

    let cfg = config.clone();
    let update = debounce(scheduler.clone(), config.debounce_ms, move |scroll_y: f64| {
        apply(&shapes, scroll_y, &cfg);
    });

    let win = window.clone();
    listeners.on(window, "scroll", move |_| update.call(dom::scroll_y(&win)))?;
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::debounce;
    use crate::testing::{FakeSurface, ManualScheduler};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn each_shape_moves_faster_than_the_last() {
        let cfg = ParallaxConfig::default();
        let shapes = vec![FakeSurface::new(), FakeSurface::new(), FakeSurface::new()];

        apply(&shapes, 100.0, &cfg);

        let transforms: Vec<_> = shapes.iter().map(|s| s.style("transform").unwrap()).collect();
        assert_eq!(
            transforms,
            vec!["translateY(50px)", "translateY(70px)", "translateY(90px)"]
        );
    }

    #[test]
    fn scroll_burst_moves_shapes_once() {
        let sched = ManualScheduler::new();
        let cfg = ParallaxConfig::default();
        let shapes: Rc<Vec<Rc<FakeSurface>>> = Rc::new(vec![FakeSurface::new()]);

        let s = shapes.clone();
        let c = cfg.clone();
        let update = debounce(sched.clone(), cfg.debounce_ms, move |y: f64| apply(&s, y, &c));
        for y in [10.0, 20.0, 30.0, 40.0] {
            update.call(y);
            sched.advance(2);
        }
        sched.advance(20);

        assert_eq!(shapes[0].writes.get(), 1);
        assert_eq!(shapes[0].style("transform").as_deref(), Some("translateY(20px)"));
    }
}
