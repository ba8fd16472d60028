//! Material-style ripple on button clicks.

use serde::{Deserialize, Serialize};
use stylist::GlobalStyle;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent};

use crate::dom::{self, Listeners};
use crate::error::{EffectsError, Result};
use crate::surface::Surface;
use crate::timer::Scheduler;

const RIPPLE_CSS: &str = r#"
    .btn {
        position: relative;
        overflow: hidden;
    }
    .ripple {
        position: absolute;
        border-radius: 50%;
        background: rgba(255, 255, 255, 0.5);
        transform: scale(0);
        animation: ripple-animation 0.6s ease-out;
        pointer-events: none;
    }
    @keyframes ripple-animation {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
"#;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RippleConfig {
    pub selector: String,
    pub class: String,
    pub duration_ms: u32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            selector: ".btn".to_string(),
            class: "ripple".to_string(),
            duration_ms: 600,
        }
    }
}

/// Square ripple centred on the click, in the button's own coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// `x`/`y` are relative to the button's top-left corner.
    pub fn at(width: f64, height: f64, x: f64, y: f64) -> Self {
        let size = width.max(height);
        Self {
            size,
            left: x - size / 2.0,
            top: y - size / 2.0,
        }
    }

    pub fn apply(&self, ripple: &impl Surface) {
        let size = format!("{}px", self.size);
        ripple.set_style("width", &size);
        ripple.set_style("height", &size);
        ripple.set_style("left", &format!("{}px", self.left));
        ripple.set_style("top", &format!("{}px", self.top));
    }
}

/// Injects the ripple rules into `<head>`; the returned style has to stay alive.
pub fn mount_styles() -> Result<GlobalStyle> {
    GlobalStyle::new(RIPPLE_CSS).map_err(|e| EffectsError::Js(e.to_string()))
}

pub fn install<S: Scheduler>(document: &Document, scheduler: &S, config: &RippleConfig) -> Result<Listeners> {
    let mut listeners = Listeners::new();

    for button in dom::query_all(document, &config.selector) {
        let doc = document.clone();
        let host = button.clone();
        let scheduler = scheduler.clone();
        let config = config.clone();
        listeners.on(&button, "click", move |e| {
            let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Ok(ripple) = doc.create_element("span") else {
                return;
            };
            let rect = host.get_bounding_client_rect();
            RippleGeometry::at(
                rect.width(),
                rect.height(),
                f64::from(mouse.client_x()) - rect.left(),
                f64::from(mouse.client_y()) - rect.top(),
            )
            .apply(&ripple);
            ripple.add_class(&config.class);

            if host.append_child(&ripple).is_ok() {
                scheduler.spawn(config.duration_ms, Box::new(move || ripple.remove()));
            }
        })?;
    }

    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;
    use pretty_assertions::assert_eq;

    #[test]
    fn ripple_covers_the_longer_side_and_centres_on_click() {
        let g = RippleGeometry::at(120.0, 40.0, 30.0, 20.0);
        assert_eq!(g, RippleGeometry { size: 120.0, left: -30.0, top: -40.0 });

        let span = FakeSurface::new();
        g.apply(&span);
        assert_eq!(span.style("width").as_deref(), Some("120px"));
        assert_eq!(span.style("height").as_deref(), Some("120px"));
        assert_eq!(span.style("left").as_deref(), Some("-30px"));
        assert_eq!(span.style("top").as_deref(), Some("-40px"));
    }

    #[test]
    fn tall_button() {
        let g = RippleGeometry::at(40.0, 90.0, 20.0, 45.0);
        assert_eq!(g.size, 90.0);
        assert_eq!((g.left, g.top), (-25.0, 0.0));
    }
}
