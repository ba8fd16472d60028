//! Pointer and focus feedback on cards and form fields.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

use crate::dom::{self, Listeners};
use crate::error::Result;
use crate::surface::Surface;
use crate::transition::StyleSet;

const TILT_DAMPING: f64 = 20.0;
pub const TILT_RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0)";

/// Rotation in degrees for a pointer at (`x`, `y`) inside a `width` x `height` card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub fn at(width: f64, height: f64, x: f64, y: f64) -> Self {
        Self {
            rotate_x: (y - height / 2.0) / TILT_DAMPING,
            rotate_y: (width / 2.0 - x) / TILT_DAMPING,
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-10px)",
            self.rotate_x, self.rotate_y
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HoverConfig {
    pub selector: String,
    #[serde(default)]
    pub enter: StyleSet,
    #[serde(default)]
    pub leave: StyleSet,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldFocusConfig {
    pub selector: String,
    /// Written on the field's parent.
    pub focus: StyleSet,
    pub blur: StyleSet,
}

impl Default for FieldFocusConfig {
    fn default() -> Self {
        Self {
            selector: ".form-control, .form-select".to_string(),
            focus: StyleSet::new()
                .with("transform", "scale(1.02)")
                .with("transition", "transform 0.2s ease"),
            blur: StyleSet::new().with("transform", "scale(1)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CardsConfig {
    pub tilt: String,
    pub hover: Vec<HoverConfig>,
    pub fields: FieldFocusConfig,
    pub doctor_cards: String,
    pub doctor_name: String,
}

impl HoverConfig {
    fn department_cards() -> Self {
        Self {
            selector: ".department-card".to_string(),
            enter: StyleSet::new().with("transform", "scale(1.05)"),
            leave: StyleSet::new().with("transform", "scale(1)"),
        }
    }

    fn testimonial_cards() -> Self {
        Self {
            selector: ".testimonial-card".to_string(),
            enter: StyleSet::new().with("transition", "all 0.3s ease"),
            leave: StyleSet::new(),
        }
    }
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            tilt: ".service-card".to_string(),
            hover: vec![HoverConfig::department_cards(), HoverConfig::testimonial_cards()],
            fields: FieldFocusConfig::default(),
            doctor_cards: ".doctor-card".to_string(),
            doctor_name: "h5".to_string(),
        }
    }
}

impl CardsConfig {
    pub fn landing() -> Self {
        Self {
            hover: vec![HoverConfig::testimonial_cards()],
            fields: FieldFocusConfig {
                selector: String::new(),
                ..FieldFocusConfig::default()
            },
            doctor_cards: String::new(),
            ..Self::default()
        }
    }

    pub fn inner() -> Self {
        Self {
            tilt: String::new(),
            hover: vec![HoverConfig::department_cards()],
            ..Self::default()
        }
    }
}

pub fn tilt_on_move(card: &impl Surface, tilt: Tilt) {
    card.set_style("transform", &tilt.transform());
}

pub fn tilt_reset(card: &impl Surface) {
    card.set_style("transform", TILT_RESET);
}

fn install_tilt(document: &Document, selector: &str, listeners: &mut Listeners) -> Result<()> {
    for card in dom::query_all(document, selector) {
        let el = card.clone();
        listeners.on(&card, "mousemove", move |e| {
            let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = el.get_bounding_client_rect();
            let x = f64::from(mouse.client_x()) - rect.left();
            let y = f64::from(mouse.client_y()) - rect.top();
            tilt_on_move(&el, Tilt::at(rect.width(), rect.height(), x, y));
        })?;

        let el = card.clone();
        listeners.on(&card, "mouseleave", move |_| tilt_reset(&el))?;
    }
    Ok(())
}

fn install_hover(document: &Document, hover: &HoverConfig, listeners: &mut Listeners) -> Result<()> {
    for card in dom::query_all(document, &hover.selector) {
        if !hover.enter.is_empty() {
            let (el, styles) = (card.clone(), hover.enter.clone());
            listeners.on(&card, "mouseenter", move |_| styles.apply(&el))?;
        }
        if !hover.leave.is_empty() {
            let (el, styles) = (card.clone(), hover.leave.clone());
            listeners.on(&card, "mouseleave", move |_| styles.apply(&el))?;
        }
    }
    Ok(())
}

fn install_field_focus(document: &Document, config: &FieldFocusConfig, listeners: &mut Listeners) -> Result<()> {
    for field in dom::query_all(document, &config.selector) {
        let Some(parent) = field.parent_element() else {
            continue;
        };
        let (el, styles) = (parent.clone(), config.focus.clone());
        listeners.on(&field, "focus", move |_| styles.apply(&el))?;
        let (el, styles) = (parent, config.blur.clone());
        listeners.on(&field, "blur", move |_| styles.apply(&el))?;
    }
    Ok(())
}

fn doctor_name(card: &Element, selector: &str) -> Option<String> {
    card.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|h| h.text_content())
        .map(|name| name.trim().to_string())
}

fn install_doctor_cards(document: &Document, config: &CardsConfig, listeners: &mut Listeners) -> Result<()> {
    for card in dom::query_all(document, &config.doctor_cards) {
        let (el, name_selector) = (card.clone(), config.doctor_name.clone());
        listeners.on(&card, "click", move |_| {
            if let Some(name) = doctor_name(&el, &name_selector) {
                log::info!("Viewing profile for: {}", name);
            }
        })?;
    }
    Ok(())
}

pub fn install(document: &Document, config: &CardsConfig) -> Result<Listeners> {
    let mut listeners = Listeners::new();
    install_tilt(document, &config.tilt, &mut listeners)?;
    for hover in &config.hover {
        install_hover(document, hover, &mut listeners)?;
    }
    install_field_focus(document, &config.fields, &mut listeners)?;
    install_doctor_cards(document, config, &mut listeners)?;
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;
    use pretty_assertions::assert_eq;

    #[test]
    fn centre_of_card_is_flat() {
        let t = Tilt::at(300.0, 200.0, 150.0, 100.0);
        assert_eq!(t, Tilt { rotate_x: 0.0, rotate_y: 0.0 });
    }

    #[test]
    fn corners_tilt_towards_the_pointer() {
        // top-left corner: card leans back on X and turns left on Y
        let t = Tilt::at(300.0, 200.0, 0.0, 0.0);
        assert_eq!(t, Tilt { rotate_x: -5.0, rotate_y: 7.5 });

        let t = Tilt::at(300.0, 200.0, 300.0, 200.0);
        assert_eq!(t, Tilt { rotate_x: 5.0, rotate_y: -7.5 });
    }

    #[test]
    fn move_then_leave() {
        let card = FakeSurface::new();
        tilt_on_move(&card, Tilt::at(200.0, 200.0, 0.0, 200.0));
        assert_eq!(
            card.style("transform").as_deref(),
            Some("perspective(1000px) rotateX(5deg) rotateY(5deg) translateY(-10px)")
        );

        tilt_reset(&card);
        assert_eq!(card.style("transform").as_deref(), Some(TILT_RESET));
    }

    #[test]
    fn hover_config_from_json() {
        let cfg: CardsConfig = serde_json::from_str(
            r#"{"hover": [{"selector": ".pharmacy-card", "enter": {"transform": "scale(1.1)"}}]}"#,
        )
        .unwrap();
        assert_eq!(cfg.hover.len(), 1);
        assert!(cfg.hover[0].leave.is_empty());
        assert_eq!(cfg.tilt, ".service-card");

        let el = FakeSurface::new();
        cfg.hover[0].enter.apply(&el);
        assert_eq!(el.style("transform").as_deref(), Some("scale(1.1)"));
    }

    #[test]
    fn field_focus_defaults() {
        let cfg = FieldFocusConfig::default();
        let parent = FakeSurface::new();
        cfg.focus.apply(&parent);
        assert_eq!(parent.style("transform").as_deref(), Some("scale(1.02)"));
        cfg.blur.apply(&parent);
        assert_eq!(parent.style("transform").as_deref(), Some("scale(1)"));
    }
}
