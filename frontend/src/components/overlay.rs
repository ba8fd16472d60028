//! Page furniture that follows the scroll position: the reading progress
//! bar across the top and the back-to-top button.

use serde::{Deserialize, Serialize};
use web_sys::Document;
use yew::prelude::*;
use yew::AppHandle;
use yew_hooks::prelude::*;

use crate::dom;
use crate::error::{EffectsError, Result};

const PROGRESS_STYLE: &str = "position: fixed; top: 0; left: 0; height: 3px; \
    background: linear-gradient(90deg, var(--primary-color), var(--secondary-color)); \
    z-index: 9999; transition: width 0.1s ease;";

#[derive(Properties, PartialEq, Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlayProps {
    pub progress_bar: bool,
    /// Show the back-to-top button past this offset; `None` leaves it out.
    pub scroll_top_after: Option<f64>,
}

impl Default for OverlayProps {
    fn default() -> Self {
        Self {
            progress_bar: true,
            scroll_top_after: Some(300.0),
        }
    }
}

/// How far down the page the reader is, in percent.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

fn document_heights() -> (f64, f64) {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| (f64::from(el.scroll_height()), f64::from(el.client_height())))
        .unwrap_or((0.0, 0.0))
}

#[function_component(Overlay)]
pub fn overlay(props: &OverlayProps) -> Html {
    let (_, scroll_y) = use_window_scroll();
    let (scroll_height, client_height) = document_heights();
    let progress = scroll_progress(scroll_y, scroll_height, client_height);
    let show_top = props.scroll_top_after.map_or(false, |after| scroll_y > after);

    let back_to_top = Callback::from(|_: MouseEvent| {
        if let Some(window) = web_sys::window() {
            dom::smooth_scroll_to(&window, 0.0);
        }
    });

    html! {
        <>
            {
                if props.progress_bar {
                    html! {
                        <div class="scroll-progress" style={format!("{} width: {}%;", PROGRESS_STYLE, progress)}></div>
                    }
                } else {
                    html! {}
                }
            }
            {
                if props.scroll_top_after.is_some() {
                    html! {
                        <button class={classes!("scroll-top", show_top.then(|| "show"))} onclick={back_to_top} aria-label="Back to top">
                            <i class="bi bi-arrow-up"></i>
                        </button>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}

/// Render the overlay into a fresh `div` at the end of `<body>`.
pub fn mount(document: &Document, props: OverlayProps) -> Result<AppHandle<Overlay>> {
    let body = document.body().ok_or(EffectsError::NoDocument)?;
    let root = document.create_element("div")?;
    root.set_id("page-overlay");
    body.append_child(&root)?;
    Ok(yew::Renderer::<Overlay>::with_root_and_props(root, props).render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn progress_runs_from_zero_to_hundred() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1000.0, 3000.0, 1000.0), 50.0);
        assert_eq!(scroll_progress(2000.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn page_without_scroll_has_no_progress() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(scroll_progress(2100.0, 3000.0, 1000.0), 100.0);
        assert_eq!(scroll_progress(-40.0, 3000.0, 1000.0), 0.0);
    }
}
