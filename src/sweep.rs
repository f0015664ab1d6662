//! Removal of scroll-to-top buttons injected by other scripts.
//!
//! The first sweep at install removes every match. Later periodic sweeps only
//! remove matches that are fixed-positioned, leaving in-flow elements whose
//! class names merely happen to contain "scroll" or "top".

#[cfg(test)]
#[path = "sweep_test.rs"]
mod sweep_test;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::ScrollError;

/// Elements that look like floating scroll-to-top controls.
pub const STRAY_BUTTON_SELECTOR: &str = ".scroll-to-top, [class*=\"go-to-top\"], [class*=\"back-to-top\"], \
     button[class*=\"scroll\"], button[class*=\"top\"]";

/// Which matches a sweep removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepMode {
    /// Remove every matching element.
    All,
    /// Remove only matches positioned `fixed`.
    FixedOnly,
}

/// Whether a CSS `position` value pins the element to the viewport.
#[must_use]
pub fn is_fixed_position(position: &str) -> bool {
    position.trim().eq_ignore_ascii_case("fixed")
}

/// Remove matching elements from `document`. Returns how many were removed.
///
/// # Errors
///
/// Fails when the selector query itself throws.
pub fn sweep(window: &Window, document: &Document, mode: SweepMode) -> Result<u32, ScrollError> {
    let nodes = document
        .query_selector_all(STRAY_BUTTON_SELECTOR)
        .map_err(|e| ScrollError::js("querySelectorAll", &e))?;

    let mut removed = 0;
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else {
            continue;
        };
        let Some(el) = node.dyn_ref::<Element>() else {
            continue;
        };
        if mode == SweepMode::FixedOnly && !is_fixed(window, el) {
            continue;
        }
        el.remove();
        removed += 1;
    }
    if removed > 0 {
        log::debug!("removed {removed} scroll-to-top element(s)");
    }
    Ok(removed)
}

fn is_fixed(window: &Window, el: &Element) -> bool {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        if let Ok(inline) = html.style().get_property_value("position") {
            if is_fixed_position(&inline) {
                return true;
            }
        }
    }
    match window.get_computed_style(el) {
        Ok(Some(style)) => style
            .get_property_value("position")
            .map_or(false, |p| is_fixed_position(&p)),
        _ => false,
    }
}

