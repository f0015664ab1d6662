//! In-page anchor navigation.

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;

use crate::consts::ANCHOR_HEADER_OFFSET_PX;

/// Selector matching anchors that link within the page.
pub const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Return the fragment selector an anchor `href` navigates to.
///
/// Only same-page fragments qualify; a bare `#` links to nothing.
#[must_use]
pub fn fragment_selector(href: &str) -> Option<&str> {
    if href.starts_with('#') && href != "#" { Some(href) } else { None }
}

/// Scroll offset that places an element at `element_top` just below the fixed header.
#[must_use]
pub fn scroll_target(element_top: f64) -> f64 {
    element_top - ANCHOR_HEADER_OFFSET_PX
}
