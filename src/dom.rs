//! Page reads and writes the engine needs from `window` and `document`.
//!
//! Every function here tolerates missing nodes by falling back to a neutral
//! value; nothing panics outside a browser page.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Element, HtmlElement, Window};

use crate::consts::{REDUCED_MOTION_QUERY, SCROLL_EVENT_NAME};
use crate::engine::{ScrollNotification, Viewport};
use crate::error::ScrollError;

/// Wall-clock time in milliseconds.
#[must_use]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Whether the user asked the system to minimize animation.
#[must_use]
pub fn prefers_reduced_motion(window: &Window) -> bool {
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(query)) => query.matches(),
        _ => false,
    }
}

#[must_use]
pub fn viewport(window: &Window) -> Viewport {
    Viewport::new(scroll_top(window), max_scroll_top(window))
}

/// Current vertical offset, trying the window first and then the root elements.
#[must_use]
pub fn scroll_top(window: &Window) -> f64 {
    if let Ok(offset) = window.page_y_offset() {
        if offset != 0.0 {
            return offset;
        }
    }
    let Some(document) = window.document() else {
        return 0.0;
    };
    let root = document.document_element().map_or(0, |el| el.scroll_top());
    if root != 0 {
        return f64::from(root);
    }
    document.body().map_or(0.0, |body| f64::from(body.scroll_top()))
}

/// Largest offset the page can scroll to.
#[must_use]
pub fn max_scroll_top(window: &Window) -> f64 {
    let Some(document) = window.document() else {
        return 0.0;
    };
    let mut content = 0;
    if let Some(body) = document.body() {
        content = content.max(body.scroll_height()).max(body.offset_height());
    }
    if let Some(root) = document.document_element() {
        content = content.max(root.client_height()).max(root.scroll_height());
        if let Some(root) = root.dyn_ref::<HtmlElement>() {
            content = content.max(root.offset_height());
        }
    }
    let inner_height = window.inner_height().map_or(0.0, |h| h.as_f64().unwrap_or(0.0));
    f64::from(content) - inner_height
}

/// Top edge of `el` in document coordinates.
#[must_use]
pub fn element_top(window: &Window, el: &Element) -> f64 {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        return f64::from(html.offset_top());
    }
    el.get_bounding_client_rect().top() + scroll_top(window)
}

/// Replace the address-bar fragment without navigating.
///
/// # Errors
///
/// Fails when the history API is unavailable or rejects the URL.
pub fn push_fragment(window: &Window, href: &str) -> Result<(), ScrollError> {
    let history = window.history().map_err(|e| ScrollError::js("history", &e))?;
    history
        .push_state_with_url(&JsValue::NULL, "", Some(href))
        .map_err(|e| ScrollError::js("pushState", &e))
}

/// Dispatch the scroll notification as a `CustomEvent` on `window`.
///
/// # Errors
///
/// Fails when the payload cannot be built or the event cannot be dispatched.
pub fn dispatch_scroll_event(window: &Window, notification: &ScrollNotification) -> Result<(), ScrollError> {
    let json = serde_json::to_string(notification)?;
    let detail = js_sys::JSON::parse(&json).map_err(|e| ScrollError::js("JSON.parse", &e))?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(SCROLL_EVENT_NAME, &init)
        .map_err(|e| ScrollError::js("CustomEvent", &e))?;
    window
        .dispatch_event(&event)
        .map_err(|e| ScrollError::js("dispatchEvent", &e))?;
    Ok(())
}
