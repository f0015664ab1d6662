//! JavaScript-facing exports.
//!
//! ```js
//! import init, { install } from "./smooth_scroll.js";
//! await init();
//! window.SmoothScroll = install();
//! window.SmoothScroll.scrollTo(1200, 600, "easeOutQuart");
//! ```

use wasm_bindgen::prelude::*;

use crate::config::ScrollConfig;
use crate::engine::ScrollEngine;
use crate::error::ScrollError;

/// Module start hook: route `log` to the browser console and panics to `console.error`.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::warn!("console logger not installed: {err}");
    }
}

/// Install momentum scrolling on the current page with the default config.
///
/// # Errors
///
/// Throws when called outside a browser window or when listeners cannot be attached.
#[wasm_bindgen]
pub fn install() -> Result<SmoothScroll, JsValue> {
    let window = web_sys::window().ok_or_else(|| ScrollError::Js("no global window".into()))?;
    let engine = ScrollEngine::install(window, ScrollConfig::default())?;
    Ok(SmoothScroll { engine })
}

/// Handle to an installed engine.
#[wasm_bindgen]
pub struct SmoothScroll {
    engine: ScrollEngine,
}

#[wasm_bindgen]
impl SmoothScroll {
    /// Animate to `target`. `duration` (ms) and `easing` default to the config.
    #[wasm_bindgen(js_name = scrollTo)]
    pub fn scroll_to(&self, target: f64, duration: Option<f64>, easing: Option<String>) {
        self.engine.scroll_to(target, duration, easing.as_deref());
    }

    /// Stop momentum and any running animation.
    pub fn stop(&self) {
        self.engine.stop();
    }

    /// A copy of the current configuration as a plain object.
    ///
    /// # Errors
    ///
    /// Throws if the config cannot be converted.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        let json = serde_json::to_string(&self.engine.config()).map_err(ScrollError::from)?;
        js_sys::JSON::parse(&json)
    }

    /// Deep-merge a partial config object, e.g. `{ momentum: { friction: 0.95 } }`.
    ///
    /// # Errors
    ///
    /// Throws with the reason when the merged config is invalid; nothing changes.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, patch: &JsValue) -> Result<(), JsValue> {
        if patch.is_undefined() || patch.is_null() {
            return Ok(());
        }
        let text = String::from(js_sys::JSON::stringify(patch)?);
        let value: serde_json::Value = serde_json::from_str(&text).map_err(ScrollError::from)?;
        self.engine.set_config(&value)?;
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = reducedMotion)]
    pub fn reduced_motion(&self) -> bool {
        self.engine.reduced_motion()
    }
}
