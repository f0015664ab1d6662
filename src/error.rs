//! Crate error type.
//!
//! Page-facing behavior never surfaces these: DOM failures are logged and
//! skipped. They exist so configuration updates can be rejected with a reason
//! and so `JsValue` failures carry a readable message into the log.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum ScrollError {
    /// A configuration value is out of range.
    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: &'static str },

    /// A configuration patch could not be (de)serialized.
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),

    /// A browser API call failed.
    #[error("browser call failed: {0}")]
    Js(String),
}

impl ScrollError {
    /// Wrap a thrown JS value, keeping its string form when it has one.
    #[must_use]
    pub fn js(context: &str, value: &JsValue) -> Self {
        let detail = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        Self::Js(format!("{context}: {detail}"))
    }
}

impl From<ScrollError> for JsValue {
    fn from(err: ScrollError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
