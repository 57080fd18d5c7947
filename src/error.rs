use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no window or localStorage available")]
    NoWindow,
    #[error("localStorage: {0}")]
    Storage(String),
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not encode config: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn storage(value: JsValue) -> Self {
        ConfigError::Storage(js_message(&value))
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
