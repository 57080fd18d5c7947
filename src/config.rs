//! Tunable gesture constants, persisted to localStorage as JSON.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const STORAGE_KEY: &str = "d20_gesture_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Quiet period after the last wheel tick before the wheel gesture ends.
    pub debounce_ms: u32,
    /// Pixels per wheel line (`deltaMode == 1`).
    pub line_multiplier: f64,
    /// Pixels per wheel page (`deltaMode == 2`).
    pub page_multiplier: f64,
    /// Largest vertical wheel delta accepted per event, in pixels.
    pub max_wheel_delta: f64,
    pub wheel_scale_speedup: f64,
    pub wheel_translation_speedup: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            line_multiplier: 8.0,
            page_multiplier: 24.0,
            max_wheel_delta: 24.0,
            wheel_scale_speedup: 2.0,
            wheel_translation_speedup: 2.0,
        }
    }
}

impl GestureConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(ConfigError::Serialize)
    }

    /// Reads the stored config. `Ok(None)` when nothing has been saved yet.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let store = local_storage()?;
        match store.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => Self::from_json(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(ConfigError::storage(e)),
        }
    }

    /// Stored config, or defaults when missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Self::default(),
            Err(err) => {
                tracing::warn!(%err, "falling back to default gesture config");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let raw = self.to_json()?;
        local_storage()?
            .set_item(STORAGE_KEY, &raw)
            .map_err(ConfigError::storage)
    }

    pub fn clear() -> Result<(), ConfigError> {
        local_storage()?
            .remove_item(STORAGE_KEY)
            .map_err(ConfigError::storage)
    }
}

pub(crate) fn local_storage() -> Result<web_sys::Storage, ConfigError> {
    let win = web_sys::window().ok_or(ConfigError::NoWindow)?;
    match win.local_storage() {
        Ok(Some(store)) => Ok(store),
        Ok(None) => Err(ConfigError::NoWindow),
        Err(e) => Err(ConfigError::storage(e)),
    }
}
