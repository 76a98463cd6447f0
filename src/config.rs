//! Board Configuration
//!
//! Tunables read once at startup.

use std::time::Duration;

use serde::Deserialize;

/// Name of the optional global the host page may define
pub const WINDOW_CONFIG_KEY: &str = "TRIP_BOARD_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Delay before a pending mutation shows the blocking indicator
    pub block_lower_limit_ms: u64,
    /// Minimum time from block start before a shown indicator is removed
    pub block_upper_limit_ms: u64,
    /// `log` level name for the console logger
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            block_lower_limit_ms: 350,
            block_upper_limit_ms: 1000,
            log_level: "info".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn lower_limit(&self) -> Duration {
        Duration::from_millis(self.block_lower_limit_ms)
    }

    pub fn upper_limit(&self) -> Duration {
        Duration::from_millis(self.block_upper_limit_ms)
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Reads `window.TRIP_BOARD_CONFIG` when the page defines it.
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let value = match js_sys::Reflect::get(&window, &WINDOW_CONFIG_KEY.into()) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return Self::default(),
        };
        match serde_wasm_bindgen::from_value(value) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("[CONFIG] Ignoring malformed {}: {}", WINDOW_CONFIG_KEY, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.lower_limit(), Duration::from_millis(350));
        assert_eq!(config.upper_limit(), Duration::from_millis(1000));
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: BoardConfig = serde_json::from_str(r#"{"block_lower_limit_ms": 100}"#).unwrap();
        assert_eq!(config.block_lower_limit_ms, 100);
        assert_eq!(config.block_upper_limit_ms, 1000);
    }

    #[test]
    fn test_unknown_level_is_info() {
        let config = BoardConfig {
            log_level: "chatty".to_string(),
            ..BoardConfig::default()
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }
}
