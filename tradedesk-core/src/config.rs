//! Client configuration — where the backend lives and how long to
//! wait for it. Missing or corrupt files fall back to defaults so a
//! fresh install starts without setup.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const BASE_URL_ENV: &str = "TRADEDESK_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load from a TOML file, then apply the env override. Any read
    /// or parse problem yields the defaults.
    pub fn load(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Config::default(),
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}
