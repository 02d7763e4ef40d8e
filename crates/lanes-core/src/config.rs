use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::window::Geometry;
use crate::{LanesError, LanesResult};

/// Edge band and rate used while a drag hovers near a list's top or bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollConfig {
    /// Distance from the viewport edge that triggers scrolling.
    pub margin: f64,
    /// Scroll distance applied per tick.
    pub step: f64,
    /// Minimum time between two ticks, in milliseconds.
    pub interval_ms: u64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            margin: default_autoscroll_margin(),
            step: default_autoscroll_step(),
            interval_ms: default_autoscroll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_item_height")]
    pub item_height: f64,
    #[serde(default = "default_buffer_count")]
    pub buffer_count: usize,
    #[serde(default = "default_autoscroll_margin")]
    pub autoscroll_margin: f64,
    #[serde(default = "default_autoscroll_step")]
    pub autoscroll_step: f64,
    #[serde(default = "default_autoscroll_interval_ms")]
    pub autoscroll_interval_ms: u64,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

fn default_item_height() -> f64 {
    1.0
}

fn default_buffer_count() -> usize {
    2
}

fn default_autoscroll_margin() -> f64 {
    1.0
}

fn default_autoscroll_step() -> f64 {
    1.0
}

fn default_autoscroll_interval_ms() -> u64 {
    50
}

fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            item_height: default_item_height(),
            buffer_count: default_buffer_count(),
            autoscroll_margin: default_autoscroll_margin(),
            autoscroll_step: default_autoscroll_step(),
            autoscroll_interval_ms: default_autoscroll_interval_ms(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/lanes/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("lanes/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("lanes\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the user config, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match std::fs::read_to_string(&config_path) {
                    Ok(content) => match Self::from_toml_str(&content) {
                        Ok(config) => return config,
                        Err(e) => tracing::warn!("Ignoring {}: {}", config_path.display(), e),
                    },
                    Err(e) => tracing::warn!("Cannot read {}: {}", config_path.display(), e),
                }
            }
        }
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> LanesResult<Self> {
        toml::from_str(content).map_err(|e| LanesError::Config(e.to_string()))
    }

    pub fn geometry(&self) -> LanesResult<Geometry> {
        Geometry::new(self.item_height, self.buffer_count)
    }

    pub fn autoscroll(&self) -> AutoScrollConfig {
        AutoScrollConfig {
            margin: self.autoscroll_margin,
            step: self.autoscroll_step,
            interval_ms: self.autoscroll_interval_ms,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}
