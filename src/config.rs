use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::DEFAULT_CHANNEL;

/// Message bus configuration.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Messages kept per channel while nobody is subscribed.
    pub buffer_limit: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self { buffer_limit: 32 }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Channel used by sessions that do not name one.
    pub default_channel: String,
    /// Dwell interval for auto-closing banners (ms).
    pub auto_close_ms: u64,
    /// Message bus configuration.
    pub bus: BusConfig,
    /// JSON file holding the navigation menu.
    pub nav_file: Option<PathBuf>,
    /// Start the terminal front-end instead of the HTTP server.
    pub tui: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::defaults();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            default_channel: lookup("DEFAULT_CHANNEL")
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(defaults.default_channel),
            auto_close_ms: lookup("AUTO_CLOSE_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auto_close_ms),
            bus: BusConfig {
                buffer_limit: lookup("BUS_BUFFER_LIMIT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.bus.buffer_limit),
            },
            nav_file: lookup("NAV_FILE")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            tui: lookup("NOTICEBOARD_TUI")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.tui),
        }
    }

    /// Built-in defaults, independent of the environment.
    pub fn defaults() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            default_channel: DEFAULT_CHANNEL.to_string(),
            auto_close_ms: 7000,
            bus: BusConfig::default(),
            nav_file: None,
            tui: false,
        }
    }

    /// Dwell interval as a [`Duration`].
    pub fn auto_close(&self) -> Duration {
        Duration::from_millis(self.auto_close_ms)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
