//! Configuration management
//!
//! Compatible with the app's settings.json format:
//! ```json
//! {
//!   "app": { "demoMode": false, "authLatencyMs": 1000, ... }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

fn default_auth_latency_ms() -> u64 {
    1000
}

/// Raw settings.json structure (matching the app format)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default = "default_auth_latency_ms")]
    auth_latency_ms: u64,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            demo_mode: false,
            auth_latency_ms: default_auth_latency_ms(),
            other: HashMap::new(),
        }
    }
}

/// Moodline configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub auth_latency_ms: u64,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            auth_latency_ms: default_auth_latency_ms(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the moodline directory
    ///
    /// Demo mode can be enabled via:
    /// 1. Settings file (ml demo on)
    /// 2. Environment variable MOODLINE_DEMO_MODE (for CI/testing)
    ///
    /// The simulated auth latency can likewise be overridden with
    /// MOODLINE_AUTH_LATENCY_MS.
    pub fn load(moodline_dir: &Path) -> Result<Self> {
        let settings_path = moodline_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Check env var for demo mode override (for CI/testing)
        let demo_mode = match std::env::var("MOODLINE_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        let auth_latency_ms = std::env::var("MOODLINE_AUTH_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(raw.app.auth_latency_ms);

        Ok(Self {
            demo_mode,
            auth_latency_ms,
            _raw_settings: raw,
        })
    }

    /// Save config to the moodline directory
    /// Preserves other settings that the CLI doesn't manage
    pub fn save(&self, moodline_dir: &Path) -> Result<()> {
        let settings_path = moodline_dir.join("settings.json");

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Update only the fields we manage
        settings.app.demo_mode = self.demo_mode;
        settings.app.auth_latency_ms = self.auth_latency_ms;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// The simulated round trip applied to sign-up and login.
    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    /// Enable demo mode
    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    /// Disable demo mode
    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}
