//! Configuration management
//!
//! settings.json in the ledgerline directory:
//! ```json
//! {
//!   "app": { "demoMode": false, "companyId": "...", "userId": "..." }
//! }
//! ```
//!
//! `companyId`/`userId` are the acting context - the tenant and actor the
//! CLI reports for when no flags are given. Unknown fields are preserved
//! on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default)]
    company_id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Ledgerline configuration (simplified view of settings)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub demo_mode: bool,
    /// Acting tenant for CLI report commands
    pub company_id: Option<Uuid>,
    /// Acting user for CLI report commands
    pub user_id: Option<Uuid>,
    // Raw settings are kept so saving preserves fields we don't manage
    _raw_settings: SettingsFile,
}

impl Config {
    /// Load config from the ledgerline directory
    ///
    /// Demo mode can be forced via LEDGERLINE_DEMO_MODE (for CI/testing).
    /// Malformed id strings are treated as unset rather than errors.
    pub fn load(ledgerline_dir: &Path) -> Result<Self> {
        let settings_path = ledgerline_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let demo_mode = match std::env::var("LEDGERLINE_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        let company_id = raw
            .app
            .company_id
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok());
        let user_id = raw
            .app
            .user_id
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok());

        Ok(Self {
            demo_mode,
            company_id,
            user_id,
            _raw_settings: raw,
        })
    }

    /// Save config to the ledgerline directory, preserving settings this
    /// view doesn't manage
    pub fn save(&self, ledgerline_dir: &Path) -> Result<()> {
        let settings_path = ledgerline_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.demo_mode = self.demo_mode;
        settings.app.company_id = self.company_id.map(|id| id.to_string());
        settings.app.user_id = self.user_id.map(|id| id.to_string());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}
