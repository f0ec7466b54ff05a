//! Configuration management
//!
//! Settings live in a `settings.json` next to the rest of the deployment's
//! state, with an environment override for CI and tests.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Service configuration
///
/// Coin mutations always write through synchronously; `deferred_save` only
/// routes scalar-field saves through the write scheduler instead of the
/// gateway.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    #[serde(default)]
    pub deferred_save: bool,
}

impl ServiceConfig {
    /// Load config from a settings directory.
    ///
    /// Deferred saves can be enabled via:
    /// 1. settings.json
    /// 2. Environment variable ACCOUNTS_DEFERRED_SAVE (for CI/testing)
    pub fn load(dir: &Path) -> Result<Self> {
        let settings_path = dir.join("settings.json");

        let mut config: Self = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            Self::default()
        };

        match std::env::var("ACCOUNTS_DEFERRED_SAVE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => config.deferred_save = true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => config.deferred_save = false,
            _ => {}
        }

        Ok(config)
    }

    /// Save config to a settings directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join("settings.json"), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_to_synchronous_saves() {
        let dir = tempdir().unwrap();
        let config = ServiceConfig::load(dir.path()).unwrap();
        assert!(!config.deferred_save);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let config = ServiceConfig {
            deferred_save: true,
        };
        config.save(dir.path()).unwrap();

        let loaded = ServiceConfig::load(dir.path()).unwrap();
        assert!(loaded.deferred_save);
    }

    #[test]
    fn test_settings_use_camel_case() {
        let config: ServiceConfig = serde_json::from_str(r#"{"deferredSave": true}"#).unwrap();
        assert!(config.deferred_save);
    }
}
