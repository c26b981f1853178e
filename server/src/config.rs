//! # Application Configuration
//!
//! Loaded from an optional YAML file; every section and field has a default,
//! so an empty file (or no file at all) runs the standard challenge.
//!
//! ## YAML Format
//!
//! ```yaml
//! server:
//!   bind_address: "127.0.0.1:3000"
//!   cors_origin: "http://localhost:8080"
//!   static_dir: "./ui/dist"
//! data_directory: "/var/lib/steps-challenge"
//! challenge:
//!   target_steps: 10000
//!   penalty_amount: 50
//!   currency_symbol: "₱"
//!   roster: ["Del", "Giem", "Glaiz"]
//! reminder:
//!   enabled: true
//!   hour: 20
//!   minute: 0
//! ```

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::domain::models::challenge::ChallengeRules;
use crate::backend::domain::reminder_service::ReminderSchedule;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DATA_DIRECTORY_NAME: &str = "Steps Challenge";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Allowed CORS origin; any origin when unset
    pub cors_origin: Option<String>,
    /// Prebuilt UI bundle served for every non-API path
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            cors_origin: None,
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// Where `submissions.json` lives; see [`AppConfig::data_directory`]
    pub data_directory: Option<PathBuf>,
    pub challenge: ChallengeRules,
    pub reminder: ReminderSchedule,
}

impl AppConfig {
    /// Load the config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let yaml_content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                let config: AppConfig = Self::from_yaml(&yaml_content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => {
                info!("No config file given, using defaults");
                AppConfig::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        if yaml_content.trim().is_empty() {
            return Ok(AppConfig::default());
        }
        serde_yaml::from_str(yaml_content).context("Failed to parse YAML configuration")
    }

    /// Apply command line overrides on top of the file values.
    pub fn apply_overrides(&mut self, bind_address: Option<String>, data_directory: Option<PathBuf>) {
        if let Some(bind_address) = bind_address {
            self.server.bind_address = bind_address;
        }
        if let Some(data_directory) = data_directory {
            self.data_directory = Some(data_directory);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.challenge
            .validate()
            .context("Invalid challenge configuration")?;
        self.reminder
            .validate()
            .context("Invalid reminder configuration")?;
        Ok(())
    }

    /// The configured data directory, else `<platform data dir>/Steps Challenge`,
    /// else `./data`.
    pub fn data_directory(&self) -> PathBuf {
        if let Some(dir) = &self.data_directory {
            return dir.clone();
        }
        match dirs::data_dir() {
            Some(dir) => dir.join(DATA_DIRECTORY_NAME),
            None => {
                warn!("Could not determine the platform data directory, using ./data");
                PathBuf::from("data")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_yaml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
        assert_eq!(config.challenge.target_steps, 10_000);
        assert_eq!(config.challenge.penalty_amount, 50);
        assert_eq!(config.challenge.roster.len(), 16);
        assert_eq!(config.reminder.hour, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
server:
  bind_address: "0.0.0.0:8080"
challenge:
  penalty_amount: 25
  roster: ["Amy", "Ben"]
reminder:
  minute: 30
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.server.cors_origin, None);
        assert_eq!(config.challenge.penalty_amount, 25);
        assert_eq!(config.challenge.target_steps, 10_000);
        assert_eq!(config.challenge.roster, vec!["Amy".to_string(), "Ben".to_string()]);
        assert_eq!(config.reminder.hour, 20);
        assert_eq!(config.reminder.minute, 30);
        assert!(config.reminder.enabled);
    }

    #[test]
    fn test_load_from_file_and_validate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        fs::write(&path, "challenge:\n  roster: [\"Amy\", \"Amy\"]\n").unwrap();
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("more than once"));

        fs::write(&path, "reminder:\n  hour: 25\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());

        fs::write(&path, "data_directory: /tmp/steps\n").unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.data_directory(), PathBuf::from("/tmp/steps"));

        assert!(AppConfig::load(Some(&temp_dir.path().join("missing.yaml"))).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("0.0.0.0:9000".to_string()), None);
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.data_directory, None);

        config.apply_overrides(None, Some(PathBuf::from("/srv/steps")));
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.data_directory(), PathBuf::from("/srv/steps"));
    }
}
