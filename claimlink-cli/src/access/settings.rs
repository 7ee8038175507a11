// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use super::data_dir::get_client_data_dir_path;
use claimlink::{client::DEFAULT_PRODUCT_HOST, ClientConfig, MistTokens};
use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Overrides the product host of the stored settings for a single run.
pub const CLAIMLINK_PRODUCT_HOST_ENV: &str = "CLAIMLINK_PRODUCT_HOST";

const SETTINGS_FILE_NAME: &str = "settings.json";

/// User preferences kept between runs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub product_host: String,
    pub default_amount: MistTokens,
    pub balance_decimals: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let config = ClientConfig::default();
        Self {
            product_host: config.product_host,
            default_amount: config.default_amount,
            balance_decimals: config.balance_decimals,
        }
    }
}

impl Settings {
    pub fn load(custom_path: Option<&Path>) -> Result<Self> {
        let settings_path = settings_path(custom_path)?;
        if !settings_path.exists() {
            debug!("No settings at {settings_path:?}, using defaults");
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(&settings_path).map_err(|e| {
            error!("Failed to read settings file: {e}");
            eyre!("Failed to read settings file: {e}")
        })?;

        let settings: Settings = serde_json::from_str(&data).map_err(|e| {
            error!("Failed to parse settings: {e}");
            eyre!("Failed to parse settings: {e}")
        })?;

        Ok(settings)
    }

    pub fn save(&self, custom_path: Option<&Path>) -> Result<PathBuf> {
        let settings_path = settings_path(custom_path)?;
        let serialized = serde_json::to_string_pretty(&self)?;
        std::fs::write(&settings_path, serialized)?;
        info!("Saved settings to {settings_path:?}");
        Ok(settings_path)
    }

    /// Client configuration from these settings, with the product host taken from
    /// `host_override` when it is set and not blank.
    pub fn client_config(&self, host_override: Option<String>) -> ClientConfig {
        let product_host = match host_override {
            Some(host) if !host.trim().is_empty() => {
                info!("Using product host {host:?} from {CLAIMLINK_PRODUCT_HOST_ENV}");
                host.trim().to_string()
            }
            _ if self.product_host.trim().is_empty() => DEFAULT_PRODUCT_HOST.to_string(),
            _ => self.product_host.clone(),
        };

        ClientConfig {
            product_host,
            default_amount: self.default_amount,
            balance_decimals: self.balance_decimals,
            ..ClientConfig::default()
        }
    }
}

/// Client configuration for this run: stored settings plus the environment override.
pub fn load_client_config() -> Result<(Settings, ClientConfig)> {
    let settings = Settings::load(None)?;
    let config = settings.client_config(std::env::var(CLAIMLINK_PRODUCT_HOST_ENV).ok());
    Ok((settings, config))
}

fn settings_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    match custom_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(get_client_data_dir_path()?.join(SETTINGS_FILE_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::Result;

    #[test]
    fn missing_file_gives_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let settings = Settings::load(Some(&dir.path().join("absent.json")))?;
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.product_host, "getstashed.com");
        assert_eq!(settings.default_amount, MistTokens::from_mist(100_000_000));
        assert_eq!(settings.balance_decimals, 5);
        Ok(())
    }

    #[test]
    fn saved_settings_are_loaded_back() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let settings = Settings {
            product_host: "links.example.org".to_string(),
            default_amount: MistTokens::from_mist(42),
            balance_decimals: 2,
        };
        let _ = settings.save(Some(&path))?;
        assert_eq!(Settings::load(Some(&path))?, settings);
        Ok(())
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, r#"{ "balance_decimals": 3 }"#)?;

        let settings = Settings::load(Some(&path))?;
        assert_eq!(settings.balance_decimals, 3);
        assert_eq!(settings.product_host, "getstashed.com");
        Ok(())
    }

    #[test]
    fn host_override_wins_unless_blank() {
        let settings = Settings {
            product_host: "stored.example".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings
                .client_config(Some("env.example".to_string()))
                .product_host,
            "env.example"
        );
        assert_eq!(
            settings.client_config(Some("  ".to_string())).product_host,
            "stored.example"
        );
        let config = settings.client_config(None);
        assert_eq!(config.product_host, "stored.example");
        assert_eq!(config.sdk_host, "zksend.com");
    }
}
