//! # Application configuration
//!
//! A single `config.yaml` at the root of the data directory, created with
//! defaults on first start:
//!
//! ```yaml
//! storage_backend: sqlite
//! bind_address: 127.0.0.1:3000
//! display_locale: pt-BR
//! calendar_title_prefix: Terapia
//! allowed_origin: http://localhost:8080
//! ```
//!
//! The data directory comes from `STRIPO_DATA_DIR`, falling back to the
//! platform data directory and finally to `./stripo-data`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared::DisplayLocale;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_FILE: &str = "config.yaml";
pub const DATA_DIR_ENV: &str = "STRIPO_DATA_DIR";
const APP_DIR_NAME: &str = "Stripo";
const FALLBACK_DATA_DIR: &str = "stripo-data";

/// Where the four records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One sqlite database, one row per record
    #[default]
    Sqlite,
    /// One JSON file per record
    JsonFiles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub bind_address: String,
    pub display_locale: DisplayLocale,
    /// Prefix of exported calendar event titles
    pub calendar_title_prefix: String,
    /// Frontend origin allowed by CORS
    pub allowed_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Sqlite,
            bind_address: "127.0.0.1:3000".to_string(),
            display_locale: DisplayLocale::PtBr,
            calendar_title_prefix: "Terapia".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `config.yaml` from `data_dir`, writing the defaults if it is missing
    pub fn load_or_create(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {:?}", config_path))?;
            let config: AppConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Invalid configuration in {:?}", config_path))?;
            debug!("Loaded config from {:?}", config_path);
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save(data_dir)?;
            info!("Created default config at {:?}", config_path);
            Ok(config)
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)
                .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;
            info!("Created data directory: {:?}", data_dir);
        }

        let config_path = data_dir.join(CONFIG_FILE);
        let yaml_content = serde_yaml::to_string(self)?;

        // Write to a temp file, then rename over the real one
        let temp_path = config_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;

        debug!("Saved config to {:?}", config_path);
        Ok(())
    }
}

/// Resolve the data directory from an explicit override or the platform default
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> PathBuf {
    override_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

/// The data directory for this process, honouring `STRIPO_DATA_DIR`
pub fn data_dir_from_env() -> PathBuf {
    resolve_data_dir(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}
