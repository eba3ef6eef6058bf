//! # JSON File Record Storage
//!
//! Keeps every record in its own file at the root of the data directory,
//! mirroring the browser's local storage layout:
//!
//! ```text
//! data/
//! ├── config.yaml
//! ├── stripo_userData.json
//! ├── stripo_medications.json
//! ├── stripo_therapies.json
//! └── stripo_professionals.json
//! ```
//!
//! Writes go to a temp file first and are then renamed over the target.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::traits::RecordStorage;

const RECORD_EXTENSION: &str = "json";

#[derive(Clone)]
pub struct JsonFileConnection {
    base_directory: PathBuf,
}

impl JsonFileConnection {
    /// Create a new connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {:?}", base_path))?;
            info!("Created data directory: {:?}", base_path);
        }

        Ok(Self { base_directory: base_path })
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(&['/', '\\'][..]) || key.starts_with('.') {
            return Err(anyhow::anyhow!("Invalid record key: '{}'", key));
        }
        Ok(self.base_directory.join(format!("{}.{}", key, RECORD_EXTENSION)))
    }
}

#[async_trait]
impl RecordStorage for JsonFileConnection {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;

        if !path.exists() {
            debug!("No record file for '{}'", key);
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read record file {:?}", path))?;
        debug!("Loaded record '{}' from {:?}", key, path);
        Ok(Some(content))
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to move {:?} into place", temp_path))?;

        debug!("Saved record '{}' to {:?}", key, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test() -> (JsonFileConnection, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonFileConnection::new(temp_dir.path()).expect("Failed to create connection");
        (connection, temp_dir)
    }

    #[tokio::test]
    async fn test_put_and_get_value() {
        let (store, temp_dir) = setup_test();

        store.put_value("stripo_userData", r#"{"momName":"Ana"}"#).await.unwrap();

        assert!(temp_dir.path().join("stripo_userData.json").exists());
        assert!(!temp_dir.path().join("stripo_userData.tmp").exists());

        let value = store.get_value("stripo_userData").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"momName":"Ana"}"#));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let (store, _temp_dir) = setup_test();
        assert!(store.get_value("stripo_therapies").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_file() {
        let (store, temp_dir) = setup_test();

        store.put_value("stripo_professionals", "[1]").await.unwrap();
        store.put_value("stripo_professionals", "[]").await.unwrap();

        let on_disk = fs::read_to_string(temp_dir.path().join("stripo_professionals.json")).unwrap();
        assert_eq!(on_disk, "[]");
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let (store, _temp_dir) = setup_test();
        assert!(store.put_value("../escape", "x").await.is_err());
        assert!(store.get_value("").await.is_err());
    }
}
