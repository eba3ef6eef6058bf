//! Typed access to the four persisted records.
//!
//! Each record is one JSON blob under a fixed key. Records are read once at
//! startup (falling back to a default when absent) and the whole blob is
//! rewritten after every mutation.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Medication, Professional, Therapy, UserProfile};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::traits::RecordStorage;

/// The keys records are stored under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    UserProfile,
    Medications,
    Therapies,
    Professionals,
}

impl RecordKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::UserProfile => "stripo_userData",
            RecordKey::Medications => "stripo_medications",
            RecordKey::Therapies => "stripo_therapies",
            RecordKey::Professionals => "stripo_professionals",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value that is persisted as a whole under its own key
pub trait Record: Serialize + DeserializeOwned + Default + Send + Sync {
    const KEY: RecordKey;
}

impl Record for UserProfile {
    const KEY: RecordKey = RecordKey::UserProfile;
}

impl Record for Vec<Medication> {
    const KEY: RecordKey = RecordKey::Medications;
}

impl Record for Vec<Therapy> {
    const KEY: RecordKey = RecordKey::Therapies;
}

impl Record for Vec<Professional> {
    const KEY: RecordKey = RecordKey::Professionals;
}

/// Serializes records to JSON on top of any [`RecordStorage`]
#[derive(Clone)]
pub struct RecordStore {
    storage: Arc<dyn RecordStorage>,
}

impl RecordStore {
    pub fn new(storage: Arc<dyn RecordStorage>) -> Self {
        Self { storage }
    }

    /// Load a record, substituting the default when it was never stored
    pub async fn load<T: Record>(&self) -> Result<T> {
        match self.storage.get_value(T::KEY.as_str()).await? {
            Some(json) => {
                let value = serde_json::from_str(&json)
                    .with_context(|| format!("Stored record '{}' is not valid", T::KEY))?;
                debug!("Loaded record '{}'", T::KEY);
                Ok(value)
            }
            None => {
                info!("No stored record '{}', using default", T::KEY);
                Ok(T::default())
            }
        }
    }

    /// Serialize and store the full record
    pub async fn save<T: Record>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize record '{}'", T::KEY))?;
        self.storage
            .put_value(T::KEY.as_str(), &json)
            .await
            .with_context(|| format!("Failed to store record '{}'", T::KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DbConnection, JsonFileConnection};
    use chrono::NaiveDate;
    use shared::{ScheduleSlot, TimeOfDay};
    use tempfile::TempDir;

    fn sample_medications() -> Vec<Medication> {
        vec![Medication {
            id: 1_760_000_000_000,
            name: "Vitamina D".to_string(),
            dose: "2 gotas".to_string(),
            schedule: vec![
                ScheduleSlot { time: TimeOfDay::new(8, 0).unwrap(), taken: true },
                ScheduleSlot { time: TimeOfDay::new(20, 30).unwrap(), taken: false },
            ],
        }]
    }

    fn sample_therapies() -> Vec<Therapy> {
        vec![Therapy {
            id: 1_760_000_000_001,
            specialty: "Fisioterapia".to_string(),
            professional: "Dra. Marta".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            time: TimeOfDay::new(9, 30).unwrap(),
        }]
    }

    fn sample_professionals() -> Vec<Professional> {
        vec![Professional {
            id: 1_760_000_000_002,
            name: "Dra. Marta".to_string(),
            specialty: "Fisioterapia".to_string(),
            phone: "+55 11 99999-0000".to_string(),
        }]
    }

    fn sample_profile() -> UserProfile {
        UserProfile {
            mom_name: "Ana".to_string(),
            baby_name: "Leo".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            ..UserProfile::default()
        }
    }

    async fn assert_round_trip(store: &RecordStore) {
        store.save(&sample_profile()).await.unwrap();
        store.save(&sample_medications()).await.unwrap();
        store.save(&sample_therapies()).await.unwrap();
        store.save(&sample_professionals()).await.unwrap();

        assert_eq!(store.load::<UserProfile>().await.unwrap(), sample_profile());
        assert_eq!(store.load::<Vec<Medication>>().await.unwrap(), sample_medications());
        assert_eq!(store.load::<Vec<Therapy>>().await.unwrap(), sample_therapies());
        assert_eq!(store.load::<Vec<Professional>>().await.unwrap(), sample_professionals());
    }

    #[tokio::test]
    async fn test_round_trip_sqlite() {
        let db = DbConnection::in_memory().await.unwrap();
        let store = RecordStore::new(Arc::new(db));
        assert_round_trip(&store).await;
    }

    #[tokio::test]
    async fn test_round_trip_json_files() {
        let temp_dir = TempDir::new().unwrap();
        let files = JsonFileConnection::new(temp_dir.path()).unwrap();
        let store = RecordStore::new(Arc::new(files));
        assert_round_trip(&store).await;
    }

    #[tokio::test]
    async fn test_missing_records_use_defaults() {
        let db = DbConnection::in_memory().await.unwrap();
        let store = RecordStore::new(Arc::new(db));

        assert_eq!(store.load::<UserProfile>().await.unwrap(), UserProfile::default());
        assert!(store.load::<Vec<Medication>>().await.unwrap().is_empty());
        assert!(store.load::<Vec<Therapy>>().await.unwrap().is_empty());
        assert!(store.load::<Vec<Professional>>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_blobs_written_by_the_web_app() {
        let db = DbConnection::in_memory().await.unwrap();
        db.put_value(
            "stripo_therapies",
            r#"[{"id":1718000000000,"specialty":"Fono","professional":"","date":"2026-10-16","time":"14:00"}]"#,
        )
        .await
        .unwrap();

        let store = RecordStore::new(Arc::new(db));
        let therapies: Vec<Therapy> = store.load().await.unwrap();
        assert_eq!(therapies.len(), 1);
        assert_eq!(therapies[0].time.to_string(), "14:00");
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error() {
        let db = DbConnection::in_memory().await.unwrap();
        db.put_value("stripo_medications", "not json").await.unwrap();

        let store = RecordStore::new(Arc::new(db));
        let err = store.load::<Vec<Medication>>().await.unwrap_err();
        assert!(err.to_string().contains("stripo_medications"));
    }

    #[test]
    fn test_record_keys() {
        let keys: Vec<&str> = [
            RecordKey::UserProfile,
            RecordKey::Medications,
            RecordKey::Therapies,
            RecordKey::Professionals,
        ]
        .iter()
        .map(|k| k.as_str())
        .collect();
        assert_eq!(
            keys,
            vec!["stripo_userData", "stripo_medications", "stripo_therapies", "stripo_professionals"]
        );
    }
}
