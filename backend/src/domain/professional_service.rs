use anyhow::Result;
use shared::{generate_record_id, CreateProfessionalRequest, Professional, ProfessionalListResponse, RecordId};
use std::sync::Arc;
use tracing::info;

use crate::domain::clock::Clock;
use crate::domain::error::TrackerError;
use crate::domain::tracker_state::StateController;

/// Contact list of the baby's care team. Entries are added and removed,
/// never edited.
#[derive(Clone)]
pub struct ProfessionalService {
    state: Arc<StateController>,
    clock: Arc<dyn Clock>,
}

impl ProfessionalService {
    pub fn new(state: Arc<StateController>, clock: Arc<dyn Clock>) -> Self {
        Self { state, clock }
    }

    pub async fn list_professionals(&self) -> ProfessionalListResponse {
        let professionals = self.state.read(|s| s.professionals.clone()).await;
        ProfessionalListResponse { professionals }
    }

    pub async fn get_professional(&self, id: RecordId) -> Option<Professional> {
        self.state
            .read(|s| s.professionals.iter().find(|p| p.id == id).cloned())
            .await
    }

    pub async fn create_professional(&self, request: CreateProfessionalRequest) -> Result<Professional> {
        info!("Creating professional: {}", request.name);
        let now_millis = self.clock.epoch_millis();

        self.state
            .update(|professionals: &mut Vec<Professional>| {
                let professional = Professional {
                    id: generate_record_id(now_millis, professionals.iter().map(|p| p.id)),
                    name: request.name.trim().to_string(),
                    specialty: request.specialty.trim().to_string(),
                    phone: request.phone.trim().to_string(),
                };
                professionals.push(professional.clone());
                Ok(professional)
            })
            .await
    }

    pub async fn delete_professional(&self, id: RecordId) -> Result<Professional> {
        info!("Deleting professional: {}", id);

        self.state
            .update(|professionals: &mut Vec<Professional>| {
                let index = professionals
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or(TrackerError::ProfessionalNotFound(id))?;
                Ok(professionals.remove(index))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::{DbConnection, RecordStore};
    use chrono::NaiveDate;

    async fn setup_test() -> (ProfessionalService, RecordStore) {
        let db = DbConnection::in_memory().await.unwrap();
        let store = RecordStore::new(Arc::new(db));
        let state = Arc::new(StateController::load(store.clone()).await.unwrap());
        let clock = FixedClock::at(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), 9, 0).unwrap();
        (ProfessionalService::new(state, Arc::new(clock)), store)
    }

    fn request(name: &str) -> CreateProfessionalRequest {
        CreateProfessionalRequest {
            name: name.to_string(),
            specialty: "Pediatria".to_string(),
            phone: "(11) 99999-0000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_keeps_insertion_order() {
        let (service, store) = setup_test().await;

        let first = service.create_professional(request("Dr. Paulo")).await.unwrap();
        let second = service.create_professional(request("Dra. Ana")).await.unwrap();
        assert_ne!(first.id, second.id);

        let names: Vec<String> = service
            .list_professionals()
            .await
            .professionals
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Dr. Paulo", "Dra. Ana"]);

        let stored: Vec<Professional> = store.load().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(service.get_professional(first.id).await, Some(first));
    }

    #[tokio::test]
    async fn test_delete_professional() {
        let (service, _store) = setup_test().await;
        let created = service.create_professional(request("Dr. Paulo")).await.unwrap();

        service.delete_professional(created.id).await.unwrap();
        assert!(service.list_professionals().await.professionals.is_empty());

        let err = service.delete_professional(created.id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrackerError>(),
            Some(TrackerError::ProfessionalNotFound(_))
        ));
    }
}
