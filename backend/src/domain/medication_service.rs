use anyhow::Result;
use shared::{
    generate_record_id, Medication, MedicationListResponse, NextMedicationResponse, RecordId,
    SaveMedicationRequest, ScheduleSlot, TimeOfDay, ToggleDoseRequest,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::clock::Clock;
use crate::domain::error::{parse_time, TrackerError};
use crate::domain::schedule::next_medication;
use crate::domain::tracker_state::StateController;

/// Service for the medication list and dose tracking
#[derive(Clone)]
pub struct MedicationService {
    state: Arc<StateController>,
    clock: Arc<dyn Clock>,
}

impl MedicationService {
    pub fn new(state: Arc<StateController>, clock: Arc<dyn Clock>) -> Self {
        Self { state, clock }
    }

    pub async fn list_medications(&self) -> MedicationListResponse {
        let medications = self.state.read(|s| s.medications.clone()).await;
        MedicationListResponse { medications }
    }

    pub async fn get_medication(&self, id: RecordId) -> Option<Medication> {
        let medication = self
            .state
            .read(|s| s.medications.iter().find(|m| m.id == id).cloned())
            .await;

        if medication.is_none() {
            warn!("Medication not found: {}", id);
        }
        medication
    }

    pub async fn create_medication(&self, request: SaveMedicationRequest) -> Result<Medication> {
        info!("Creating medication: name={}, times={:?}", request.name, request.times);

        let schedule = build_schedule(&request.times)?;
        let now_millis = self.clock.epoch_millis();

        let medication = self
            .state
            .update(|medications: &mut Vec<Medication>| {
                let medication = Medication {
                    id: generate_record_id(now_millis, medications.iter().map(|m| m.id)),
                    name: request.name.trim().to_string(),
                    dose: request.dose.trim().to_string(),
                    schedule,
                };
                medications.push(medication.clone());
                Ok(medication)
            })
            .await?;

        info!("Created medication {} with ID: {}", medication.name, medication.id);
        Ok(medication)
    }

    /// Replace a medication. The new schedule starts with nothing taken.
    pub async fn update_medication(&self, id: RecordId, request: SaveMedicationRequest) -> Result<Medication> {
        info!("Updating medication: {}", id);

        let schedule = build_schedule(&request.times)?;

        self.state
            .update(|medications: &mut Vec<Medication>| {
                let medication = medications
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or(TrackerError::MedicationNotFound(id))?;

                medication.name = request.name.trim().to_string();
                medication.dose = request.dose.trim().to_string();
                medication.schedule = schedule;
                Ok(medication.clone())
            })
            .await
    }

    pub async fn delete_medication(&self, id: RecordId) -> Result<Medication> {
        info!("Deleting medication: {}", id);

        self.state
            .update(|medications: &mut Vec<Medication>| {
                let index = medications
                    .iter()
                    .position(|m| m.id == id)
                    .ok_or(TrackerError::MedicationNotFound(id))?;
                Ok(medications.remove(index))
            })
            .await
    }

    /// Flip the taken flag of the dose scheduled at `request.time`
    pub async fn toggle_dose(&self, id: RecordId, request: ToggleDoseRequest) -> Result<Medication> {
        let time = parse_time(&request.time)?;
        info!("Toggling dose {} of medication {}", time, id);

        self.state
            .update(|medications: &mut Vec<Medication>| {
                let medication = medications
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or(TrackerError::MedicationNotFound(id))?;

                // Older stored schedules may repeat a time; every copy flips
                let mut toggled = 0;
                for slot in medication.schedule.iter_mut().filter(|slot| slot.time == time) {
                    slot.taken = !slot.taken;
                    toggled += 1;
                }

                if toggled == 0 {
                    return Err(TrackerError::DoseNotFound { medication_id: id, time: time.to_string() }.into());
                }

                info!("Toggled {} dose(s) at {} of {}", toggled, time, medication.name);
                Ok(medication.clone())
            })
            .await
    }

    /// The next dose to give, computed for the current time of day
    pub async fn next_medication(&self) -> NextMedicationResponse {
        let now = self.clock.time_of_day();
        let next = self.state.read(|s| next_medication(&s.medications, now)).await;

        NextMedicationResponse {
            next_medication: next,
            computed_at: TimeOfDay::from_naive_time(now),
        }
    }
}

/// Parse, dedupe and sort the requested dose times
fn build_schedule(times: &[String]) -> Result<Vec<ScheduleSlot>, TrackerError> {
    let mut parsed = times.iter().map(|t| parse_time(t)).collect::<Result<Vec<_>, _>>()?;
    parsed.sort();
    parsed.dedup();

    Ok(parsed.into_iter().map(|time| ScheduleSlot { time, taken: false }).collect())
}
