use shared::RecordId;

/// Domain failures the IO layer maps onto client errors
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Medication not found: {0}")]
    MedicationNotFound(RecordId),
    #[error("Therapy not found: {0}")]
    TherapyNotFound(RecordId),
    #[error("Professional not found: {0}")]
    ProfessionalNotFound(RecordId),
    #[error("Medication {medication_id} has no dose scheduled at {time}")]
    DoseNotFound { medication_id: RecordId, time: String },
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid month {month} of {year}")]
    InvalidMonth { year: i32, month: u32 },
}

impl TrackerError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TrackerError::MedicationNotFound(_)
                | TrackerError::TherapyNotFound(_)
                | TrackerError::ProfessionalNotFound(_)
                | TrackerError::DoseNotFound { .. }
        )
    }
}

/// Parse an `HH:MM` input field
pub fn parse_time(raw: &str) -> Result<shared::TimeOfDay, TrackerError> {
    raw.parse().map_err(|_| TrackerError::InvalidTime(raw.to_string()))
}

/// Parse a `YYYY-MM-DD` input field
pub fn parse_date(raw: &str) -> Result<chrono::NaiveDate, TrackerError> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::InvalidDate(raw.to_string()))
}
