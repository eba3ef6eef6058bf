//! Domain logic for the care tracker.
//!
//! The pure calculations (age, next dose, agenda, calendar links) live in
//! their own modules and take "now" as an argument. The services wrap them
//! around the shared [`StateController`] and a [`Clock`], and are what the
//! REST layer calls.

pub mod age;
pub mod agenda;
pub mod calendar_link;
pub mod clock;
pub mod dashboard_service;
pub mod error;
pub mod medication_service;
pub mod professional_service;
pub mod profile_service;
pub mod schedule;
pub mod therapy_service;
pub mod tracker_state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard_service::DashboardService;
pub use error::TrackerError;
pub use medication_service::MedicationService;
pub use professional_service::ProfessionalService;
pub use profile_service::ProfileService;
pub use therapy_service::TherapyService;
pub use tracker_state::{StateController, TrackerState};
