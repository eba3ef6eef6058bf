use chrono::NaiveDate;
use shared::{AgendaDay, DashboardResponse, DisplayLocale};
use std::sync::Arc;
use tracing::debug;

use crate::domain::age::calculate_age;
use crate::domain::agenda::weekly_agenda;
use crate::domain::clock::Clock;
use crate::domain::schedule::next_medication;
use crate::domain::tracker_state::StateController;

/// Builds the home screen summary from one consistent snapshot
#[derive(Clone)]
pub struct DashboardService {
    state: Arc<StateController>,
    clock: Arc<dyn Clock>,
    locale: DisplayLocale,
}

impl DashboardService {
    pub fn new(state: Arc<StateController>, clock: Arc<dyn Clock>, locale: DisplayLocale) -> Self {
        Self { state, clock, locale }
    }

    pub async fn dashboard(&self) -> DashboardResponse {
        let now = self.clock.now();
        let today: NaiveDate = now.date();
        debug!("Building dashboard for {}", now);

        self.state
            .read(|s| {
                let agenda: Vec<AgendaDay> = weekly_agenda(&s.therapies, today, self.locale).collect();

                DashboardResponse {
                    mom_name: s.profile.mom_name.clone(),
                    baby_name: s.profile.baby_name.clone(),
                    baby_photo: s.profile.baby_photo.clone(),
                    age: calculate_age(s.profile.birth_date, today),
                    next_medication: next_medication(&s.medications, now.time()),
                    weekly_agenda: agenda,
                    medication_count: s.medications.len(),
                    therapy_count: s.therapies.len(),
                    professional_count: s.professionals.len(),
                }
            })
            .await
    }
}
