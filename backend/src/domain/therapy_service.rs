use anyhow::Result;
use chrono::NaiveDate;
use shared::{
    generate_record_id, AgendaDay, CalendarLinkResponse, DayTherapiesResponse, DisplayLocale, MonthOverview,
    RecordId, SaveTherapyRequest, Therapy, TherapyListEntry, TherapyListResponse, WeeklyAgendaResponse,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::agenda::{format_long_date, format_short_date, month_overview, therapies_on, weekly_agenda};
use crate::domain::calendar_link::calendar_link;
use crate::domain::clock::Clock;
use crate::domain::error::{parse_date, parse_time, TrackerError};
use crate::domain::tracker_state::StateController;

/// Service for therapy appointments and the agenda views built on them
#[derive(Clone)]
pub struct TherapyService {
    state: Arc<StateController>,
    clock: Arc<dyn Clock>,
    locale: DisplayLocale,
}

impl TherapyService {
    pub fn new(state: Arc<StateController>, clock: Arc<dyn Clock>, locale: DisplayLocale) -> Self {
        Self { state, clock, locale }
    }

    /// All therapies, soonest first, each with its `DD/MM` label
    pub async fn list_therapies(&self) -> TherapyListResponse {
        let mut therapies = self.state.read(|s| s.therapies.clone()).await;
        therapies.sort_by(|a, b| a.date.cmp(&b.date).then(a.time.cmp(&b.time)));

        let therapies = therapies
            .into_iter()
            .map(|therapy| TherapyListEntry {
                display_date: format_short_date(therapy.date),
                therapy,
            })
            .collect();
        TherapyListResponse { therapies }
    }

    pub async fn get_therapy(&self, id: RecordId) -> Option<Therapy> {
        let therapy = self
            .state
            .read(|s| s.therapies.iter().find(|t| t.id == id).cloned())
            .await;

        if therapy.is_none() {
            warn!("Therapy not found: {}", id);
        }
        therapy
    }

    pub async fn create_therapy(&self, request: SaveTherapyRequest) -> Result<Therapy> {
        info!(
            "Creating therapy: specialty={}, date={}, time={}",
            request.specialty, request.date, request.time
        );

        let date = parse_date(&request.date)?;
        let time = parse_time(&request.time)?;
        let now_millis = self.clock.epoch_millis();

        let therapy = self
            .state
            .update(|therapies: &mut Vec<Therapy>| {
                let therapy = Therapy {
                    id: generate_record_id(now_millis, therapies.iter().map(|t| t.id)),
                    specialty: request.specialty.trim().to_string(),
                    professional: request.professional.trim().to_string(),
                    date,
                    time,
                };
                therapies.push(therapy.clone());
                Ok(therapy)
            })
            .await?;

        info!("Created therapy {} with ID: {}", therapy.specialty, therapy.id);
        Ok(therapy)
    }

    pub async fn update_therapy(&self, id: RecordId, request: SaveTherapyRequest) -> Result<Therapy> {
        info!("Updating therapy: {}", id);

        let date = parse_date(&request.date)?;
        let time = parse_time(&request.time)?;

        self.state
            .update(|therapies: &mut Vec<Therapy>| {
                let therapy = therapies
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or(TrackerError::TherapyNotFound(id))?;

                therapy.specialty = request.specialty.trim().to_string();
                therapy.professional = request.professional.trim().to_string();
                therapy.date = date;
                therapy.time = time;
                Ok(therapy.clone())
            })
            .await
    }

    pub async fn delete_therapy(&self, id: RecordId) -> Result<Therapy> {
        info!("Deleting therapy: {}", id);

        self.state
            .update(|therapies: &mut Vec<Therapy>| {
                let index = therapies
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or(TrackerError::TherapyNotFound(id))?;
                Ok(therapies.remove(index))
            })
            .await
    }

    /// Seven-day look-ahead from today
    pub async fn weekly_agenda(&self) -> WeeklyAgendaResponse {
        let today = self.clock.today();
        let days: Vec<AgendaDay> = self
            .state
            .read(|s| weekly_agenda(&s.therapies, today, self.locale).collect())
            .await;

        WeeklyAgendaResponse { start_date: today, days }
    }

    pub async fn therapies_on(&self, raw_date: &str) -> Result<DayTherapiesResponse> {
        let date = parse_date(raw_date)?;
        Ok(self.therapies_on_date(date).await)
    }

    pub async fn therapies_on_date(&self, date: NaiveDate) -> DayTherapiesResponse {
        let therapies = self.state.read(|s| therapies_on(&s.therapies, date)).await;

        DayTherapiesResponse {
            date,
            display_date: format_long_date(date, self.locale),
            therapies,
        }
    }

    pub async fn month_overview(&self, year: i32, month: u32) -> Result<MonthOverview> {
        let overview = self
            .state
            .read(|s| month_overview(&s.therapies, year, month, self.locale))
            .await;

        Ok(overview.ok_or(TrackerError::InvalidMonth { year, month })?)
    }

    pub async fn calendar_link(&self, id: RecordId, title_prefix: &str) -> Result<CalendarLinkResponse> {
        let therapy = self.get_therapy(id).await.ok_or(TrackerError::TherapyNotFound(id))?;
        let url = calendar_link(&therapy, title_prefix)?;

        Ok(CalendarLinkResponse {
            therapy_id: id,
            url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::{DbConnection, RecordStore};

    async fn setup_test() -> (TherapyService, RecordStore) {
        let db = DbConnection::in_memory().await.unwrap();
        let store = RecordStore::new(Arc::new(db));
        let state = Arc::new(StateController::load(store.clone()).await.unwrap());
        let clock = FixedClock::at(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), 10, 0).unwrap();
        (TherapyService::new(state, Arc::new(clock), DisplayLocale::PtBr), store)
    }

    fn request(specialty: &str, date: &str, time: &str) -> SaveTherapyRequest {
        SaveTherapyRequest {
            specialty: specialty.to_string(),
            professional: "Dra. Marta".to_string(),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_sorted() {
        let (service, store) = setup_test().await;

        service.create_therapy(request("Fisioterapia", "2026-10-20", "14:00")).await.unwrap();
        service.create_therapy(request("Fonoaudiologia", "2026-10-18", "09:00")).await.unwrap();
        service.create_therapy(request("Terapia Ocupacional", "2026-10-18", "08:00")).await.unwrap();

        let list = service.list_therapies().await.therapies;
        let specialties: Vec<&str> = list.iter().map(|e| e.therapy.specialty.as_str()).collect();
        assert_eq!(specialties, vec!["Terapia Ocupacional", "Fonoaudiologia", "Fisioterapia"]);
        let labels: Vec<&str> = list.iter().map(|e| e.display_date.as_str()).collect();
        assert_eq!(labels, vec!["18/10", "18/10", "20/10"]);

        let stored: Vec<Therapy> = store.load().await.unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let (service, _store) = setup_test().await;

        let err = service.create_therapy(request("Fisio", "20/10/2026", "14:00")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<TrackerError>(), Some(TrackerError::InvalidDate(_))));

        let err = service.create_therapy(request("Fisio", "2026-10-20", "2pm")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<TrackerError>(), Some(TrackerError::InvalidTime(_))));

        assert!(service.list_therapies().await.therapies.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (service, _store) = setup_test().await;
        let created = service.create_therapy(request("Fisioterapia", "2026-10-20", "14:00")).await.unwrap();

        let updated = service
            .update_therapy(created.id, request("Fisioterapia", "2026-10-21", "15:30"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());
        assert_eq!(updated.time.to_string(), "15:30");

        service.delete_therapy(created.id).await.unwrap();
        assert!(service.get_therapy(created.id).await.is_none());

        let err = service.delete_therapy(created.id).await.unwrap_err();
        assert!(err.downcast_ref::<TrackerError>().map_or(false, |e| e.is_not_found()));
    }

    #[tokio::test]
    async fn test_weekly_agenda_from_clock() {
        let (service, _store) = setup_test().await;
        service.create_therapy(request("Fisioterapia", "2026-10-16", "14:00")).await.unwrap();
        service.create_therapy(request("Fonoaudiologia", "2026-10-22", "09:00")).await.unwrap();
        service.create_therapy(request("Hidroterapia", "2026-10-23", "09:00")).await.unwrap();

        let agenda = service.weekly_agenda().await;
        assert_eq!(agenda.start_date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        let labels: Vec<&str> = agenda.days.iter().map(|d| d.display_date.as_str()).collect();
        assert_eq!(labels, vec!["sex., 16/10", "qui., 22/10"]);
    }

    #[tokio::test]
    async fn test_therapies_on_day() {
        let (service, _store) = setup_test().await;
        service.create_therapy(request("Fisioterapia", "2026-10-20", "14:00")).await.unwrap();
        service.create_therapy(request("Fonoaudiologia", "2026-10-20", "09:00")).await.unwrap();

        let day = service.therapies_on("2026-10-20").await.unwrap();
        assert_eq!(day.display_date, "20 de outubro de 2026");
        assert_eq!(day.therapies[0].specialty, "Fonoaudiologia");
        assert_eq!(day.therapies.len(), 2);

        assert!(service.therapies_on("2026-10-21").await.unwrap().therapies.is_empty());
        assert!(service.therapies_on("tomorrow").await.is_err());
    }

    #[tokio::test]
    async fn test_month_overview_validates_month() {
        let (service, _store) = setup_test().await;
        service.create_therapy(request("Fisioterapia", "2026-10-20", "14:00")).await.unwrap();

        let overview = service.month_overview(2026, 10).await.unwrap();
        assert_eq!(overview.therapy_days.len(), 1);

        let err = service.month_overview(2026, 0).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrackerError>(),
            Some(TrackerError::InvalidMonth { year: 2026, month: 0 })
        ));
    }

    #[tokio::test]
    async fn test_calendar_link() {
        let (service, _store) = setup_test().await;
        let created = service.create_therapy(request("Fisioterapia", "2026-10-20", "14:00")).await.unwrap();

        let link = service.calendar_link(created.id, "Terapia").await.unwrap();
        assert_eq!(link.therapy_id, created.id);
        assert!(link.url.starts_with("https://www.google.com/calendar/render?action=TEMPLATE"));
        assert!(link.url.contains("20261020T140000%2F20261020T150000"));

        assert!(service.calendar_link(created.id + 1, "Terapia").await.is_err());
    }
}
