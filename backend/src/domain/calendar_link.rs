//! "Add to Google Calendar" links for therapy appointments.

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use shared::Therapy;
use url::Url;

const GOOGLE_CALENDAR_RENDER_URL: &str = "https://www.google.com/calendar/render";

/// Appointments are exported with a fixed length
pub const APPOINTMENT_LENGTH_MINUTES: i64 = 60;

const CALENDAR_DATE_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Build the event template URL for a therapy.
///
/// The end time is the start plus one hour on the full date-time, so
/// appointments late in the evening end on the following day.
pub fn calendar_link(therapy: &Therapy, title_prefix: &str) -> Result<Url> {
    let start: NaiveDateTime = therapy.date.and_time(therapy.time.as_naive_time());
    let end = start + Duration::minutes(APPOINTMENT_LENGTH_MINUTES);

    let title = format!("{}: {}", title_prefix, therapy.specialty);
    let dates = format!(
        "{}/{}",
        start.format(CALENDAR_DATE_FORMAT),
        end.format(CALENDAR_DATE_FORMAT)
    );

    let url = Url::parse_with_params(
        GOOGLE_CALENDAR_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", title.as_str()),
            ("details", therapy.professional.as_str()),
            ("dates", dates.as_str()),
            ("sf", "true"),
            ("output", "xml"),
        ],
    )?;

    Ok(url)
}
