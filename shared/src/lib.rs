use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Record identifier: epoch millis at creation, bumped when needed so that
/// ids stay unique and strictly increasing within a collection.
pub type RecordId = u64;

/// Wall-clock time of day with minute precision, serialized as `"HH:MM"`.
///
/// Ordering matches the lexicographic order of the zero-padded string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    /// Truncates seconds away
    pub fn from_naive_time(time: NaiveTime) -> Self {
        TimeOfDay(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight (0..1440)
    pub fn minutes_since_midnight(&self) -> i32 {
        (self.0.hour() * 60 + self.0.minute()) as i32
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    /// Accepts `HH:MM` and, for robustness, `HH:MM:SS` (seconds dropped)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map_err(|_| TimeOfDayError(s.to_string()))?;
        Ok(TimeOfDay::from_naive_time(parsed))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfDayError(pub String);

impl fmt::Display for TimeOfDayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid time of day '{}', expected HH:MM", self.0)
    }
}

impl std::error::Error for TimeOfDayError {}

/// Optional calendar date stored as `"YYYY-MM-DD"`, or `""` when absent.
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// One scheduled dose of a medication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub time: TimeOfDay,
    /// Set by the caregiver, never reset automatically
    pub taken: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: RecordId,
    pub name: String,
    /// Free-text dose description, e.g. "5 ml"
    pub dose: String,
    /// Sorted by time, no duplicate times
    pub schedule: Vec<ScheduleSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Therapy {
    pub id: RecordId,
    pub specialty: String,
    /// Free text; not linked to the professionals list
    pub professional: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub id: RecordId,
    pub name: String,
    pub specialty: String,
    pub phone: String,
}

pub const DEFAULT_MOM_PHOTO: &str = "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=200";
pub const DEFAULT_BABY_PHOTO: &str = "https://images.unsplash.com/photo-1519689680058-324335c77eba?w=400";

/// Caregiver and baby profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub mom_name: String,
    #[serde(default)]
    pub baby_name: String,
    #[serde(default, with = "optional_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub mom_photo: String,
    #[serde(default)]
    pub baby_photo: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            mom_name: String::new(),
            baby_name: String::new(),
            birth_date: None,
            mom_photo: DEFAULT_MOM_PHOTO.to_string(),
            baby_photo: DEFAULT_BABY_PHOTO.to_string(),
        }
    }
}

/// Generate the id for a new record.
///
/// Uses the creation timestamp unless it would not be greater than the
/// highest existing id.
pub fn generate_record_id(epoch_millis: u64, existing: impl IntoIterator<Item = RecordId>) -> RecordId {
    match existing.into_iter().max() {
        Some(last) if last >= epoch_millis => last + 1,
        _ => epoch_millis,
    }
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// Elapsed age, always non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgeResult {
    pub months: u32,
    pub weeks: u32,
}

/// The next dose to give. Stale as soon as the clock moves past `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMedication {
    pub medication_id: RecordId,
    pub name: String,
    pub dose: String,
    pub time: TimeOfDay,
    /// Minutes from now until the dose; negative when overdue
    pub minutes_until: i32,
}

/// Therapies falling on one date of the weekly agenda
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub display_date: String,
    pub events: Vec<Therapy>,
}

/// Locale used for human readable date labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayLocale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

/// Therapy count for one day of a month view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthDayCount {
    pub day: u32,
    pub count: usize,
}

/// Month grid data for the agenda calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub days_in_month: u32,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u32,
    /// Only days with at least one therapy, ascending
    pub therapy_days: Vec<MonthDayCount>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMedicationRequest {
    pub name: String,
    pub dose: String,
    /// Times as `HH:MM`; duplicates are dropped and the result sorted
    pub times: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleDoseRequest {
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTherapyRequest {
    pub specialty: String,
    #[serde(default)]
    pub professional: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProfessionalRequest {
    pub name: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub mom_name: String,
    #[serde(default)]
    pub baby_name: String,
    /// `YYYY-MM-DD`, empty or missing to clear
    #[serde(default)]
    pub birth_date: Option<String>,
    pub mom_photo: Option<String>,
    pub baby_photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthOverviewRequest {
    pub year: i32,
    pub month: u32,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationListResponse {
    pub medications: Vec<Medication>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMedicationResponse {
    pub next_medication: Option<NextMedication>,
    /// Time of day the answer was computed for
    pub computed_at: TimeOfDay,
}

/// A therapy as shown in the therapy list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapyListEntry {
    #[serde(flatten)]
    pub therapy: Therapy,
    /// `DD/MM`
    pub display_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapyListResponse {
    pub therapies: Vec<TherapyListEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAgendaResponse {
    pub start_date: NaiveDate,
    pub days: Vec<AgendaDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTherapiesResponse {
    pub date: NaiveDate,
    pub display_date: String,
    pub therapies: Vec<Therapy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarLinkResponse {
    pub therapy_id: RecordId,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalListResponse {
    pub professionals: Vec<Professional>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeResponse {
    #[serde(with = "optional_date")]
    pub birth_date: Option<NaiveDate>,
    pub age: AgeResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success_message: String,
}

/// Everything the home screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub mom_name: String,
    pub baby_name: String,
    pub baby_photo: String,
    pub age: AgeResult,
    pub next_medication: Option<NextMedication>,
    pub weekly_agenda: Vec<AgendaDay>,
    pub medication_count: usize,
    pub therapy_count: usize,
    pub professional_count: usize,
}
