//! Age of the baby from the profile's birth date.

use chrono::NaiveDate;
use shared::AgeResult;

/// Average month length used for the month count; not calendar aware.
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

/// Age in whole months and weeks between `birth_date` and `today`.
///
/// The elapsed time is absolute, so a birth date in the future still yields
/// a non-negative age. No birth date yields zero for both.
pub fn calculate_age(birth_date: Option<NaiveDate>, today: NaiveDate) -> AgeResult {
    let Some(birth_date) = birth_date else {
        return AgeResult::default();
    };

    let days = (today - birth_date).num_days().unsigned_abs();

    AgeResult {
        months: (days as f64 / AVERAGE_DAYS_PER_MONTH).floor() as u32,
        weeks: (days / 7) as u32,
    }
}
