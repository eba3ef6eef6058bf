//! Picks the next dose to give from all medication schedules.

use chrono::{NaiveTime, Timelike};
use shared::{Medication, NextMedication};

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// How long an untaken dose keeps being surfaced after its time has passed
pub const OVERDUE_WINDOW_MINUTES: i32 = 60;

/// Minutes from `now` until `slot`, wrapped to tomorrow once the slot is more
/// than the overdue window in the past.
pub fn adjusted_difference(slot_minutes: i32, now_minutes: i32) -> i32 {
    let diff = slot_minutes - now_minutes;
    if diff < -OVERDUE_WINDOW_MINUTES {
        diff + MINUTES_PER_DAY
    } else {
        diff
    }
}

/// The soonest untaken dose across all medications.
///
/// Doses up to an hour overdue rank ahead of upcoming ones. On equal
/// distance the first one found wins (medication order, then slot order).
pub fn next_medication(medications: &[Medication], now: NaiveTime) -> Option<NextMedication> {
    let now_minutes = (now.hour() * 60 + now.minute()) as i32;
    let mut best: Option<NextMedication> = None;

    for medication in medications {
        for slot in medication.schedule.iter().filter(|slot| !slot.taken) {
            let adjusted = adjusted_difference(slot.time.minutes_since_midnight(), now_minutes);

            if adjusted <= -OVERDUE_WINDOW_MINUTES {
                continue;
            }

            let is_better = best.as_ref().map_or(true, |current| adjusted < current.minutes_until);
            if is_better {
                best = Some(NextMedication {
                    medication_id: medication.id,
                    name: medication.name.clone(),
                    dose: medication.dose.clone(),
                    time: slot.time,
                    minutes_until: adjusted,
                });
            }
        }
    }

    best
}
