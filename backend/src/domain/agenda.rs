//! Agenda views over the therapy list.
//!
//! This module contains the date bucketing behind the agenda screens: the
//! seven-day look-ahead on the home screen, the single-day list and the
//! month grid of the calendar tab. Date labels are formatted here too so
//! every frontend shows the same text.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use shared::{AgendaDay, DisplayLocale, MonthDayCount, MonthOverview, Therapy};
use std::collections::BTreeMap;

/// Number of days covered by the look-ahead, today included
pub const AGENDA_DAYS: i64 = 7;

/// The next seven days starting today, one group per date that has
/// therapies. Days without therapies are left out.
///
/// The iterator is lazy and single pass; call again to pick up a new day or
/// a changed therapy list.
pub fn weekly_agenda(
    therapies: &[Therapy],
    today: NaiveDate,
    locale: DisplayLocale,
) -> impl Iterator<Item = AgendaDay> + '_ {
    (0..AGENDA_DAYS).filter_map(move |offset| {
        let date = today + Duration::days(offset);
        let events = therapies_on(therapies, date);

        if events.is_empty() {
            None
        } else {
            Some(AgendaDay {
                date,
                display_date: format_agenda_label(date, locale),
                events,
            })
        }
    })
}

/// Therapies scheduled on `date`, earliest first. Equal times keep their
/// original order.
pub fn therapies_on(therapies: &[Therapy], date: NaiveDate) -> Vec<Therapy> {
    let mut events: Vec<Therapy> = therapies.iter().filter(|t| t.date == date).cloned().collect();
    events.sort_by(|a, b| a.time.cmp(&b.time));
    events
}

/// Calendar grid data for one month. Returns `None` for an invalid month.
pub fn month_overview(
    therapies: &[Therapy],
    year: i32,
    month: u32,
    locale: DisplayLocale,
) -> Option<MonthOverview> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for therapy in therapies.iter().filter(|t| t.date.year() == year && t.date.month() == month) {
        *counts.entry(therapy.date.day()).or_default() += 1;
    }

    Some(MonthOverview {
        year,
        month,
        title: format_month_title(year, month, locale),
        days_in_month: days_in_month(year, month),
        first_day_of_week: first.weekday().num_days_from_sunday(),
        therapy_days: counts.into_iter().map(|(day, count)| MonthDayCount { day, count }).collect(),
    })
}

/// Number of days in a month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// `DD/MM`, as shown in therapy lists
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// Short weekday plus day and month, e.g. `"sex., 16/10"` or `"Fri, 10/16"`
pub fn format_agenda_label(date: NaiveDate, locale: DisplayLocale) -> String {
    let weekday = weekday_short(date.weekday(), locale);
    match locale {
        DisplayLocale::PtBr => format!("{}, {:02}/{:02}", weekday, date.day(), date.month()),
        DisplayLocale::EnUs => format!("{}, {:02}/{:02}", weekday, date.month(), date.day()),
    }
}

/// Long date for a single-day heading, e.g. `"16 de outubro de 2026"`
pub fn format_long_date(date: NaiveDate, locale: DisplayLocale) -> String {
    let month = month_name(date.month(), locale);
    match locale {
        DisplayLocale::PtBr => format!("{} de {} de {}", date.day(), month, date.year()),
        DisplayLocale::EnUs => format!("{} {}, {}", month, date.day(), date.year()),
    }
}

fn format_month_title(year: i32, month: u32, locale: DisplayLocale) -> String {
    match locale {
        DisplayLocale::PtBr => format!("{} de {}", month_name(month, locale), year),
        DisplayLocale::EnUs => format!("{} {}", month_name(month, locale), year),
    }
}

fn weekday_short(weekday: Weekday, locale: DisplayLocale) -> &'static str {
    match locale {
        DisplayLocale::PtBr => match weekday {
            Weekday::Sun => "dom.",
            Weekday::Mon => "seg.",
            Weekday::Tue => "ter.",
            Weekday::Wed => "qua.",
            Weekday::Thu => "qui.",
            Weekday::Fri => "sex.",
            Weekday::Sat => "sáb.",
        },
        DisplayLocale::EnUs => match weekday {
            Weekday::Sun => "Sun",
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
        },
    }
}

fn month_name(month: u32, locale: DisplayLocale) -> &'static str {
    match locale {
        DisplayLocale::PtBr => match month {
            1 => "janeiro", 2 => "fevereiro", 3 => "março", 4 => "abril",
            5 => "maio", 6 => "junho", 7 => "julho", 8 => "agosto",
            9 => "setembro", 10 => "outubro", 11 => "novembro", 12 => "dezembro",
            _ => "",
        },
        DisplayLocale::EnUs => match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "",
        },
    }
}
