use chrono::{DateTime, NaiveDate, Utc};

/// The calendar day a timestamp falls on, in UTC
pub fn calendar_day(date: &DateTime<Utc>) -> NaiveDate {
    date.date_naive()
}

/// Whether two timestamps fall on the same calendar day
pub fn same_day(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    calendar_day(a) == calendar_day(b)
}

/// Formats a date the short way, e.g. `3/14/2025`
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Describes how long ago something happened, for notification lists
pub fn relative_time(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let minutes = (*now - *then).num_seconds() as f64 / 60.;
    let hours = minutes / 60.;

    if hours < 1. {
        format!("{} min ago", minutes.round() as i64)
    } else if hours < 24. {
        format!("{} hours ago", hours.round() as i64)
    } else {
        short_date(then)
    }
}
