// Number and date formatting for project cards.

use chrono::{DateTime, Utc};

use super::locale::Locale;

/// Compact a count: below 1000 as-is, otherwise thousands truncated to one decimal ("12.3k").
pub fn format_number(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let tenths = n / 100;
    format!("{}.{}k", tenths / 10, tenths % 10)
}

/// Relative label for a past timestamp, bucketed by whole elapsed days.
pub fn format_relative_date(then: &DateTime<Utc>, now: &DateTime<Utc>, locale: Locale) -> String {
    let days = now.signed_duration_since(*then).num_days();

    if days < 1 {
        locale.today().to_string()
    } else if days < 7 {
        locale.days_ago(days)
    } else if days < 30 {
        locale.weeks_ago(days / 7)
    } else if days < 365 {
        locale.months_ago(days / 30)
    } else {
        locale.years_ago(days / 365)
    }
}
