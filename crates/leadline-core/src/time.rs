use chrono::{DateTime, NaiveDate, Utc};

/// UTC calendar date for an epoch timestamp. Contact and follow-up dates
/// are stored day-granular, anchored to UTC.
pub fn utc_date(now_utc: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(now_utc, 0)
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap())
        .date_naive()
}
