//! Calendar-day extraction and display formatting for message timestamps.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};

/// Weekday symbols indexed by days from Sunday.
pub const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Convert epoch milliseconds to wall-clock time at the given offset.
///
/// Returns None when the timestamp cannot be represented as a date.
pub fn local_datetime(created_at: i64, offset: FixedOffset) -> Option<NaiveDateTime> {
    let utc = DateTime::<Utc>::from_timestamp_millis(created_at)?;
    utc.naive_utc()
        .checked_add_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
}

/// Two calendar days are the same only when both are known and equal.
/// An unknown day is a boundary against everything, itself included.
pub fn same_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// `2024년 04월 22일 (월)`
pub fn day_divider_label(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!(
        "{}년 {:02}월 {:02}일 ({})",
        date.year(),
        date.month(),
        date.day(),
        weekday
    )
}

/// `2024.04.22. 오후 9:31`
///
/// The hour is `hour % 12`, so noon and midnight print as 0.
pub fn message_timestamp(time: NaiveDateTime) -> String {
    let hour = time.hour();
    let marker = if hour >= 12 { "오후" } else { "오전" };
    format!(
        "{}.{:02}.{:02}. {} {}:{:02}",
        time.year(),
        time.month(),
        time.day(),
        marker,
        hour % 12,
        time.minute()
    )
}
