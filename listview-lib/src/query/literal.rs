//! Date and instant literal formatting

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::TimeZone;
use chrono::Utc;

/// The literal emitted for an absent or unrepresentable date/instant.
pub const NULL_LITERAL: &str = "NULL";

/// Formats a date literal as a bare `YYYY-MM-DD` token (no quotes).
///
/// An absent date renders as [`NULL_LITERAL`].
pub fn date_literal(day: Option<NaiveDate>) -> String {
    match day {
        Some(day) => day.format("%Y-%m-%d").to_string(),
        None => NULL_LITERAL.to_string(),
    }
}

/// Formats an instant literal as `YYYY-MM-DDTHH:MM:SSZ` in UTC.
///
/// An absent instant renders as [`NULL_LITERAL`].
pub fn instant_literal<Tz: TimeZone>(instant: Option<&DateTime<Tz>>) -> String {
    match instant {
        Some(at) => at
            .with_timezone(&Utc)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string(),
        None => NULL_LITERAL.to_string(),
    }
}

/// Expands a local calendar day to the inclusive instant range covering it,
/// local midnight through 23:59:59.999, each bound converted to UTC.
///
/// Returns `None` when the local timezone cannot represent a bound (a DST
/// gap swallowing midnight); callers degrade to `NULL` literals.
pub fn local_day_bounds<Tz: TimeZone>(
    day: NaiveDate,
    tz: &Tz,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start_of_day = day.and_time(NaiveTime::MIN);
    let end_of_day = day.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?);

    let start = tz.from_local_datetime(&start_of_day).earliest()?;
    let end = tz.from_local_datetime(&end_of_day).latest()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}
