//! Resolving the local UTC offset used to decide what "today" is.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for a canonical timezone name such as "Asia/Shanghai".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Resolve the offset to use, preferring the configured timezone, then the
/// system's local offset, then UTC.
pub fn resolve_offset(canonical_timezone: Option<&str>) -> UtcOffset {
    if let Some(name) = canonical_timezone {
        match get_local_offset(name) {
            Some(offset) => return offset,
            None => tracing::warn!("unknown timezone \"{name}\", falling back to the system offset"),
        }
    }

    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Today's date at `offset`.
pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}
