//! Relative date-text parsing.
//!
//! A thin layer over the calendar-math parsers: `"today"`,
//! `"tomorrow"` and `"yesterday"` are recognized directly (plain
//! 24-hour arithmetic on the anchor, deliberately not zone-aware), and
//! anything else is delegated to the RFC 3339 and ISO-date parsers.
//! Unparseable text is a `None` sentinel, never an error.

use chrono::{DateTime, NaiveDate};

use crate::calendar::DAY_MS;
use crate::convert::{from_wall, from_wall_host, host_wall};
use crate::error::Result;
use crate::resolver::OffsetResolver;

/// Resolve free-form date text against a `now` anchor.
///
/// When `zone` is supplied, a delegated parse result is reinterpreted:
/// its host-local calendar fields are taken as the intended wall-clock
/// reading in `zone` and converted back to the true instant. The
/// anchored words skip that correction.
///
/// # Errors
///
/// Returns [`ZonecalError::UnknownZone`](crate::ZonecalError::UnknownZone)
/// if `zone` cannot be resolved. Text that no parser accepts yields
/// `Ok(None)`.
pub fn parse_relative(
    resolver: &OffsetResolver,
    text: &str,
    zone: Option<&str>,
    now_ms: i64,
) -> Result<Option<i64>> {
    let trimmed = text.trim();
    match trimmed.to_lowercase().as_str() {
        "today" => return Ok(Some(now_ms)),
        "tomorrow" => return Ok(Some(now_ms + DAY_MS)),
        "yesterday" => return Ok(Some(now_ms - DAY_MS)),
        _ => {}
    }

    let Some(instant) = parse_calendar_text(trimmed) else {
        return Ok(None);
    };

    match zone {
        None => Ok(Some(instant)),
        Some(zone_id) => {
            let wall = host_wall(instant)?;
            from_wall(resolver, zone_id, wall).map(Some)
        }
    }
}

/// Delegate to the calendar-math parsers: RFC 3339 first, then a bare
/// ISO date at host-zone midnight.
fn parse_calendar_text(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let wall = date.and_hms_opt(0, 0, 0)?;
    Some(from_wall_host(wall))
}
