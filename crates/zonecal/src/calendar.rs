//! Zone-aware calendar navigation.
//!
//! Weekday search, hour/midnight truncation, month start, and month-end
//! detection, all expressed over epoch-millisecond instants. Every
//! operation takes `Option<&str>` for the zone: `Some` names an IANA
//! zone resolved through the [`OffsetResolver`], `None` uses the host
//! default zone.
//!
//! Two different step orders are used deliberately. [`to_hour`] and
//! [`to_first_of_month`] read the zone-local date first and rebuild a
//! wall-clock reading from it, so the result lands on the correct
//! zone-local day even when the zone's midnight is on a different UTC
//! day than the host's. [`is_last_day_of_month`] instead adds 24
//! absolute hours first and reads the zone-local day after, which keeps
//! month-rollover detection correct when a DST transition falls near
//! midnight. Do not unify them.

use chrono::{NaiveDate, Weekday};

use crate::convert::{from_wall, from_wall_host, to_host, to_zone, WallClock};
use crate::error::{Result, ZonecalError};
use crate::resolver::OffsetResolver;

/// Exactly 24 hours in milliseconds.
pub const DAY_MS: i64 = 86_400_000;

/// Which way [`search_day`] walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step_ms(self) -> i64 {
        match self {
            Direction::Forward => DAY_MS,
            Direction::Backward => -DAY_MS,
        }
    }
}

/// Parse a weekday name (case-insensitive, supports full and abbreviated).
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn wall_at(resolver: &OffsetResolver, zone: Option<&str>, instant_ms: i64) -> Result<WallClock> {
    match zone {
        Some(zone_id) => to_zone(resolver, zone_id, instant_ms),
        None => to_host(instant_ms),
    }
}

fn instant_of(
    resolver: &OffsetResolver,
    zone: Option<&str>,
    wall: chrono::NaiveDateTime,
) -> Result<i64> {
    match zone {
        Some(zone_id) => from_wall(resolver, zone_id, wall),
        None => Ok(from_wall_host(wall)),
    }
}

/// The weekday `instant_ms` falls on in `zone` (host zone if `None`).
pub fn day_of_week(
    resolver: &OffsetResolver,
    zone: Option<&str>,
    instant_ms: i64,
) -> Result<Weekday> {
    Ok(wall_at(resolver, zone, instant_ms)?.weekday)
}

/// Walk from `instant_ms` in `direction` until the zone-local weekday
/// matches `weekday`.
///
/// The cursor steps by exactly 24 absolute hours, and the weekday is
/// re-read from the zone-local wall clock after every step; across a
/// DST transition the local day boundary does not sit 24h from the
/// previous one, and reading the cursor's local weekday fresh is what
/// keeps the search honest. An instant already on the target weekday is
/// returned unchanged.
///
/// Returns `Ok(None)` for an unrecognized weekday name.
pub fn search_day(
    resolver: &OffsetResolver,
    direction: Direction,
    weekday: &str,
    zone: Option<&str>,
    instant_ms: i64,
) -> Result<Option<i64>> {
    let Some(target) = parse_weekday(weekday) else {
        return Ok(None);
    };

    let mut cursor = instant_ms;
    // Seven 24h hops always reach every weekday, DST notwithstanding.
    for _ in 0..=7 {
        if wall_at(resolver, zone, cursor)?.weekday == target {
            return Ok(Some(cursor));
        }
        cursor += direction.step_ms();
    }
    Ok(None)
}

/// [`search_day`] forward.
pub fn next_day(
    resolver: &OffsetResolver,
    weekday: &str,
    zone: Option<&str>,
    instant_ms: i64,
) -> Result<Option<i64>> {
    search_day(resolver, Direction::Forward, weekday, zone, instant_ms)
}

/// [`search_day`] backward.
pub fn last_day(
    resolver: &OffsetResolver,
    weekday: &str,
    zone: Option<&str>,
    instant_ms: i64,
) -> Result<Option<i64>> {
    search_day(resolver, Direction::Backward, weekday, zone, instant_ms)
}

/// The instant at `hour`:00:00.000 of `instant_ms`'s zone-local day.
///
/// # Errors
///
/// Returns [`ZonecalError::UnknownZone`] for an unresolvable zone and
/// [`ZonecalError::InvalidDatetime`] for an hour outside 0..=23.
pub fn to_hour(
    resolver: &OffsetResolver,
    hour: u32,
    zone: Option<&str>,
    instant_ms: i64,
) -> Result<i64> {
    let local = wall_at(resolver, zone, instant_ms)?;
    let wall = NaiveDate::from_ymd_opt(local.year, local.month, local.day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .ok_or_else(|| ZonecalError::InvalidDatetime(format!("hour {hour} out of range")))?;
    instant_of(resolver, zone, wall)
}

/// The instant at 00:00:00.000 of `instant_ms`'s zone-local day.
pub fn to_midnight(
    resolver: &OffsetResolver,
    zone: Option<&str>,
    instant_ms: i64,
) -> Result<i64> {
    to_hour(resolver, 0, zone, instant_ms)
}

/// The instant at midnight of the first day of `instant_ms`'s zone-local month.
pub fn to_first_of_month(
    resolver: &OffsetResolver,
    zone: Option<&str>,
    instant_ms: i64,
) -> Result<i64> {
    let local = wall_at(resolver, zone, instant_ms)?;
    let wall = NaiveDate::from_ymd_opt(local.year, local.month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            ZonecalError::InvalidDatetime(format!("{}-{} has no first day", local.year, local.month))
        })?;
    instant_of(resolver, zone, wall)
}

/// Whether `instant_ms` falls on the last day of its zone-local month.
///
/// The 24h add happens on the raw instant, before any zone-local
/// reading; the rollover check then sees the correct local day even
/// when a DST transition sits near midnight.
pub fn is_last_day_of_month(
    resolver: &OffsetResolver,
    zone: Option<&str>,
    instant_ms: i64,
) -> Result<bool> {
    Ok(wall_at(resolver, zone, instant_ms + DAY_MS)?.day == 1)
}
