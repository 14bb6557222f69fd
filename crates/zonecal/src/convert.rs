//! Instant / wall-clock conversion.
//!
//! [`to_zone`] reads the calendar fields an instant has on the wall
//! clock of a named zone; [`from_wall`] goes the other way, returning
//! the absolute instant whose wall clock in a zone shows a given
//! reading. [`to_host`] and [`from_wall_host`] are the same pair against
//! the process's own default zone, with no zone database involvement.
//!
//! A [`WallClock`] is a display reading, not an instant: it carries no
//! identity as a point in time and two readings from different zones
//! must not be compared or combined.
//!
//! # DST boundaries
//!
//! `from_wall` is total. A reading that occurs twice (fall-back fold)
//! resolves to the earlier instant; a reading that never occurs
//! (spring-forward gap) is interpreted with the offset in effect before
//! the transition, landing just past the gap.

use chrono::{
    DateTime, Datelike, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
    Weekday,
};
use serde::Serialize;

use crate::error::{Result, ZonecalError};
use crate::resolver::{format_offset, OffsetResolver};

/// The calendar fields an instant has on one zone's wall clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WallClock {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
    pub weekday: Weekday,
    /// UTC minus local, in minutes.
    pub offset_minutes: i32,
    /// Zone abbreviation (numeric offset for the host zone).
    pub abbreviation: String,
}

impl WallClock {
    fn from_datetime<T: TimeZone>(dt: &DateTime<T>) -> Self
    where
        T::Offset: std::fmt::Display,
    {
        WallClock {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            millisecond: dt.timestamp_subsec_millis(),
            weekday: dt.weekday(),
            offset_minutes: -(dt.offset().fix().local_minus_utc() / 60),
            abbreviation: dt.format("%Z").to_string(),
        }
    }

    /// Day of week as an index, Sunday = 0 through Saturday = 6.
    pub fn weekday_index(&self) -> u8 {
        self.weekday.num_days_from_sunday() as u8
    }

    /// The reading as a zone-less datetime, or `None` if the fields do
    /// not form a valid date (possible only for hand-built values).
    pub fn naive_local(&self) -> Option<NaiveDateTime> {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_milli_opt(self.hour, self.minute, self.second, self.millisecond)
    }

    /// RFC 3339 rendering of the reading, e.g. "2012-12-07T22:02:51.612-08:00".
    pub fn to_rfc3339(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}{}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
            format_offset(self.offset_minutes)
        )
    }
}

pub(crate) fn utc_from_millis(instant_ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(instant_ms)
        .ok_or_else(|| ZonecalError::InvalidDatetime(format!("epoch millis {instant_ms} out of range")))
}

/// Read the wall clock `instant_ms` shows in `zone_id`.
///
/// # Errors
///
/// Returns [`ZonecalError::UnknownZone`] for an unresolvable zone name.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use zonecal::{to_zone, OffsetResolver};
///
/// let resolver = OffsetResolver::new();
/// let instant = chrono::Utc
///     .with_ymd_and_hms(2012, 12, 8, 6, 2, 51)
///     .unwrap()
///     .timestamp_millis();
/// let wall = to_zone(&resolver, "US/Pacific", instant).unwrap();
/// // Still the previous calendar day on the US west coast.
/// assert_eq!((wall.month, wall.day, wall.hour), (12, 7, 22));
/// ```
pub fn to_zone(resolver: &OffsetResolver, zone_id: &str, instant_ms: i64) -> Result<WallClock> {
    let tz = resolver.zone(zone_id)?;
    let local = utc_from_millis(instant_ms)?.with_timezone(&tz);
    Ok(WallClock::from_datetime(&local))
}

/// Read the wall clock `instant_ms` shows in the host default zone.
pub fn to_host(instant_ms: i64) -> Result<WallClock> {
    let local = utc_from_millis(instant_ms)?.with_timezone(&Local);
    Ok(WallClock::from_datetime(&local))
}

/// The absolute instant whose wall clock in `zone_id` reads `wall`.
///
/// Total across DST boundaries; see the module docs for the fold and
/// gap policy.
pub fn from_wall(resolver: &OffsetResolver, zone_id: &str, wall: NaiveDateTime) -> Result<i64> {
    let tz = resolver.zone(zone_id)?;
    Ok(resolve_wall(&tz, wall))
}

/// The absolute instant whose host-zone wall clock reads `wall`.
pub fn from_wall_host(wall: NaiveDateTime) -> i64 {
    resolve_wall(&Local, wall)
}

/// The host-zone wall-clock reading of `instant_ms`, as bare fields.
pub(crate) fn host_wall(instant_ms: i64) -> Result<NaiveDateTime> {
    Ok(utc_from_millis(instant_ms)?.with_timezone(&Local).naive_local())
}

fn resolve_wall<T: TimeZone>(tz: &T, wall: NaiveDateTime) -> i64 {
    let as_utc = wall.and_utc().timestamp_millis();
    let at_offset = |offset_secs: i32| as_utc - i64::from(offset_secs) * 1000;

    match tz.offset_from_local_datetime(&wall) {
        LocalResult::Single(offset) => at_offset(offset.fix().local_minus_utc()),
        LocalResult::Ambiguous(a, b) => at_offset(a.fix().local_minus_utc())
            .min(at_offset(b.fix().local_minus_utc())),
        LocalResult::None => {
            // Gap: take the offset in effect a day earlier, before the
            // transition, which maps the reading just past the gap.
            let probe = wall - chrono::Duration::days(1);
            let offset_secs = match tz.offset_from_local_datetime(&probe) {
                LocalResult::Single(o) | LocalResult::Ambiguous(o, _) => o.fix().local_minus_utc(),
                LocalResult::None => tz.offset_from_utc_datetime(&wall).fix().local_minus_utc(),
            };
            at_offset(offset_secs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use proptest::prelude::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .timestamp_millis()
    }

    fn wall_of(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn pacific_reads_previous_calendar_day() {
        let resolver = OffsetResolver::new();
        let instant = at(2012, 12, 8, 6, 2, 51) + 612;
        let wall = to_zone(&resolver, "US/Pacific", instant).unwrap();

        assert_eq!(wall.year, 2012);
        assert_eq!(wall.month, 12);
        assert_eq!(wall.day, 7);
        assert_eq!(wall.hour, 22);
        assert_eq!(wall.minute, 2);
        assert_eq!(wall.second, 51);
        assert_eq!(wall.millisecond, 612);
        assert_eq!(wall.weekday, Weekday::Fri);
        assert_eq!(wall.offset_minutes, 480);
        assert_eq!(wall.abbreviation, "PST");
        assert_eq!(wall.to_rfc3339(), "2012-12-07T22:02:51.612-08:00");
    }

    #[test]
    fn tokyo_reads_next_calendar_day() {
        let resolver = OffsetResolver::new();
        let wall = to_zone(&resolver, "Asia/Tokyo", at(2026, 2, 18, 20, 0, 0)).unwrap();
        assert_eq!((wall.month, wall.day, wall.hour), (2, 19, 5));
    }

    #[test]
    fn weekday_index_is_sunday_based() {
        let resolver = OffsetResolver::new();
        // 2026-02-15 is a Sunday, 2026-02-21 a Saturday.
        let sun = to_zone(&resolver, "UTC", at(2026, 2, 15, 12, 0, 0)).unwrap();
        let sat = to_zone(&resolver, "UTC", at(2026, 2, 21, 12, 0, 0)).unwrap();
        assert_eq!(sun.weekday_index(), 0);
        assert_eq!(sat.weekday_index(), 6);
    }

    #[test]
    fn from_wall_plain_reading() {
        let resolver = OffsetResolver::new();
        let instant =
            from_wall(&resolver, "US/Pacific", wall_of(2012, 12, 7, 22, 2, 51)).unwrap();
        assert_eq!(instant, at(2012, 12, 8, 6, 2, 51));
    }

    #[test]
    fn from_wall_fold_takes_earlier_instant() {
        let resolver = OffsetResolver::new();
        // 2026-11-01 01:30 occurs twice in New York; the EDT reading
        // (05:30 UTC) precedes the EST one (06:30 UTC).
        let instant =
            from_wall(&resolver, "America/New_York", wall_of(2026, 11, 1, 1, 30, 0)).unwrap();
        assert_eq!(instant, at(2026, 11, 1, 5, 30, 0));
    }

    #[test]
    fn from_wall_gap_uses_pre_transition_offset() {
        let resolver = OffsetResolver::new();
        // 2026-03-08 02:30 never occurs in New York; read with EST it
        // lands at 07:30 UTC, i.e. 03:30 EDT.
        let instant =
            from_wall(&resolver, "America/New_York", wall_of(2026, 3, 8, 2, 30, 0)).unwrap();
        assert_eq!(instant, at(2026, 3, 8, 7, 30, 0));

        let readback = to_zone(&resolver, "America/New_York", instant).unwrap();
        assert_eq!((readback.hour, readback.minute), (3, 30));
    }

    #[test]
    fn unknown_zone_propagates() {
        let resolver = OffsetResolver::new();
        assert!(to_zone(&resolver, "Not/AZone", 0).is_err());
        assert!(from_wall(&resolver, "Not/AZone", wall_of(2026, 1, 1, 0, 0, 0)).is_err());
    }

    #[test]
    fn host_pair_round_trips() {
        let instant = at(2026, 2, 18, 14, 30, 0);
        let wall = to_host(instant).unwrap();
        let naive = wall.naive_local().unwrap();
        assert_eq!(from_wall_host(naive), instant);
        assert_eq!(host_wall(instant).unwrap(), naive);
    }

    #[test]
    fn wall_clock_serializes() {
        let resolver = OffsetResolver::new();
        let wall = to_zone(&resolver, "UTC", at(2026, 2, 18, 14, 30, 0)).unwrap();
        let json = serde_json::to_value(&wall).unwrap();
        assert_eq!(json["year"], 2026);
        assert_eq!(json["day"], 18);
    }

    proptest! {
        // Round-trip property, exercised in a DST-free zone so every
        // reading is unambiguous.
        #[test]
        fn tokyo_round_trips(instant in 0i64..4_000_000_000_000i64) {
            let resolver = OffsetResolver::new();
            let wall = to_zone(&resolver, "Asia/Tokyo", instant).unwrap();
            let naive = wall.naive_local().unwrap();
            prop_assert_eq!(from_wall(&resolver, "Asia/Tokyo", naive).unwrap(), instant);
        }
    }
}
