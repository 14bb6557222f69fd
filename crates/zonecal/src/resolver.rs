//! Zone resolution and host-clock access.
//!
//! [`OffsetResolver`] is the single gateway from IANA zone names to zone
//! rule data. It is a service object: construct one, keep it for the
//! process lifetime, and pass it by reference to every operation that
//! takes a zone name. Resolved zone handles are cached behind a lock, so
//! concurrent first use from multiple threads is safe.
//!
//! The zone rule data itself is the IANA database that `chrono-tz`
//! compiles into the binary; there is no runtime dataset to locate or
//! load.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::convert::utc_from_millis;
use crate::error::{Result, ZonecalError};

/// The offset information in effect for a zone at one instant.
///
/// `offset_minutes` follows the UTC-minus-local sign convention: the
/// minutes to add to a local wall-clock reading to reach UTC, positive
/// west of UTC (e.g. `480` for PST, `-540` for JST).
#[derive(Debug, Clone, Serialize)]
pub struct ZoneOffset {
    /// UTC minus local, in minutes.
    pub offset_minutes: i32,
    /// The zone abbreviation at this instant (e.g. "PST", "JST").
    pub abbreviation: String,
    /// Whether Daylight Saving Time is active at this instant.
    pub dst_active: bool,
}

impl ZoneOffset {
    /// The conventional RFC 3339 rendering of this offset (e.g. "-08:00").
    pub fn utc_offset(&self) -> String {
        format_offset(self.offset_minutes)
    }
}

/// Resolves IANA zone names to offset data, caching resolved handles.
#[derive(Debug, Default)]
pub struct OffsetResolver {
    cache: RwLock<HashMap<String, Tz>>,
}

impl OffsetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a zone handle by IANA name.
    ///
    /// # Errors
    ///
    /// Returns [`ZonecalError::UnknownZone`] if the name does not map to
    /// a zone in the compiled database. Never falls back to a default.
    pub fn zone(&self, zone_id: &str) -> Result<Tz> {
        if let Some(tz) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(zone_id)
        {
            return Ok(*tz);
        }

        let tz = zone_id
            .parse::<Tz>()
            .map_err(|_| ZonecalError::UnknownZone(zone_id.to_string()))?;

        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(zone_id.to_string(), tz);
        Ok(tz)
    }

    /// The offset and abbreviation in effect in `zone_id` at `instant_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`ZonecalError::UnknownZone`] for an unresolvable name, or
    /// [`ZonecalError::InvalidDatetime`] if `instant_ms` is outside the
    /// representable range.
    pub fn resolve(&self, instant_ms: i64, zone_id: &str) -> Result<ZoneOffset> {
        let tz = self.zone(zone_id)?;
        let local = utc_from_millis(instant_ms)?.with_timezone(&tz);

        Ok(ZoneOffset {
            offset_minutes: -(local.offset().fix().local_minus_utc() / 60),
            abbreviation: local.format("%Z").to_string(),
            dst_active: is_dst_active(&local, &tz),
        })
    }
}

/// Determine if DST is active for a datetime in a timezone.
fn is_dst_active(dt: &DateTime<Tz>, tz: &Tz) -> bool {
    // Compare the January 1 offset (winter / standard) with the current
    // offset. If they differ, DST is active.
    let utc = dt.with_timezone(&Utc);
    let jan1 = Utc
        .with_ymd_and_hms(utc.year(), 1, 1, 12, 0, 0)
        .single()
        .unwrap_or(utc);
    let jan1_local = jan1.with_timezone(tz);

    dt.offset().fix().local_minus_utc() != jan1_local.offset().fix().local_minus_utc()
}

/// Format an offset (UTC-minus-local minutes) in the conventional
/// local-minus-UTC RFC 3339 form (e.g. `480` → "-08:00", `-540` → "+09:00").
pub fn format_offset(offset_minutes: i32) -> String {
    let local_minus_utc = -offset_minutes;
    let sign = if local_minus_utc >= 0 { "+" } else { "-" };
    let abs = local_minus_utc.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}

/// Current process wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// The host default zone's offset (UTC minus local, minutes) at `instant_ms`.
///
/// Reads the process's own zone via [`chrono::Local`]; no zone database
/// lookup is involved.
pub fn host_offset_minutes(instant_ms: i64) -> Result<i32> {
    let local = utc_from_millis(instant_ms)?.with_timezone(&Local);
    Ok(-(local.offset().fix().local_minus_utc() / 60))
}
