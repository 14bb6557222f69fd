//! Elapsed-time measurement and millisecond-count rendering.
//!
//! Pure functions over millisecond counts, independent of zones and the
//! calendar operations. [`compact_clock`] renders a count the way a
//! stopwatch display would; [`english_phrase`] renders it as a coarse
//! English phrase that always truncates ("59 minutes" never rounds up
//! to "1 hour").

use crate::resolver::now_ms;

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Coarse unit ladder for [`english_phrase`], finest first.
const UNITS: [(i64, &str, &str); 7] = [
    (SECOND_MS, "second", "seconds"),
    (MINUTE_MS, "minute", "minutes"),
    (HOUR_MS, "hour", "hours"),
    (DAY_MS, "day", "days"),
    (WEEK_MS, "week", "weeks"),
    (MONTH_MS, "month", "months"),
    (YEAR_MS, "year", "years"),
];

/// Render a millisecond count as a compact clock string.
///
/// Hours appear only when nonzero; minutes are zero-padded under an
/// hour digit and bare otherwise; seconds always appear, zero-padded.
/// With `with_fraction`, leftover milliseconds are appended only while
/// the count is under a minute.
///
/// ```
/// use zonecal::compact_clock;
///
/// assert_eq!(compact_clock(3_600_000, false), "1:00:00");
/// assert_eq!(compact_clock(90_000, false), "1:30");
/// assert_eq!(compact_clock(1_345, true), ":01.345");
/// ```
pub fn compact_clock(ms: i64, with_fraction: bool) -> String {
    let ms = ms.max(0);
    let hours = ms / HOUR_MS;
    let rem = ms % HOUR_MS;
    let minutes = rem / MINUTE_MS;
    let rem = rem % MINUTE_MS;
    let seconds = rem / SECOND_MS;
    let millis = rem % SECOND_MS;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}:{minutes:02}"));
    } else if minutes > 0 {
        out.push_str(&format!("{minutes}"));
    }
    out.push_str(&format!(":{seconds:02}"));
    if with_fraction && hours == 0 && minutes == 0 {
        out.push_str(&format!(".{millis:03}"));
    }
    out
}

/// Render a millisecond count as a coarse English phrase.
///
/// Walks the unit ladder from seconds upward while the next unit's
/// truncated count is still nonzero, then reports the count in the unit
/// it stopped at. Counts under one second read `"now"`.
pub fn english_phrase(ms: i64) -> String {
    if ms < SECOND_MS {
        return "now".to_string();
    }

    let mut idx = 0;
    while idx + 1 < UNITS.len() && ms / UNITS[idx + 1].0 > 0 {
        idx += 1;
    }
    let (divisor, singular, plural) = UNITS[idx];
    let count = ms / divisor;
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// Start/stop elapsed-time measurement over the process wall clock.
///
/// `end` is set by the first stop; later stops are tolerated and keep
/// returning the first measurement.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start: i64,
    end: Option<i64>,
}

impl Stopwatch {
    /// Start measuring now.
    pub fn start() -> Self {
        Self::start_at(now_ms())
    }

    /// Start measuring from an explicit instant.
    pub fn start_at(start_ms: i64) -> Self {
        Stopwatch {
            start: start_ms,
            end: None,
        }
    }

    pub fn start_ms(&self) -> i64 {
        self.start
    }

    /// Stop (first call only) and return the elapsed milliseconds.
    pub fn stop(&mut self) -> i64 {
        self.stop_at(now_ms())
    }

    /// Stop against an explicit instant and return the elapsed milliseconds.
    pub fn stop_at(&mut self, now: i64) -> i64 {
        *self.end.get_or_insert(now) - self.start
    }

    /// Stop and render the elapsed time via [`compact_clock`], with fraction.
    pub fn stop_display(&mut self) -> String {
        let elapsed = self.stop();
        compact_clock(elapsed, true)
    }
}
