//! # zonecal
//!
//! Timezone-aware calendar navigation over epoch-millisecond instants.
//!
//! zonecal gives code that only carries a single-zone absolute clock a
//! correct view of other zones' calendars: it converts an instant to
//! the calendar fields it has on an arbitrary IANA zone's wall clock
//! (and back), navigates calendar boundaries in that zone (midnight
//! and hour truncation, month start, weekday search, month-end
//! detection) across DST transitions, and renders elapsed-time
//! millisecond counts as compact clock strings or coarse English
//! phrases.
//!
//! Zone names resolve through an [`OffsetResolver`] service object:
//! construct one, keep it, and pass it by reference to every operation.
//! There is no global zone cache and no hidden clock access outside the
//! two explicit conveniences ([`now_ms`], [`Stopwatch::start`]).
//!
//! ## Modules
//!
//! - [`resolver`] — IANA zone resolution, offset/abbreviation lookup, host clock
//! - [`convert`] — instant ↔ wall-clock conversion for a zone or the host
//! - [`calendar`] — weekday search, day/hour truncation, month boundaries
//! - [`timespan`] — stopwatch and millisecond-count rendering
//! - [`relative`] — "today"/"tomorrow"/"yesterday" and date-text resolution
//! - [`error`] — error types

pub mod calendar;
pub mod convert;
pub mod error;
pub mod relative;
pub mod resolver;
pub mod timespan;

pub use calendar::{
    day_of_week, is_last_day_of_month, last_day, next_day, parse_weekday, search_day,
    to_first_of_month, to_hour, to_midnight, Direction, DAY_MS,
};
pub use convert::{from_wall, from_wall_host, to_host, to_zone, WallClock};
pub use error::ZonecalError;
pub use relative::parse_relative;
pub use resolver::{format_offset, host_offset_minutes, now_ms, OffsetResolver, ZoneOffset};
pub use timespan::{compact_clock, english_phrase, Stopwatch};
