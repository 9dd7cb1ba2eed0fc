//! Repairs timestamps that the source stored in the operator's local zone
//! but labelled as UTC.
//!
//! The wall-clock digits are kept and relabelled with the zone that is in
//! effect when the correction runs, not the zone in effect when the event
//! happened. Events logged on the other side of a DST transition therefore
//! come out one hour off. This matches the historical output of the tailer.
//!
//! Unlike the historical output, the text form keeps seconds, sub-seconds and
//! the four-digit year, so corrected timestamps are no longer truncated to the
//! minute.

use crate::{
    error::TimestampError,
    time::clock::{LocalZone, ZoneClock},
};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use std::{fmt::Display, sync::Arc};

/// RFC 822 field order with a four-digit year and seconds, so the reparse
/// does not lose precision.
const RENDER_LAYOUT: &str = "%d %b %Y %H:%M:%S%.f %Z";
const PARSE_LAYOUT: &str = "%d %b %Y %H:%M:%S%.f";
const UTC_MARKER: &str = " UTC";

#[derive(Clone)]
pub struct TimestampCorrector {
    clock: Arc<dyn ZoneClock>,
}

impl TimestampCorrector {
    pub fn new(clock: Arc<dyn ZoneClock>) -> Self {
        Self { clock }
    }

    /// Relabels `raw` with the current local zone.
    pub fn correct<Tz>(&self, raw: &DateTime<Tz>) -> Result<DateTime<FixedOffset>, TimestampError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        correct_with_zone(raw, &self.clock.current_zone())
    }
}

/// Text form of `raw` that the correction operates on, e.g.
/// `02 Jan 2006 15:04:05 UTC`.
pub fn render<Tz>(raw: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    raw.format(RENDER_LAYOUT).to_string()
}

pub fn correct_with_zone<Tz>(
    raw: &DateTime<Tz>,
    zone: &LocalZone,
) -> Result<DateTime<FixedOffset>, TimestampError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rendered = render(raw);
    let Some(wall_clock) = rendered.strip_suffix(UTC_MARKER) else {
        return Err(TimestampError::MissingUtcMarker { rendered });
    };

    let relabelled = format!("{wall_clock} {}", zone.abbreviation);
    parse_in_zone(&relabelled, zone)
}

/// Parses `<wall clock> <abbreviation>` where the abbreviation must name `zone`.
fn parse_in_zone(text: &str, zone: &LocalZone) -> Result<DateTime<FixedOffset>, TimestampError> {
    let reparse_err = |reason: String| TimestampError::Reparse {
        text: text.to_string(),
        reason,
    };

    let (wall_clock, found) = text
        .rsplit_once(' ')
        .ok_or_else(|| reparse_err("missing zone abbreviation".to_string()))?;

    if found != zone.abbreviation {
        return Err(TimestampError::ZoneMismatch {
            text: text.to_string(),
            found: found.to_string(),
            expected: zone.abbreviation.clone(),
        });
    }

    let naive = NaiveDateTime::parse_from_str(wall_clock, PARSE_LAYOUT)
        .map_err(|e| reparse_err(e.to_string()))?;

    zone.offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| reparse_err("ambiguous local time".to_string()))
}
