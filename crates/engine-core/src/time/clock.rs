use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

/// A zone as observed at one instant: its abbreviation and UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalZone {
    pub abbreviation: String,
    pub offset: FixedOffset,
}

impl LocalZone {
    /// The zone `tz` is in at `instant` (abbreviation and offset change with DST).
    pub fn of(tz: Tz, instant: DateTime<Utc>) -> Self {
        let local = instant.with_timezone(&tz);
        LocalZone {
            abbreviation: local.format("%Z").to_string(),
            offset: local.offset().fix(),
        }
    }
}

/// Source of "the local zone right now".
pub trait ZoneClock: Send + Sync {
    fn current_zone(&self) -> LocalZone;
}

/// The host's zone: `TZ` if set, otherwise the system setting.
#[derive(Debug, Clone, Copy)]
pub struct SystemZoneClock {
    tz: Tz,
}

impl SystemZoneClock {
    pub fn detect() -> Self {
        let name = std::env::var("TZ")
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| v.trim_start_matches(':').to_string())
            .or_else(|| match iana_time_zone::get_timezone() {
                Ok(name) => Some(name),
                Err(err) => {
                    warn!(error = %err, "Could not determine host time zone, assuming UTC");
                    None
                }
            });

        let tz = match name {
            Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                warn!(zone = %name, "Unknown host time zone, assuming UTC");
                chrono_tz::UTC
            }),
            None => chrono_tz::UTC,
        };

        info!(zone = %tz.name(), "Using host time zone for timestamp correction");
        SystemZoneClock { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }
}

impl ZoneClock for SystemZoneClock {
    fn current_zone(&self) -> LocalZone {
        LocalZone::of(self.tz, Utc::now())
    }
}

/// A configured zone, optionally pinned to a fixed "now".
#[derive(Debug, Clone, Copy)]
pub struct FixedZoneClock {
    tz: Tz,
    now: Option<DateTime<Utc>>,
}

impl FixedZoneClock {
    pub fn new(tz: Tz) -> Self {
        FixedZoneClock { tz, now: None }
    }

    pub fn pinned(tz: Tz, now: DateTime<Utc>) -> Self {
        FixedZoneClock { tz, now: Some(now) }
    }
}

impl ZoneClock for FixedZoneClock {
    fn current_zone(&self) -> LocalZone {
        LocalZone::of(self.tz, self.now.unwrap_or_else(Utc::now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zone_follows_daylight_saving_at_the_given_instant() {
        let tz: Tz = "America/New_York".parse().unwrap();

        let winter = LocalZone::of(tz, Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap());
        assert_eq!(winter.abbreviation, "EST");
        assert_eq!(winter.offset, FixedOffset::west_opt(5 * 3600).unwrap());

        let summer = LocalZone::of(tz, Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap());
        assert_eq!(summer.abbreviation, "EDT");
        assert_eq!(summer.offset, FixedOffset::west_opt(4 * 3600).unwrap());
    }

    #[test]
    fn pinned_clock_reports_zone_at_pinned_instant() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let clock = FixedZoneClock::pinned(chrono_tz::Europe::Berlin, now);
        assert_eq!(clock.current_zone().abbreviation, "CET");
    }
}
