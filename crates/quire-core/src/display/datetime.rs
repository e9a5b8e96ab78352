//! DateTime display utilities.

use std::fmt;

use jiff::{Timestamp, tz::TimeZone};

/// A `Timestamp` formatted as `YYYY-MM-DD HH:MM:SS TZ`.
///
/// Uses the system time zone unless another one is supplied with
/// [`LocalDateTime::in_zone`].
pub struct LocalDateTime<'a> {
    timestamp: &'a Timestamp,
    zone: Option<TimeZone>,
}

impl<'a> LocalDateTime<'a> {
    pub fn new(timestamp: &'a Timestamp) -> Self {
        Self {
            timestamp,
            zone: None,
        }
    }

    pub fn in_zone(mut self, zone: TimeZone) -> Self {
        self.zone = Some(zone);
        self
    }
}

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zone = self.zone.clone().unwrap_or_else(TimeZone::system);
        write!(
            f,
            "{}",
            self.timestamp
                .to_zoned(zone)
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_in_given_zone() {
        let timestamp = Timestamp::from_second(1640995200).unwrap();
        let formatted = LocalDateTime::new(&timestamp)
            .in_zone(TimeZone::UTC)
            .to_string();
        assert_eq!(formatted, "2022-01-01 00:00:00 UTC");
    }
}
