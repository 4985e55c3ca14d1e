//! Normalized flight records.
//!
//! [`FlightRecord::from_raw`] is the only place where loosely typed API data
//! becomes typed: missing keys turn into `None` or the `"unknown"` sentinel
//! here, and nothing downstream checks for key presence again.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::RawFlight;
use crate::schengen::is_schengen;

/// Placeholder for text fields the API did not provide.
pub const UNKNOWN: &str = "unknown";

/// Textual format of normalized timestamps in CSV files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Arrival,
    Departure,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Arrival, Direction::Departure];

    /// Plural form used by the API, file names and report keys.
    pub fn plural(self) -> &'static str {
        match self {
            Direction::Arrival => "arrivals",
            Direction::Departure => "departures",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.plural())
    }
}

/// Six-hour window of the day a flight was scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeOfDay {
    Early,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Early,
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
    ];

    /// | Hours       | Band      |
    /// |-------------|-----------|
    /// | 00:00–05:59 | Early     |
    /// | 06:00–11:59 | Morning   |
    /// | 12:00–17:59 | Afternoon |
    /// | 18:00–23:59 | Evening   |
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeOfDay::Early,
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }
}

/// One flight after normalization. Immutable from here on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub direction: Direction,
    pub operator: String,
    pub flight_number: String,
    pub cancelled: bool,
    pub counterpart_city: String,
    #[serde(with = "minute_format")]
    pub scheduled: Option<NaiveDateTime>,
    #[serde(with = "minute_format")]
    pub actual: Option<NaiveDateTime>,
    pub delay_minutes: Option<i64>,
    pub date: Option<NaiveDate>,
    pub day_of_week: Option<String>,
    pub time_of_day: Option<TimeOfDay>,
    pub is_schengen: bool,
}

impl FlightRecord {
    /// Normalizes one raw API entry for the given direction.
    ///
    /// Never fails: absent or malformed values become `None` / [`UNKNOWN`].
    pub fn from_raw(raw: &RawFlight, direction: Direction) -> Self {
        let scheduled = raw.scheduled_for(direction).and_then(parse_timestamp);
        let actual = raw.actual_for(direction).and_then(parse_timestamp);
        let counterpart_city = raw
            .counterpart_city(direction)
            .unwrap_or(UNKNOWN)
            .to_string();

        let delay_minutes = match (scheduled, actual) {
            (Some(s), Some(a)) => Some((a - s).num_minutes()),
            _ => None,
        };

        FlightRecord {
            direction,
            operator: raw.operator.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            flight_number: raw
                .flight_number
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            cancelled: raw.cancelled.unwrap_or(false),
            is_schengen: is_schengen(&counterpart_city),
            counterpart_city,
            scheduled,
            actual,
            delay_minutes,
            date: scheduled.map(|s| s.date()),
            day_of_week: scheduled.map(|s| s.format("%A").to_string()),
            time_of_day: scheduled.map(|s| TimeOfDay::from_hour(s.hour())),
        }
    }

    /// Delay in minutes if the record has both scheduled and actual times.
    ///
    /// Records without this value are excluded from every delay statistic.
    pub fn eligible_delay(&self) -> Option<i64> {
        match (self.scheduled, self.actual) {
            (Some(s), Some(a)) => Some(self.delay_minutes.unwrap_or((a - s).num_minutes())),
            _ => None,
        }
    }
}

/// ISO-8601 layouts RFC 3339 rejects: minutes-only times and offsets
/// without a colon. `%.f` is optional when parsing.
const LOOSE_OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Parses an ISO-8601 timestamp carrying `Z` or an explicit offset.
///
/// Keeps the wall-clock time as written, truncated to the minute. Returns
/// `None` for anything unparseable.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let parsed = match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            let zulu = value.strip_suffix(['Z', 'z']).map(|rest| format!("{rest}+00:00"));
            let candidate = zulu.as_deref().unwrap_or(value);
            match LOOSE_OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(candidate, format).ok())
            {
                Some(parsed) => parsed,
                None => {
                    debug!(value, error = %e, "Unparseable timestamp treated as absent");
                    return None;
                }
            }
        }
    };

    parsed
        .naive_local()
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
}

/// `Option<NaiveDateTime>` as `YYYY-MM-DD HH:MM`, with an empty field for
/// `None`.
mod minute_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_some(&t.format(TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RawAirport;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn arrival(city: Option<&str>, scheduled: Option<&str>, actual: Option<&str>) -> RawFlight {
        RawFlight {
            operator: Some("TAP".into()),
            flight_number: Some("1013".into()),
            cancelled: Some(false),
            origin: Some(RawAirport {
                code: None,
                city: city.map(String::from),
            }),
            scheduled_in: scheduled.map(String::from),
            actual_in: actual.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_timestamp_utc_suffix() {
        assert_eq!(
            parse_timestamp("2024-03-04T07:15:00Z"),
            Some(at(2024, 3, 4, 7, 15))
        );
    }

    #[test]
    fn test_parse_timestamp_keeps_written_offset_clock() {
        assert_eq!(
            parse_timestamp("2024-03-04T23:50:00+01:00"),
            Some(at(2024, 3, 4, 23, 50))
        );
    }

    #[test]
    fn test_parse_timestamp_truncates_seconds() {
        assert_eq!(
            parse_timestamp("2024-03-04T07:15:59.900Z"),
            Some(at(2024, 3, 4, 7, 15))
        );
    }

    #[test]
    fn test_parse_timestamp_minute_precision() {
        assert_eq!(
            parse_timestamp("2024-03-04T07:15Z"),
            Some(at(2024, 3, 4, 7, 15))
        );
        assert_eq!(
            parse_timestamp("2024-03-04T07:15+01:00"),
            Some(at(2024, 3, 4, 7, 15))
        );
    }

    #[test]
    fn test_parse_timestamp_offset_without_colon() {
        assert_eq!(
            parse_timestamp("2024-03-04T07:15:00+0100"),
            Some(at(2024, 3, 4, 7, 15))
        );
        assert_eq!(
            parse_timestamp("2024-03-04T07:15:42.5-0300"),
            Some(at(2024, 3, 4, 7, 15))
        );
    }

    #[test]
    fn test_parse_timestamp_malformed_is_absent() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("N/A"), None);
        assert_eq!(parse_timestamp("2024-13-40T99:00:00Z"), None);
        assert_eq!(parse_timestamp("2024-03-04T07:15"), None);
    }

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Early);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Early);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Evening);
    }

    #[test]
    fn test_from_raw_full_arrival() {
        let raw = arrival(
            Some("Madrid"),
            Some("2024-03-04T07:15:00Z"),
            Some("2024-03-04T07:52:00Z"),
        );
        let r = FlightRecord::from_raw(&raw, Direction::Arrival);

        assert_eq!(r.direction, Direction::Arrival);
        assert_eq!(r.operator, "TAP");
        assert_eq!(r.counterpart_city, "Madrid");
        assert!(r.is_schengen);
        assert_eq!(r.delay_minutes, Some(37));
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(r.day_of_week.as_deref(), Some("Monday"));
        assert_eq!(r.time_of_day, Some(TimeOfDay::Morning));
        assert_eq!(r.eligible_delay(), Some(37));
    }

    #[test]
    fn test_from_raw_early_arrival_has_negative_delay() {
        let raw = arrival(
            Some("London"),
            Some("2024-03-04T19:00:00Z"),
            Some("2024-03-04T18:48:30Z"),
        );
        let r = FlightRecord::from_raw(&raw, Direction::Arrival);

        assert_eq!(r.delay_minutes, Some(-12));
        assert!(!r.is_schengen);
        assert_eq!(r.time_of_day, Some(TimeOfDay::Evening));
    }

    #[test]
    fn test_from_raw_missing_fields_use_defaults() {
        let r = FlightRecord::from_raw(&RawFlight::default(), Direction::Departure);

        assert_eq!(r.operator, UNKNOWN);
        assert_eq!(r.flight_number, UNKNOWN);
        assert_eq!(r.counterpart_city, UNKNOWN);
        assert!(!r.cancelled);
        assert!(!r.is_schengen);
        assert_eq!(r.scheduled, None);
        assert_eq!(r.delay_minutes, None);
        assert_eq!(r.date, None);
        assert_eq!(r.day_of_week, None);
        assert_eq!(r.time_of_day, None);
    }

    #[test]
    fn test_from_raw_without_actual_keeps_calendar_fields() {
        let raw = arrival(Some("Paris"), Some("2024-03-05T13:00:00Z"), None);
        let r = FlightRecord::from_raw(&raw, Direction::Arrival);

        assert_eq!(r.delay_minutes, None);
        assert_eq!(r.eligible_delay(), None);
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(r.time_of_day, Some(TimeOfDay::Afternoon));
    }

    #[test]
    fn test_from_raw_without_scheduled_has_no_derived_fields() {
        let raw = arrival(Some("Paris"), None, Some("2024-03-05T13:00:00Z"));
        let r = FlightRecord::from_raw(&raw, Direction::Arrival);

        assert!(r.actual.is_some());
        assert_eq!(r.delay_minutes, None);
        assert_eq!(r.date, None);
        assert_eq!(r.day_of_week, None);
        assert_eq!(r.time_of_day, None);
    }

    #[test]
    fn test_from_raw_departure_reads_departure_fields() {
        let raw = RawFlight {
            destination: Some(RawAirport {
                code: None,
                city: Some("Timbuktu".into()),
            }),
            scheduled_in: Some("2024-03-04T07:00:00Z".into()),
            scheduled_off: Some("2024-03-04T10:00:00Z".into()),
            actual_off: Some("2024-03-04T11:05:00Z".into()),
            ..Default::default()
        };
        let r = FlightRecord::from_raw(&raw, Direction::Departure);

        assert_eq!(r.counterpart_city, "Timbuktu");
        assert!(!r.is_schengen);
        assert_eq!(r.scheduled, Some(at(2024, 3, 4, 10, 0)));
        assert_eq!(r.delay_minutes, Some(65));
    }

    #[test]
    fn test_malformed_actual_is_absent_not_error() {
        let raw = arrival(Some("Rome"), Some("2024-03-04T07:15:00Z"), Some("garbage"));
        let r = FlightRecord::from_raw(&raw, Direction::Arrival);

        assert_eq!(r.actual, None);
        assert_eq!(r.delay_minutes, None);
    }
}
