use chrono::{DateTime, Utc};

use crate::analyzers::aggregate::aggregate_direction;
use crate::analyzers::types::{AnalysisReport, DirectionReport};
use crate::config::ReportMetadata;
use crate::record::FlightRecord;

const LAST_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Builds the full report, stamping both directions with the current time.
pub fn assemble(
    arrivals: &[FlightRecord],
    departures: &[FlightRecord],
    metadata: &ReportMetadata,
) -> AnalysisReport {
    assemble_at(arrivals, departures, metadata, Utc::now())
}

/// Same as [`assemble`] with an explicit capture time.
pub fn assemble_at(
    arrivals: &[FlightRecord],
    departures: &[FlightRecord],
    metadata: &ReportMetadata,
    captured_at: DateTime<Utc>,
) -> AnalysisReport {
    let last_updated = captured_at.format(LAST_UPDATED_FORMAT).to_string();

    AnalysisReport {
        arrivals: DirectionReport {
            stats: aggregate_direction(arrivals),
            last_updated: last_updated.clone(),
        },
        departures: DirectionReport {
            stats: aggregate_direction(departures),
            last_updated,
        },
        metadata: metadata.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{RawAirport, RawFlight};
    use crate::record::Direction;
    use chrono::TimeZone;

    fn departure(city: &str, scheduled: &str, actual: &str) -> FlightRecord {
        let raw = RawFlight {
            destination: Some(RawAirport {
                code: None,
                city: Some(city.into()),
            }),
            scheduled_off: Some(scheduled.into()),
            actual_off: Some(actual.into()),
            ..Default::default()
        };
        FlightRecord::from_raw(&raw, Direction::Departure)
    }

    fn captured() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, 6, 30, 5).unwrap()
    }

    #[test]
    fn test_assemble_stamps_both_directions() {
        let report = assemble_at(&[], &[], &ReportMetadata::default(), captured());

        assert_eq!(report.arrivals.last_updated, "2024-03-11T06:30:05Z");
        assert_eq!(report.departures.last_updated, "2024-03-11T06:30:05Z");
        assert_eq!(report.metadata, ReportMetadata::default());
    }

    #[test]
    fn test_assemble_runs_each_direction_separately() {
        let departures = vec![departure(
            "Berlin",
            "2024-03-04T10:00:00Z",
            "2024-03-04T10:40:00Z",
        )];

        let report = assemble_at(&[], &departures, &ReportMetadata::default(), captured());

        assert_eq!(report.arrivals.stats.days_tracked, 0);
        assert_eq!(report.departures.stats.days_tracked, 1);
        assert_eq!(report.departures.stats.average_delay, 40);
        assert_eq!(report.departures.stats.schengen.schengen.medium, 100);
    }

    #[test]
    fn test_report_json_shape() {
        let departures = vec![departure(
            "Berlin",
            "2024-03-04T10:00:00Z",
            "2024-03-04T10:40:00Z",
        )];
        let report = assemble_at(&[], &departures, &ReportMetadata::default(), captured());
        let json = serde_json::to_value(&report).unwrap();

        let dep = &json["departures"];
        assert_eq!(dep["flightsPerDay"], 1);
        assert_eq!(dep["daysTracked"], 1);
        assert_eq!(dep["averageDelay"], 40);
        assert_eq!(dep["delays"]["medium"], 100);
        assert_eq!(dep["delays"]["onTime"], 0);
        assert_eq!(dep["timeOfDay"]["morning"]["medium"], 100);
        assert_eq!(dep["schengen"]["nonSchengen"]["major"], 0);
        assert_eq!(dep["heatmap"]["schengen"]["morning"], 40);
        assert_eq!(dep["weeklyData"][0]["week"], "Week 10");
        assert_eq!(dep["weeklyData"][0]["medium"], 100);
        assert_eq!(dep["lastUpdated"], "2024-03-11T06:30:05Z");
        assert_eq!(json["metadata"]["airport"], "LIS");
        assert_eq!(json["arrivals"]["weeklyData"], serde_json::json!([]));
    }

    #[test]
    fn test_report_has_no_float_leaves() {
        fn assert_no_floats(value: &serde_json::Value) {
            match value {
                serde_json::Value::Number(n) => assert!(!n.is_f64(), "float leaf {n}"),
                serde_json::Value::Array(items) => items.iter().for_each(assert_no_floats),
                serde_json::Value::Object(map) => map.values().for_each(assert_no_floats),
                _ => {}
            }
        }

        let departures = vec![
            departure("Berlin", "2024-03-04T10:00:00Z", "2024-03-04T10:40:00Z"),
            departure("London", "2024-03-05T19:00:00Z", "2024-03-05T19:03:00Z"),
            departure("Oslo", "2024-03-05T03:00:00Z", "2024-03-05T04:30:00Z"),
        ];
        let report = assemble_at(&departures, &departures, &ReportMetadata::default(), captured());

        assert_no_floats(&serde_json::to_value(&report).unwrap());
    }
}
