//! Data types produced by the aggregation pipeline.
//!
//! Every leaf is an integer or a string so the JSON report never carries
//! floating-point noise.

use serde::{Deserialize, Serialize};

use crate::config::ReportMetadata;
use crate::record::TimeOfDay;

/// Share of flights per delay band, in whole percent.
///
/// Sums to exactly 100 for a non-empty partition and is all zeros for an
/// empty one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayBreakdown {
    pub on_time: u32,
    pub minor: u32,
    pub medium: u32,
    pub major: u32,
}

impl DelayBreakdown {
    pub fn total(&self) -> u32 {
        self.on_time + self.minor + self.medium + self.major
    }
}

impl From<[u32; 4]> for DelayBreakdown {
    fn from([on_time, minor, medium, major]: [u32; 4]) -> Self {
        DelayBreakdown {
            on_time,
            minor,
            medium,
            major,
        }
    }
}

/// One value per [`TimeOfDay`] band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByTimeOfDay<T> {
    pub early: T,
    pub morning: T,
    pub afternoon: T,
    pub evening: T,
}

impl<T> ByTimeOfDay<T> {
    /// Calls `f` once per band, in chronological order.
    pub fn from_fn(f: impl FnMut(TimeOfDay) -> T) -> Self {
        let [early, morning, afternoon, evening] = TimeOfDay::ALL.map(f);
        ByTimeOfDay {
            early,
            morning,
            afternoon,
            evening,
        }
    }
}

/// One value for Schengen counterparts and one for everything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BySchengen<T> {
    pub schengen: T,
    pub non_schengen: T,
}

impl<T> BySchengen<T> {
    /// `f` receives `true` for the Schengen side.
    pub fn from_fn(mut f: impl FnMut(bool) -> T) -> Self {
        BySchengen {
            schengen: f(true),
            non_schengen: f(false),
        }
    }
}

/// Delay breakdown for one ISO week, labelled `"Week <n>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyEntry {
    pub week: String,
    #[serde(flatten)]
    pub delays: DelayBreakdown,
}

/// Everything computed from the records of one flight direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionStats {
    pub flights_per_day: i64,
    pub days_tracked: usize,
    pub average_delay: i64,
    pub delays: DelayBreakdown,
    pub time_of_day: ByTimeOfDay<DelayBreakdown>,
    pub schengen: BySchengen<DelayBreakdown>,
    /// Rounded mean delay in minutes per cell.
    pub heatmap: BySchengen<ByTimeOfDay<i64>>,
    pub weekly_data: Vec<WeeklyEntry>,
}

/// [`DirectionStats`] stamped with the time they were computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionReport {
    #[serde(flatten)]
    pub stats: DirectionStats,
    /// UTC capture time, `YYYY-MM-DDTHH:MM:SSZ`.
    pub last_updated: String,
}

/// Complete dashboard payload, written as `flight-data.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub arrivals: DirectionReport,
    pub departures: DirectionReport,
    pub metadata: ReportMetadata,
}
