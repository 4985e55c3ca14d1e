use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;

use crate::analyzers::bucket::delay_breakdown;
use crate::analyzers::types::{ByTimeOfDay, BySchengen, DirectionStats, WeeklyEntry};
use crate::analyzers::utility::{round_even, rounded_mean};
use crate::record::FlightRecord;

/// Aggregates the records of one flight direction into [`DirectionStats`].
///
/// Only delay-eligible records (scheduled and actual time both known) feed
/// any statistic, including the per-day flight count. Every partition that
/// ends up empty reports zeros instead of failing.
pub fn aggregate_direction(records: &[FlightRecord]) -> DirectionStats {
    let eligible: Vec<&FlightRecord> = records
        .iter()
        .filter(|r| r.eligible_delay().is_some())
        .collect();

    let days_tracked = eligible
        .iter()
        .filter_map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .len();

    let flights_per_day = if days_tracked == 0 {
        0
    } else {
        round_even(eligible.len() as f64 / days_tracked as f64)
    };

    DirectionStats {
        flights_per_day,
        days_tracked,
        average_delay: rounded_mean(eligible.iter().filter_map(|r| r.eligible_delay())),
        delays: delay_breakdown(eligible.iter().copied()),
        time_of_day: ByTimeOfDay::from_fn(|band| {
            delay_breakdown(
                eligible
                    .iter()
                    .copied()
                    .filter(|r| r.time_of_day == Some(band)),
            )
        }),
        schengen: BySchengen::from_fn(|schengen| {
            delay_breakdown(
                eligible
                    .iter()
                    .copied()
                    .filter(|r| r.is_schengen == schengen),
            )
        }),
        heatmap: BySchengen::from_fn(|schengen| {
            ByTimeOfDay::from_fn(|band| {
                rounded_mean(
                    eligible
                        .iter()
                        .filter(|r| r.is_schengen == schengen && r.time_of_day == Some(band))
                        .filter_map(|r| r.eligible_delay()),
                )
            })
        }),
        weekly_data: weekly_breakdown(&eligible),
    }
}

/// Delay breakdown per ISO week number, ascending.
///
/// The ISO year is ignored, so the same week number from different years
/// lands in one entry.
fn weekly_breakdown(records: &[&FlightRecord]) -> Vec<WeeklyEntry> {
    let mut weeks: BTreeMap<u32, Vec<&FlightRecord>> = BTreeMap::new();
    for &record in records {
        if let Some(date) = record.date {
            weeks.entry(date.iso_week().week()).or_default().push(record);
        }
    }

    weeks
        .into_iter()
        .map(|(week, rows)| WeeklyEntry {
            week: format!("Week {week}"),
            delays: delay_breakdown(rows),
        })
        .collect()
}
