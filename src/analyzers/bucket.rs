use crate::analyzers::types::DelayBreakdown;
use crate::analyzers::utility::{pct, round_even};
use crate::record::FlightRecord;

/// Ordinal severity band of a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DelayBand {
    OnTime,
    Minor,
    Medium,
    Major,
}

impl DelayBand {
    pub const ALL: [DelayBand; 4] = [
        DelayBand::OnTime,
        DelayBand::Minor,
        DelayBand::Medium,
        DelayBand::Major,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Classifies a delay in minutes.
///
/// | Delay        | Band   |
/// |--------------|--------|
/// | < 5          | OnTime |
/// | 5 ..= 30     | Minor  |
/// | 31 ..= 60    | Medium |
/// | > 60         | Major  |
pub fn classify(delay: i64) -> DelayBand {
    match delay {
        d if d < 5 => DelayBand::OnTime,
        d if d <= 30 => DelayBand::Minor,
        d if d <= 60 => DelayBand::Medium,
        _ => DelayBand::Major,
    }
}

/// Rounds four band percentages to integers that sum to exactly 100.
///
/// Each value is rounded on its own; any leftover is added in full to the
/// band with the largest raw percentage (the earliest band on ties). All-zero
/// input stays all zero.
pub fn reconcile(raw: [f64; 4]) -> [u32; 4] {
    if raw.iter().all(|p| *p == 0.0) {
        return [0; 4];
    }

    let mut rounded = raw.map(round_even);
    let diff = 100 - rounded.iter().sum::<i64>();

    if diff != 0 {
        let largest = (1..raw.len()).fold(0, |best, i| if raw[i] > raw[best] { i } else { best });
        rounded[largest] += diff;
    }

    rounded.map(|v| v.max(0) as u32)
}

/// Percentage of delay-eligible records in each band.
///
/// Records without both timestamps are skipped entirely; if none remain the
/// result is the all-zero breakdown.
pub fn delay_breakdown<'a>(records: impl IntoIterator<Item = &'a FlightRecord>) -> DelayBreakdown {
    let mut counts = [0usize; 4];
    for delay in records.into_iter().filter_map(FlightRecord::eligible_delay) {
        counts[classify(delay).index()] += 1;
    }

    let total: usize = counts.iter().sum();
    if total == 0 {
        return DelayBreakdown::default();
    }

    reconcile(counts.map(|c| pct(c, total))).into()
}
