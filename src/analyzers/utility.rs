/// Rounds to the nearest integer, sending exact halves to the even
/// neighbour. Historical reports were produced with this rule.
pub fn round_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of whole-minute delays rounded with [`round_even`]; 0 for empty input.
pub fn rounded_mean(values: impl IntoIterator<Item = i64>) -> i64 {
    let values: Vec<f64> = values.into_iter().map(|v| v as f64).collect();
    round_even(mean(&values))
}

/// Share of `part` in `total` as a percentage. 0.0 when `total` is 0.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}
