//! Summaries over rate columns where any cell may be absent.

/// Mean of the present values, summed in iteration order. Absent values
/// count toward neither the sum nor the divisor; `None` when nothing is
/// present.
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Largest value, or `None` for an empty input. NaN never wins over a number.
pub fn max_value<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().reduce(f64::max)
}
