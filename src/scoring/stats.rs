//! Small descriptive-statistics helpers over a single variable's samples.

/// Number of samples in each trend window.
pub const WINDOW: usize = 5;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    // ---
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation around `mean`.
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    // ---
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Count samples further than two standard deviations from the mean.
pub fn count_outliers(values: &[f64]) -> u32 {
    // ---
    let Some(mean) = mean(values) else {
        return 0;
    };
    let sd = std_dev(values, mean);
    values.iter().filter(|v| (*v - mean).abs() > 2.0 * sd).count() as u32
}

/// Split a series into its `(older, recent)` trend windows.
///
/// `recent` holds the last [`WINDOW`] samples and `older` the up to
/// [`WINDOW`] samples before them. `older` is empty for short series.
pub fn trend_windows(values: &[f64]) -> (&[f64], &[f64]) {
    // ---
    let len = values.len();
    let recent_start = len.saturating_sub(WINDOW);
    let older_start = len.saturating_sub(2 * WINDOW);
    (&values[older_start..recent_start], &values[recent_start..])
}

/// Collect the present values of one measurement across readings.
pub fn present<T, F>(items: &[T], field: F) -> Vec<f64>
where
    F: Fn(&T) -> Option<f64>,
{
    // ---
    items.iter().filter_map(field).filter(|v| v.is_finite()).collect()
}
