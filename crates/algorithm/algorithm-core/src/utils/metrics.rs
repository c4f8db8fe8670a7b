//! Forecast accuracy metrics
//!
//! All metrics return `NaN` when the slices differ in length or are empty;
//! callers that treat a mismatch as a defect must check lengths first.

/// Mean Squared Error (MSE)
///
/// Average of squared differences. Penalizes large errors more heavily.
/// Lower is better.
///
/// # Example
///
/// ```rust
/// use algorithm_core::utils::metrics::mse;
///
/// let actual = vec![8.0, 9.0, 10.0];
/// let predicted = vec![8.0, 9.0, 12.0];
/// assert!((mse(&actual, &predicted) - 4.0 / 3.0).abs() < 1e-12);
/// ```
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    sum / actual.len() as f64
}

/// Mean Absolute Error (MAE)
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    sum / actual.len() as f64
}

/// Root Mean Squared Error (RMSE)
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}
