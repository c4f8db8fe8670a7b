//! Final forecast produced for a request.

use serde::{Deserialize, Serialize};

/// The model that produced the forecast and its point predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Kind identifier of the resolved or selected model
    pub model: String,
    /// Exactly `horizon` values in chronological order
    pub predictions: Vec<f64>,
}
