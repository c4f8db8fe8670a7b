//! Series Adapter

use forecast_api::DEFAULT_SERIES_ID;
use forecast_spi::{CanonicalFrame, ForecastError, Result};

/// Converts raw observations into the canonical `(unique_id, ds, y)` frame.
#[derive(Debug, Clone)]
pub struct SeriesAdapter {
    series_id: String,
}

impl Default for SeriesAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_SERIES_ID)
    }
}

impl SeriesAdapter {
    pub fn new(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
        }
    }

    /// Assign the constant identifier and the time index `0..len`.
    ///
    /// An empty series is `InvalidInput`.
    pub fn to_canonical(&self, values: &[f64]) -> Result<CanonicalFrame> {
        if values.is_empty() {
            return Err(ForecastError::InvalidInput(
                "series must contain at least one observation".to_string(),
            ));
        }

        Ok(CanonicalFrame {
            unique_id: self.series_id.clone(),
            ds: (0..values.len()).collect(),
            y: values.to_vec(),
        })
    }
}
