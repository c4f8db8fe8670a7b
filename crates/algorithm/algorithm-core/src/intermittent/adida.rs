//! ADIDA (Aggregate-Disaggregate Intermittent Demand Approach)
//!
//! Intermittent series are mostly zeros, which defeats per-period
//! smoothing. ADIDA removes the intermittency first:
//!
//! 1. The aggregation level `k` is the mean inter-demand interval, rounded
//! 2. The series is summed over non-overlapping buckets of `k` periods,
//!    aligned to the end of the history
//! 3. SES (alpha optimized) forecasts the bucket totals
//! 4. The bucket forecast is spread evenly back over `k` periods

use algorithm_spi::{ensure_fit_data, Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

use crate::smoothing::exponential::{optimize_alpha, ses_pass};

/// ADIDA forecaster for intermittent demand
///
/// # Example
///
/// ```rust
/// use algorithm_core::intermittent::Adida;
/// use algorithm_core::Predictor;
///
/// let demand = vec![0.0, 0.0, 6.0, 0.0, 0.0, 6.0, 0.0, 0.0, 6.0];
/// let mut model = Adida::new();
/// model.fit(&demand).unwrap();
/// assert_eq!(model.aggregation_level(), Some(3));
/// assert_eq!(model.predict(2).unwrap(), vec![2.0, 2.0]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Adida {
    aggregation_level: usize,
    /// Per-period forecast
    rate: f64,
    fitted: bool,
}

impl Adida {
    /// Create an unfitted ADIDA model
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket size chosen during fitting
    pub fn aggregation_level(&self) -> Option<usize> {
        self.fitted.then_some(self.aggregation_level)
    }

    /// Rounded mean interval between non-zero observations, within `1..=n`.
    ///
    /// The first interval is counted from the start of the history.
    fn mean_interval(data: &[f64]) -> Option<usize> {
        let demand_points: Vec<usize> = data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, _)| i)
            .collect();

        let first = *demand_points.first()?;
        let mut total = first + 1;
        for pair in demand_points.windows(2) {
            total += pair[1] - pair[0];
        }

        let mean = total as f64 / demand_points.len() as f64;
        Some((mean.round() as usize).clamp(1, data.len()))
    }

    fn aggregate(data: &[f64], k: usize) -> Vec<f64> {
        let offset = data.len() % k;
        data[offset..].chunks(k).map(|c| c.iter().sum()).collect()
    }
}

impl Predictor for Adida {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, 1)?;

        match Self::mean_interval(data) {
            Some(k) => {
                let buckets = Self::aggregate(data, k);
                let alpha = optimize_alpha(&buckets);
                let (level, _) = ses_pass(&buckets, alpha);
                self.aggregation_level = k;
                self.rate = level / k as f64;
            }
            // No demand at all
            None => {
                self.aggregation_level = 1;
                self.rate = 0.0;
            }
        }

        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }
        Ok(vec![self.rate; steps])
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
