//! Benchmark forecasters
//!
//! Simple methods that set the bar every other algorithm has to clear:
//!
//! - **Naive**: repeat the last observation
//! - **Seasonal Naive**: repeat the last observed season
//! - **Window Average**: mean of the most recent window

use algorithm_spi::{ensure_fit_data, Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

/// Naive forecaster: every future value equals the last observation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Naive {
    last: Option<f64>,
}

impl Naive {
    /// Create an unfitted naive model
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Predictor for Naive {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, 1)?;
        self.last = data.last().copied();
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let last = self.last.ok_or(TsError::NotFitted)?;
        Ok(vec![last; steps])
    }

    fn is_fitted(&self) -> bool {
        self.last.is_some()
    }
}

/// Seasonal naive forecaster
///
/// Forecast `h` (1-based) equals the observation one full season earlier:
/// `ŷ_{n+h} = y_{n - s + ((h - 1) mod s)}`.
///
/// # Example
///
/// ```rust
/// use algorithm_core::baseline::SeasonalNaive;
/// use algorithm_core::Predictor;
///
/// let mut model = SeasonalNaive::new(3).unwrap();
/// model.fit(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(model.predict(4).unwrap(), vec![4.0, 5.0, 6.0, 4.0]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalNaive {
    season_length: usize,
    last_season: Vec<f64>,
}

impl SeasonalNaive {
    /// Create a seasonal naive model
    ///
    /// # Arguments
    ///
    /// * `season_length` - Observations per season (>= 1)
    pub fn new(season_length: usize) -> Result<Self> {
        if season_length == 0 {
            return Err(TsError::invalid_parameter(
                "season_length",
                "must be at least 1",
            ));
        }

        Ok(Self {
            season_length,
            last_season: Vec::new(),
        })
    }

    /// Observations per season
    pub fn season_length(&self) -> usize {
        self.season_length
    }
}

impl Predictor for SeasonalNaive {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, self.season_length)?;
        self.last_season = data[data.len() - self.season_length..].to_vec();
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(TsError::NotFitted);
        }

        Ok((0..steps)
            .map(|h| self.last_season[h % self.season_length])
            .collect())
    }

    fn is_fitted(&self) -> bool {
        !self.last_season.is_empty()
    }
}

/// Window average forecaster: flat forecast at the mean of the last
/// `window_size` observations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowAverage {
    window_size: usize,
    mean: Option<f64>,
}

impl WindowAverage {
    /// Create a window average model
    ///
    /// # Arguments
    ///
    /// * `window_size` - Number of trailing observations averaged (>= 1)
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(TsError::invalid_parameter(
                "window_size",
                "must be at least 1",
            ));
        }

        Ok(Self {
            window_size,
            mean: None,
        })
    }

    /// Number of trailing observations averaged
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl Predictor for WindowAverage {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        ensure_fit_data(data, self.window_size)?;
        let window = &data[data.len() - self.window_size..];
        self.mean = Some(window.iter().sum::<f64>() / self.window_size as f64);
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        let mean = self.mean.ok_or(TsError::NotFitted)?;
        Ok(vec![mean; steps])
    }

    fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }
}
