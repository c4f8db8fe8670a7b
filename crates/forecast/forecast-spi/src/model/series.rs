//! Series and horizon value types.

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Ordered real-valued observations, implicitly indexed `0..n-1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<f64>);

impl Series {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split into `(train, holdout)` with a holdout of exactly `horizon`
    /// points.
    ///
    /// Requires `len > horizon` so both parts are non-empty.
    pub fn split_holdout(&self, horizon: Horizon) -> Result<(&[f64], &[f64])> {
        let h = horizon.get();
        if self.len() <= h {
            return Err(ForecastError::InsufficientData {
                series_len: self.len(),
                horizon: h,
            });
        }
        Ok(self.0.split_at(self.len() - h))
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for Series {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

/// Number of future points to predict; always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Horizon(usize);

impl Horizon {
    pub fn new(steps: usize) -> Result<Self> {
        if steps == 0 {
            return Err(ForecastError::InvalidInput(
                "horizon must be at least 1".to_string(),
            ));
        }
        Ok(Self(steps))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for Horizon {
    type Error = ForecastError;

    fn try_from(steps: usize) -> Result<Self> {
        Self::new(steps)
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_rejects_zero() {
        assert!(matches!(Horizon::new(0), Err(ForecastError::InvalidInput(_))));
        assert_eq!(Horizon::new(3).unwrap().get(), 3);
    }

    #[test]
    fn test_split_holdout_lengths() {
        let series = Series::from((1..=10).map(|x| x as f64).collect::<Vec<_>>());
        let (train, holdout) = series.split_holdout(Horizon::new(3).unwrap()).unwrap();
        assert_eq!(train.len(), 7);
        assert_eq!(holdout, &[8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_split_holdout_needs_longer_series() {
        let series = Series::from(vec![1.0, 2.0, 3.0]);
        let err = series.split_holdout(Horizon::new(3).unwrap()).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                series_len: 3,
                horizon: 3
            }
        );

        let empty = Series::default();
        assert!(empty.split_holdout(Horizon::new(1).unwrap()).is_err());
    }
}
