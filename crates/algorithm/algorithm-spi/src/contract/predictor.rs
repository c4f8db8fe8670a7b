//! Predictor trait for forecasting algorithms
//!
//! Defines the uniform fit/predict interface every catalog algorithm implements.

use crate::error::Result;

/// Common trait for all time series predictors
///
/// Instances are stateful: `fit` stores the parameters estimated from the
/// history, and `predict` extrapolates from them. An instance is fitted
/// once and asked for one forecast, then discarded.
///
/// # Example
///
/// ```rust,ignore
/// use algorithm_spi::Predictor;
///
/// fn forecast<P: Predictor>(predictor: &mut P, data: &[f64], horizon: usize) -> algorithm_spi::Result<Vec<f64>> {
///     predictor.fit(data)?;
///     predictor.predict(horizon)
/// }
/// ```
pub trait Predictor: Send {
    /// Fit the model to historical data
    ///
    /// # Arguments
    ///
    /// * `data` - Historical observations in chronological order
    fn fit(&mut self, data: &[f64]) -> Result<()>;

    /// Predict future values
    ///
    /// Returns exactly `steps` point forecasts, in chronological order.
    fn predict(&self, steps: usize) -> Result<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        (**self).fit(data)
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        (**self).predict(steps)
    }

    fn is_fitted(&self) -> bool {
        (**self).is_fitted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TsError;

    /// Mean forecaster used to exercise the contract
    struct MockMeanPredictor {
        mean: Option<f64>,
        min_data_points: usize,
    }

    impl MockMeanPredictor {
        fn new(min_data_points: usize) -> Self {
            Self {
                mean: None,
                min_data_points,
            }
        }
    }

    impl Predictor for MockMeanPredictor {
        fn fit(&mut self, data: &[f64]) -> Result<()> {
            crate::ensure_fit_data(data, self.min_data_points)?;
            self.mean = Some(data.iter().sum::<f64>() / data.len() as f64);
            Ok(())
        }

        fn predict(&self, steps: usize) -> Result<Vec<f64>> {
            match self.mean {
                Some(mean) => Ok(vec![mean; steps]),
                None => Err(TsError::NotFitted),
            }
        }

        fn is_fitted(&self) -> bool {
            self.mean.is_some()
        }
    }

    #[test]
    fn test_predictor_fit_then_predict() {
        let mut predictor = MockMeanPredictor::new(1);
        predictor.fit(&[2.0, 4.0, 6.0]).unwrap();

        assert!(predictor.is_fitted());
        assert_eq!(predictor.predict(3).unwrap(), vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_predictor_predict_not_fitted() {
        let predictor = MockMeanPredictor::new(1);
        assert_eq!(predictor.predict(2).unwrap_err(), TsError::NotFitted);
    }

    #[test]
    fn test_predictor_fit_insufficient_data() {
        let mut predictor = MockMeanPredictor::new(5);
        let result = predictor.fit(&[1.0, 2.0]);

        assert_eq!(
            result.unwrap_err(),
            TsError::InsufficientData {
                required: 5,
                actual: 2
            }
        );
        assert!(!predictor.is_fitted());
    }

    #[test]
    fn test_boxed_trait_object_delegates() {
        let mut boxed: Box<dyn Predictor> = Box::new(MockMeanPredictor::new(1));
        assert!(!boxed.is_fitted());

        boxed.fit(&[1.0, 3.0]).unwrap();
        assert!(boxed.is_fitted());
        assert_eq!(boxed.predict(1).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_predictor_is_send() {
        fn assert_send<T: Send + ?Sized>() {}
        assert_send::<dyn Predictor>();
    }
}
