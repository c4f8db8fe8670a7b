//! Algorithm Core Implementations
//!
//! The forecasting algorithms behind the model catalog, organized by category:
//!
//! - [`smoothing`]: exponential smoothing family (SES, ETS, CES, Theta)
//! - [`regression`]: ARIMA with automatic order selection
//! - [`baseline`]: naive, seasonal naive and window average benchmarks
//! - [`intermittent`]: ADIDA for intermittent demand
//! - [`utils`]: accuracy metrics
//!
//! Every algorithm implements [`Predictor`]; all parameter searches run over
//! fixed grids, so fitting is deterministic.
//!
//! ## Example
//!
//! ```rust
//! use algorithm_core::prelude::*;
//!
//! let data: Vec<f64> = (1..=20).map(|x| x as f64).collect();
//! let mut model = AutoArima::new();
//! model.fit(&data).unwrap();
//! let forecast = model.predict(3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

pub mod baseline;
pub mod intermittent;
pub mod regression;
pub mod smoothing;
pub mod utils;

// Re-export from SPI
pub use algorithm_spi::{ensure_fit_data, Predictor, Result, TsError};

pub use baseline::*;
pub use intermittent::*;
pub use regression::*;
pub use smoothing::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use algorithm_spi::Predictor;
    pub use crate::baseline::{Naive, SeasonalNaive, WindowAverage};
    pub use crate::intermittent::Adida;
    pub use crate::regression::AutoArima;
    pub use crate::smoothing::{AutoCes, AutoEts, AutoTheta, SimpleExponentialSmoothing, Theta};
    pub use algorithm_spi::{Result, TsError};
}
