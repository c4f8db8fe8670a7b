//! Exponential smoothing family
//!
//! ## Algorithms
//!
//! - **SES**: fixed-alpha simple exponential smoothing
//! - **AutoETS**: additive-error ETS with trend selection by AIC
//! - **AutoCES**: complex exponential smoothing
//! - **Theta / AutoTheta**: SES with linear drift

pub mod ces;
pub mod ets;
pub mod exponential;
pub mod theta;

pub use ces::AutoCes;
pub use ets::{AutoEts, EtsTrend};
pub use exponential::SimpleExponentialSmoothing;
pub use theta::{AutoTheta, Theta};
