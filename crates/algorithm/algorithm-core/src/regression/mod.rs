//! Regression-based statistical models
//!
//! ## Algorithms
//!
//! - **AutoARIMA**: AutoRegressive Integrated Moving Average with automatic
//!   differencing and order selection

pub mod arima;

pub use arima::AutoArima;
