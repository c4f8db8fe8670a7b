//! Forecasting for intermittent (sparse) demand
//!
//! ## Algorithms
//!
//! - **ADIDA**: Aggregate-Disaggregate Intermittent Demand Approach

pub mod adida;

pub use adida::Adida;
