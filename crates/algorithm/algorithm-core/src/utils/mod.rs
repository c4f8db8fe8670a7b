//! Utility functions shared by the algorithms and their callers

pub mod metrics;
