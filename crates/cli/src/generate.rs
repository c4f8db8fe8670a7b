//! `generate`: synthetic request payloads for load testing

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde_json::{json, Value};

const SIN_FREQUENCY: f64 = 0.2;

/// Deterministic part of a generated series
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// `x`
    Linear,
    /// `x²`
    Quadratic,
    /// `sin(0.2x)`
    Sin,
    /// `ln(max(x, 1))`
    Log,
}

impl Shape {
    pub fn value(self, x: f64) -> f64 {
        match self {
            Shape::Linear => x,
            Shape::Quadratic => x * x,
            Shape::Sin => (SIN_FREQUENCY * x).sin(),
            Shape::Log => x.max(1.0).ln(),
        }
    }
}

/// `a + shape(x) + N(0, std)` for `x = 0..n`, rounded to two decimals.
pub fn series<R: Rng + ?Sized>(
    shape: Shape,
    n: usize,
    a: f64,
    std: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let noise =
        Normal::new(0.0, std).map_err(|e| anyhow!("invalid noise std {}: {}", std, e))?;
    Ok((0..n)
        .map(|i| round2(a + shape.value(i as f64) + noise.sample(rng)))
        .collect())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Seeded generator, or one seeded from the OS when `seed` is `None`.
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn payload(model: &str, horizon: usize, series: &[f64]) -> Value {
    json!({
        "model": model,
        "horizon": horizon,
        "series": series,
    })
}
