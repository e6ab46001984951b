//! Closed-form synthetic benchmark functions.
//!
//! The standard continuous-optimization test functions. All accept any
//! dimension >= 1 except Rosenbrock, which needs >= 2; each has a known
//! global minimum that the tests pin down.

use std::f64::consts::{E, PI};

use super::Benchmark;
use crate::error::{Error, Result};

fn check_not_empty(point: &[f64]) -> Result<()> {
    if point.is_empty() {
        return Err(Error::InvalidPoint("point must not be empty".to_string()));
    }
    Ok(())
}

/// Sum of squares; global minimum 0 at the origin.
pub struct Sphere;

impl Benchmark for Sphere {
    fn name(&self) -> &'static str {
        "sphere"
    }

    fn evaluate(&self, point: &[f64]) -> Result<f64> {
        check_not_empty(point)?;
        Ok(point.iter().map(|x| x * x).sum())
    }
}

/// Banana-valley function; global minimum 0 at (1, ..., 1).
pub struct Rosenbrock;

impl Benchmark for Rosenbrock {
    fn name(&self) -> &'static str {
        "rosenbrock"
    }

    fn evaluate(&self, point: &[f64]) -> Result<f64> {
        if point.len() < 2 {
            return Err(Error::InvalidPoint(
                "rosenbrock needs at least 2 dimensions".to_string(),
            ));
        }
        Ok(point
            .windows(2)
            .map(|pair| {
                let (x, next) = (pair[0], pair[1]);
                100.0 * (next - x * x).powi(2) + (1.0 - x).powi(2)
            })
            .sum())
    }
}

/// Highly multimodal cosine-modulated bowl; global minimum 0 at the origin.
pub struct Rastrigin;

impl Benchmark for Rastrigin {
    fn name(&self) -> &'static str {
        "rastrigin"
    }

    fn evaluate(&self, point: &[f64]) -> Result<f64> {
        check_not_empty(point)?;
        let n = point.len() as f64;
        Ok(10.0 * n
            + point
                .iter()
                .map(|x| x * x - 10.0 * (2.0 * PI * x).cos())
                .sum::<f64>())
    }
}

/// Nearly flat outer region with a deep central funnel; global minimum 0 at
/// the origin.
pub struct Ackley;

impl Benchmark for Ackley {
    fn name(&self) -> &'static str {
        "ackley"
    }

    fn evaluate(&self, point: &[f64]) -> Result<f64> {
        check_not_empty(point)?;
        let n = point.len() as f64;
        let mean_sq = point.iter().map(|x| x * x).sum::<f64>() / n;
        let mean_cos = point.iter().map(|x| (2.0 * PI * x).cos()).sum::<f64>() / n;
        Ok(-20.0 * (-0.2 * mean_sq.sqrt()).exp() - mean_cos.exp() + 20.0 + E)
    }
}

/// Levy function; global minimum 0 at (1, ..., 1).
pub struct Levy;

impl Benchmark for Levy {
    fn name(&self) -> &'static str {
        "levy"
    }

    fn evaluate(&self, point: &[f64]) -> Result<f64> {
        check_not_empty(point)?;
        let w: Vec<f64> = point.iter().map(|x| 1.0 + (x - 1.0) / 4.0).collect();
        let first = (PI * w[0]).sin().powi(2);
        let last = w[w.len() - 1];
        let tail = (last - 1.0).powi(2) * (1.0 + (2.0 * PI * last).sin().powi(2));
        let middle: f64 = w[..w.len() - 1]
            .iter()
            .map(|wi| (wi - 1.0).powi(2) * (1.0 + 10.0 * (PI * wi + 1.0).sin().powi(2)))
            .sum();
        Ok(first + middle + tail)
    }
}
