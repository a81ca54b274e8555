//! Inter-arrival deltas and the guarded aggregate every statistic goes through.

use serde::Serialize;

/// Signed consecutive differences, `t[i] - t[i-1]`, in the given order.
/// Out-of-order input yields negative deltas; they are kept.
pub fn deltas(micros: &[i64]) -> Vec<f64> {
    micros
        .windows(2)
        .map(|w| w[1].saturating_sub(w[0]) as f64)
        .collect()
}

/// Mean, sample standard deviation, maximum and sum of a series.
///
/// Undefined statistics are 0.0: an empty series is all zeros, and the
/// standard deviation of fewer than two samples is 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub max: f64,
    pub total: f64,
}

impl Aggregate {
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let total: f64 = values.iter().sum();
        let mean = total / n;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let std = if values.len() < 2 {
            0.0
        } else {
            let ss: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        };
        Self {
            count: values.len(),
            mean: finite_or_zero(mean),
            std: finite_or_zero(std),
            max: finite_or_zero(max),
            total: finite_or_zero(total),
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
