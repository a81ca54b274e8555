//! Idle gaps: combined-flow deltas at or above the configured threshold.

use super::stats::Aggregate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IdleStats {
    pub gaps: usize,
    pub mean: f64,
    pub std: f64,
    pub max: f64,
}

impl IdleStats {
    pub fn detect(flow_deltas: &[f64], threshold_us: u64) -> Self {
        let threshold = threshold_us as f64;
        let gaps: Vec<f64> = flow_deltas
            .iter()
            .copied()
            .filter(|&d| d >= threshold)
            .collect();
        let agg = Aggregate::of(&gaps);
        Self {
            gaps: agg.count,
            mean: agg.mean,
            std: agg.std,
            max: agg.max,
        }
    }
}
