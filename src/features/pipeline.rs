//! Extraction pipeline: flow → direction split → IAT and idle stats → vector.

use super::{deltas, Aggregate, FeatureVector, IdleStats};
use crate::config::FeaturesConfig;
use crate::packets::{assemble, DirectionSplit, Flow};
use serde::Serialize;

/// Every statistic computed for a flow, including those the vector omits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FlowStats {
    pub packets: usize,
    /// `t[last] - t[first]` in submission order; negative if reordered
    pub duration_us: f64,
    pub forward: Aggregate,
    pub backward: Aggregate,
    pub flow: Aggregate,
    pub idle: IdleStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowFeatures {
    pub stats: FlowStats,
    pub vector: FeatureVector,
}

/// Stateless; holds only the idle threshold.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    config: FeaturesConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeaturesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeaturesConfig {
        &self.config
    }

    pub fn extract(&self, flow: &Flow) -> FlowFeatures {
        let split = assemble(flow);
        let stats = self.stats(flow, &split);
        FlowFeatures {
            stats,
            vector: FeatureVector::from_stats(&stats),
        }
    }

    pub fn stats(&self, flow: &Flow, split: &DirectionSplit) -> FlowStats {
        let all = flow.micros();
        let flow_deltas = deltas(&all);
        let fwd = deltas(&DirectionSplit::micros(flow, &split.forward));
        let bwd = deltas(&DirectionSplit::micros(flow, &split.backward));

        FlowStats {
            packets: flow.len(),
            duration_us: flow.last().micros().saturating_sub(flow.first().micros()) as f64,
            forward: Aggregate::of(&fwd),
            backward: Aggregate::of(&bwd),
            flow: Aggregate::of(&flow_deltas),
            idle: IdleStats::detect(&flow_deltas, self.config.idle_threshold_us),
        }
    }
}
