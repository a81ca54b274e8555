//! Temporal feature extraction: flow → inter-arrival statistics → 12-dim vector.

mod idle;
mod pipeline;
mod stats;

pub use idle::IdleStats;
pub use pipeline::{FeatureExtractor, FlowFeatures, FlowStats};
pub use stats::{deltas, Aggregate};

use serde::{Deserialize, Serialize};

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 12;

/// Column names in model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Fwd IAT Std",
    "Bwd IAT Std",
    "Flow IAT Std",
    "Fwd IAT Max",
    "Flow IAT Mean",
    "Flow IAT Max",
    "Fwd IAT Mean",
    "Fwd IAT Total",
    "Flow Duration",
    "Bwd IAT Max",
    "Idle Max",
    "Idle Mean",
];

/// Fixed-size feature vector for model input. Field order is the model's
/// column order and is also the serialization order. Times are microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "Fwd IAT Std")]
    pub fwd_iat_std: f64,
    #[serde(rename = "Bwd IAT Std")]
    pub bwd_iat_std: f64,
    #[serde(rename = "Flow IAT Std")]
    pub flow_iat_std: f64,
    #[serde(rename = "Fwd IAT Max")]
    pub fwd_iat_max: f64,
    #[serde(rename = "Flow IAT Mean")]
    pub flow_iat_mean: f64,
    #[serde(rename = "Flow IAT Max")]
    pub flow_iat_max: f64,
    #[serde(rename = "Fwd IAT Mean")]
    pub fwd_iat_mean: f64,
    #[serde(rename = "Fwd IAT Total")]
    pub fwd_iat_total: f64,
    #[serde(rename = "Flow Duration")]
    pub flow_duration: f64,
    #[serde(rename = "Bwd IAT Max")]
    pub bwd_iat_max: f64,
    #[serde(rename = "Idle Max")]
    pub idle_max: f64,
    #[serde(rename = "Idle Mean")]
    pub idle_mean: f64,
}

impl FeatureVector {
    /// Project flow statistics onto the model's columns.
    pub fn from_stats(s: &FlowStats) -> Self {
        Self {
            fwd_iat_std: s.forward.std,
            bwd_iat_std: s.backward.std,
            flow_iat_std: s.flow.std,
            fwd_iat_max: s.forward.max,
            flow_iat_mean: s.flow.mean,
            flow_iat_max: s.flow.max,
            fwd_iat_mean: s.forward.mean,
            fwd_iat_total: s.forward.total,
            flow_duration: s.duration_us,
            bwd_iat_max: s.backward.max,
            idle_max: s.idle.max,
            idle_mean: s.idle.mean,
        }
    }

    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.fwd_iat_std,
            self.bwd_iat_std,
            self.flow_iat_std,
            self.fwd_iat_max,
            self.flow_iat_mean,
            self.flow_iat_max,
            self.fwd_iat_mean,
            self.fwd_iat_total,
            self.flow_duration,
            self.bwd_iat_max,
            self.idle_max,
            self.idle_mean,
        ]
    }

    /// Narrowed copy for f32 model inputs.
    pub fn to_f32(&self) -> [f32; FEATURE_COUNT] {
        self.to_array().map(|v| v as f32)
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }
}
