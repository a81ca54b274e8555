//! One flow in, one verdict out: validate → assemble → stats → vector → decide.

use crate::config::EngineConfig;
use crate::decision::{DecisionPolicy, Verdict};
use crate::error::{EngineError, FlowError};
use crate::features::{FeatureExtractor, FlowFeatures};
use crate::model::{Classifier, ModelInfo};
use crate::packets::{self, RawPacket};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Analysis {
    pub features: FlowFeatures,
    pub verdict: Verdict,
}

/// Holds only immutable configuration and the shared classifier, so one
/// instance serves any number of concurrent callers.
#[derive(Clone)]
pub struct FlowEngine {
    extractor: FeatureExtractor,
    policy: DecisionPolicy,
    classifier: Arc<dyn Classifier>,
}

impl FlowEngine {
    pub fn new(config: &EngineConfig, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            extractor: FeatureExtractor::new(config.features.clone()),
            policy: DecisionPolicy::new(config.decision.clone()),
            classifier,
        }
    }

    /// Features only; needs no model.
    pub fn extract(&self, records: &[RawPacket]) -> Result<FlowFeatures, FlowError> {
        let flow = packets::validate(records)?;
        Ok(self.extractor.extract(&flow))
    }

    pub fn analyze(&self, records: &[RawPacket]) -> Result<Analysis, EngineError> {
        let features = self.extract(records)?;
        let verdict = self.policy.decide(&features.vector, self.classifier.as_ref())?;
        Ok(Analysis { features, verdict })
    }

    pub fn model_info(&self) -> ModelInfo {
        self.classifier.info()
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }
}
