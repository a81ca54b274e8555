//! Combines the classifier probability with the configured threshold; the
//! boundary is inclusive of attack.

use crate::config::DecisionConfig;
use crate::error::ClassificationError;
use crate::features::FeatureVector;
use crate::model::Classifier;
use serde::{Deserialize, Serialize};

/// Wire-level outcome: `{prediction: 0|1, is_attack: bool}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub prediction: u8,
    pub is_attack: bool,
}

impl Decision {
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        let prediction = u8::from(probability >= threshold);
        Self {
            prediction,
            is_attack: prediction == 1,
        }
    }
}

/// Decision plus what it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    pub decision: Decision,
    pub probability: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    config: DecisionConfig,
}

impl DecisionPolicy {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    /// Score once and threshold. Classifier errors and out-of-range
    /// probabilities are returned, never turned into a label.
    pub fn decide(
        &self,
        features: &FeatureVector,
        classifier: &dyn Classifier,
    ) -> Result<Verdict, ClassificationError> {
        let probability = classifier.score(features)?;
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(ClassificationError::InvalidProbability(probability));
        }
        let threshold = self.config.prediction_threshold;
        Ok(Verdict {
            decision: Decision::from_probability(probability, threshold),
            probability,
            threshold,
        })
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }
}
