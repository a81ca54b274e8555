//! Classifier capability: `score(features) -> probability of attack`.
//!
//! Loaded once at startup and shared read-only; implementations must be
//! `Send + Sync`.

mod onnx;

pub use onnx::OnnxClassifier;

use crate::error::ClassificationError;
use crate::features::FeatureVector;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub trait Classifier: Send + Sync {
    /// Probability in [0, 1] that the flow is an attack.
    fn score(&self, features: &FeatureVector) -> Result<f64, ClassificationError>;

    /// What is loaded, for health reporting.
    fn info(&self) -> ModelInfo;
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub loaded: bool,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Stands in when the artifact could not be loaded: the service stays up for
/// health checks but every score call fails.
#[derive(Debug, Clone)]
pub struct UnavailableModel {
    path: PathBuf,
    reason: String,
}

impl UnavailableModel {
    pub fn new(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl Classifier for UnavailableModel {
    fn score(&self, _features: &FeatureVector) -> Result<f64, ClassificationError> {
        Err(ClassificationError::ModelNotLoaded {
            path: self.path.clone(),
            reason: self.reason.clone(),
        })
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            loaded: false,
            path: self.path.clone(),
            sha256: None,
        }
    }
}
