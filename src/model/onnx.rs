//! ONNX Runtime classifier. Input: [1, 12] f32 in model column order.
//! Output: class probabilities [1, 2] (attack = column 1) or a single
//! probability. Exported sklearn models need `zipmap=False`.

use super::{Classifier, ModelInfo};
use crate::error::ClassificationError;
use crate::features::{FeatureVector, FEATURE_COUNT};
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    path: PathBuf,
    sha256: String,
}

impl OnnxClassifier {
    /// Load model from path. Fails if the file is missing or not a valid model;
    /// the caller decides whether to keep serving without it.
    pub fn load(path: &Path) -> Result<Self, ClassificationError> {
        let not_loaded = |reason: String| ClassificationError::ModelNotLoaded {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = std::fs::read(path).map_err(|e| not_loaded(e.to_string()))?;
        let sha256 = format!("{:x}", Sha256::digest(&bytes));

        let session = Session::builder()
            .map_err(|e| not_loaded(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| not_loaded(format!("optimization level: {e}")))?
            .commit_from_memory(&bytes)
            .map_err(|e| not_loaded(e.to_string()))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| not_loaded("model declares no inputs".to_string()))?;
        // sklearn exports (label, probabilities); prefer the probability output.
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.to_ascii_lowercase().contains("prob"))
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| not_loaded("model declares no outputs".to_string()))?;

        tracing::info!(
            path = %path.display(),
            sha256 = %sha256,
            input = %input_name,
            output = %output_name,
            "ONNX model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            path: path.to_path_buf(),
            sha256,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn score(&self, features: &FeatureVector) -> Result<f64, ClassificationError> {
        let arr = Array2::from_shape_vec((1, FEATURE_COUNT), features.to_f32().to_vec())
            .map_err(|e| ClassificationError::ShapeMismatch {
                expected: format!("[1, {FEATURE_COUNT}]"),
                actual: e.to_string(),
            })?;
        let input = Tensor::from_array(arr)
            .map_err(|e| ClassificationError::Inference(format!("input tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassificationError::Poisoned)?;
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| ClassificationError::Inference(e.to_string()))?;
        let out = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            ClassificationError::Inference(format!("missing output {}", self.output_name))
        })?;
        let (_, data) = out
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassificationError::Inference(format!("output tensor: {e}")))?;

        match data {
            [_, attack] => Ok(f64::from(*attack)),
            [p] => Ok(f64::from(*p)),
            other => Err(ClassificationError::ShapeMismatch {
                expected: "1 or 2 probabilities".to_string(),
                actual: format!("{} values", other.len()),
            }),
        }
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            loaded: true,
            path: self.path.clone(),
            sha256: Some(self.sha256.clone()),
        }
    }
}
