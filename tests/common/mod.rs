#![allow(dead_code)]

use flowsense::error::ClassificationError;
use flowsense::features::FeatureVector;
use flowsense::model::{Classifier, ModelInfo};
use flowsense::packets::RawPacket;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const A: &str = "10.0.0.1";
pub const B: &str = "10.0.0.2";

/// Returns a fixed probability and counts calls.
pub struct StubClassifier {
    pub probability: f64,
    pub calls: AtomicUsize,
}

impl StubClassifier {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for StubClassifier {
    fn score(&self, _features: &FeatureVector) -> Result<f64, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.probability)
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            loaded: true,
            path: PathBuf::from("stub"),
            sha256: None,
        }
    }
}

pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn score(&self, _features: &FeatureVector) -> Result<f64, ClassificationError> {
        Err(ClassificationError::ShapeMismatch {
            expected: "[1, 12]".into(),
            actual: "[1, 10]".into(),
        })
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            loaded: true,
            path: PathBuf::from("failing"),
            sha256: None,
        }
    }
}

/// Packet at `2025-03-19T15:43:22` plus `offset_us`.
pub fn at(offset_us: i64, src: &str, sport: u16, dst: &str, dport: u16) -> RawPacket {
    let base = chrono::NaiveDate::from_ymd_opt(2025, 3, 19)
        .and_then(|d| d.and_hms_opt(15, 43, 22))
        .expect("valid date");
    let ts = base + chrono::Duration::microseconds(offset_us);
    RawPacket::new(ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(), src, sport, dst, dport)
}

/// The two-packet request/response pair used across tests.
pub fn request_response() -> Vec<RawPacket> {
    vec![
        RawPacket::new("2025-03-19T15:43:22.123456", A, 54321, B, 80),
        RawPacket::new("2025-03-19T15:43:22.234567", B, 80, A, 54321),
    ]
}
