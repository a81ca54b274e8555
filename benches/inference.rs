//! Decision benchmark: feature vector → classifier → thresholded verdict.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flowsense::config::{DecisionConfig, EngineConfig};
use flowsense::decision::DecisionPolicy;
use flowsense::error::ClassificationError;
use flowsense::features::FeatureVector;
use flowsense::model::{Classifier, ModelInfo};
use flowsense::packets::RawPacket;
use flowsense::FlowEngine;
use std::path::PathBuf;
use std::sync::Arc;

/// Fixed-weight logistic score, standing in for a loaded model.
struct Logistic;

impl Classifier for Logistic {
    fn score(&self, features: &FeatureVector) -> Result<f64, ClassificationError> {
        let z: f64 = features.to_array().iter().map(|v| v * 1e-7).sum::<f64>() - 0.5;
        Ok(1.0 / (1.0 + (-z).exp()))
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            loaded: true,
            path: PathBuf::from("bench"),
            sha256: None,
        }
    }
}

fn bench_decide(c: &mut Criterion) {
    let policy = DecisionPolicy::new(DecisionConfig::default());
    let fv = FeatureVector {
        flow_duration: 111_111.0,
        flow_iat_mean: 111_111.0,
        flow_iat_max: 111_111.0,
        ..FeatureVector::default()
    };
    c.bench_function("decide_stub_model", |b| {
        b.iter(|| policy.decide(black_box(&fv), &Logistic).unwrap())
    });
}

fn bench_analyze(c: &mut Criterion) {
    let engine = FlowEngine::new(&EngineConfig::default(), Arc::new(Logistic));
    let records = vec![
        RawPacket::new("2025-03-19T15:43:22.123456", "10.0.0.1", 54321, "10.0.0.2", 80),
        RawPacket::new("2025-03-19T15:43:22.234567", "10.0.0.2", 80, "10.0.0.1", 54321),
        RawPacket::new("2025-03-19T15:43:24.000001", "10.0.0.1", 54321, "10.0.0.2", 80),
    ];
    c.bench_function("analyze_3_packets", |b| {
        b.iter(|| engine.analyze(black_box(&records)).unwrap())
    });
}

criterion_group!(benches, bench_decide, bench_analyze);
criterion_main!(benches);
