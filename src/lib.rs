//! flowsense: flow temporal feature extraction and attack decision engine.
//!
//! Modular structure:
//! - [`packets`]: Raw record validation, flow and forward/backward split
//! - [`features`]: Inter-arrival and idle statistics, 12-dim feature vector
//! - [`model`]: Classifier capability (ONNX inference)
//! - [`decision`]: Probability threshold policy
//! - [`engine`]: Linear per-flow pipeline tying the above together
//! - [`server`]: `/health` and `/predict` HTTP surface
//! - [`logging`]: Structured JSON logging

pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod packets;
pub mod server;

pub use config::EngineConfig;
pub use decision::{Decision, DecisionPolicy, Verdict};
pub use engine::{Analysis, FlowEngine};
pub use error::{ClassificationError, ConfigError, EngineError, FlowError};
pub use features::{FeatureExtractor, FeatureVector, FEATURE_COUNT};
pub use logging::StructuredLogger;
pub use model::{Classifier, OnnxClassifier, UnavailableModel};
pub use packets::{Flow, PacketEvent, RawPacket};
