//! Error taxonomy: input validation, classification, configuration.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Packet record field, in the order the validator checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketField {
    Timestamp,
    SrcIp,
    DstIp,
    SrcPort,
    DstPort,
}

impl PacketField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PacketField::Timestamp => "timestamp",
            PacketField::SrcIp => "src_ip",
            PacketField::DstIp => "dst_ip",
            PacketField::SrcPort => "src_port",
            PacketField::DstPort => "dst_port",
        }
    }
}

impl fmt::Display for PacketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a packet field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    Missing,
    WrongType { expected: &'static str },
    Empty,
    BadTimestamp(String),
    PortOutOfRange(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::Missing => f.write_str("is missing"),
            MalformedReason::WrongType { expected } => write!(f, "must be {expected}"),
            MalformedReason::Empty => f.write_str("must not be empty"),
            MalformedReason::BadTimestamp(raw) => {
                write!(f, "is not an ISO-8601 timestamp: {raw:?}")
            }
            MalformedReason::PortOutOfRange(raw) => {
                write!(f, "must be in 0..=65535, got {raw}")
            }
        }
    }
}

/// Input errors raised before any statistic is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("flow contains no packets")]
    EmptyFlow,
    #[error("packet {index}: {field} {reason}")]
    MalformedPacket {
        index: usize,
        field: PacketField,
        reason: MalformedReason,
    },
}

/// Failures of the classifier capability. Never mapped to a default label.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("model not loaded from {path}: {reason}")]
    ModelNotLoaded { path: PathBuf, reason: String },
    #[error("model shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("classifier returned invalid probability {0}")]
    InvalidProbability(f64),
    #[error("classifier session lock poisoned")]
    Poisoned,
}

/// Anything [`crate::FlowEngine::analyze`] can fail with.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("environment variable {name}={value:?} is invalid")]
    Env { name: &'static str, value: String },
    #[error("prediction threshold must be within [0, 1], got {0}")]
    PredictionThreshold(f64),
}
