//! Packet records as submitted, validated packet events, and the flow they form.

mod direction;
mod validate;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use direction::{assemble, Direction, DirectionSplit};
pub use validate::{parse_timestamp, validate};

/// One packet record exactly as it arrived on the wire. Every field is
/// optional here so the validator can name the index and field that is wrong;
/// `null` counts as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPacket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_ip: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_ip: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_port: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<serde_json::Value>,
}

impl RawPacket {
    /// Convenience constructor for well-formed records.
    pub fn new(
        timestamp: impl Into<String>,
        src_ip: impl Into<String>,
        src_port: u16,
        dst_ip: impl Into<String>,
        dst_port: u16,
    ) -> Self {
        Self {
            timestamp: Some(serde_json::Value::String(timestamp.into())),
            src_ip: Some(serde_json::Value::String(src_ip.into())),
            dst_ip: Some(serde_json::Value::String(dst_ip.into())),
            src_port: Some(src_port.into()),
            dst_port: Some(dst_port.into()),
        }
    }
}

/// `(src_ip, src_port, dst_ip, dst_port)`; compared by exact equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DirectionKey {
    pub src_ip: String,
    pub src_port: u16,
    pub dst_ip: String,
    pub dst_port: u16,
}

/// Validated packet observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketEvent {
    pub timestamp: DateTime<Utc>,
    pub key: DirectionKey,
}

impl PacketEvent {
    /// Microseconds since the Unix epoch.
    pub fn micros(&self) -> i64 {
        self.timestamp.timestamp_micros()
    }
}

/// Non-empty ordered packet sequence treated as one bidirectional conversation.
/// Only [`validate`] builds one, so the non-empty invariant always holds.
#[derive(Debug, Clone)]
pub struct Flow {
    packets: Vec<PacketEvent>,
}

impl Flow {
    pub fn packets(&self) -> &[PacketEvent] {
        &self.packets
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    /// Always false for a validated flow.
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// First packet; its key is the forward direction reference.
    pub fn first(&self) -> &PacketEvent {
        &self.packets[0]
    }

    pub fn last(&self) -> &PacketEvent {
        &self.packets[self.packets.len() - 1]
    }

    /// Timestamps in submission order (µs since epoch).
    pub fn micros(&self) -> Vec<i64> {
        self.packets.iter().map(PacketEvent::micros).collect()
    }
}
