//! Raw record validation: the only way to obtain a [`Flow`].

use super::{DirectionKey, Flow, PacketEvent, RawPacket};
use crate::error::{FlowError, MalformedReason, PacketField};
use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde_json::Value;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Validate records in order; fails on the first bad record.
pub fn validate(records: &[RawPacket]) -> Result<Flow, FlowError> {
    if records.is_empty() {
        return Err(FlowError::EmptyFlow);
    }
    let packets = records
        .iter()
        .enumerate()
        .map(|(index, raw)| validate_one(index, raw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Flow { packets })
}

fn validate_one(index: usize, raw: &RawPacket) -> Result<PacketEvent, FlowError> {
    let malformed = |field, reason| FlowError::MalformedPacket { index, field, reason };

    let ts_raw = required_str(raw.timestamp.as_ref())
        .map_err(|r| malformed(PacketField::Timestamp, r))?;
    let timestamp = parse_timestamp(ts_raw).ok_or_else(|| {
        malformed(
            PacketField::Timestamp,
            MalformedReason::BadTimestamp(ts_raw.to_string()),
        )
    })?;
    let src_ip =
        required_str(raw.src_ip.as_ref()).map_err(|r| malformed(PacketField::SrcIp, r))?;
    let dst_ip =
        required_str(raw.dst_ip.as_ref()).map_err(|r| malformed(PacketField::DstIp, r))?;
    let src_port = port(raw.src_port.as_ref()).map_err(|r| malformed(PacketField::SrcPort, r))?;
    let dst_port = port(raw.dst_port.as_ref()).map_err(|r| malformed(PacketField::DstPort, r))?;

    Ok(PacketEvent {
        timestamp,
        key: DirectionKey {
            src_ip: src_ip.to_string(),
            src_port,
            dst_ip: dst_ip.to_string(),
            dst_port,
        },
    })
}

fn required_str(value: Option<&Value>) -> Result<&str, MalformedReason> {
    match value {
        None | Some(Value::Null) => Err(MalformedReason::Missing),
        Some(Value::String(s)) if s.trim().is_empty() => Err(MalformedReason::Empty),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(MalformedReason::WrongType { expected: "a string" }),
    }
}

fn port(value: Option<&Value>) -> Result<u16, MalformedReason> {
    match value {
        None | Some(Value::Null) => Err(MalformedReason::Missing),
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                u16::try_from(u).map_err(|_| MalformedReason::PortOutOfRange(n.to_string()))
            } else if n.is_i64() {
                Err(MalformedReason::PortOutOfRange(n.to_string()))
            } else {
                Err(MalformedReason::WrongType { expected: "an integer" })
            }
        }
        Some(_) => Err(MalformedReason::WrongType { expected: "an integer" }),
    }
}

/// Parse an ISO-8601 timestamp to UTC, truncated to microseconds. Offset-less
/// timestamps are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).trunc_subsecs(6));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().trunc_subsecs(6))
}
