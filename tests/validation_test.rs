//! Raw record validation: empty flows, missing and malformed fields.

mod common;

use common::{request_response, A, B};
use flowsense::error::{FlowError, MalformedReason, PacketField};
use flowsense::packets::{parse_timestamp, validate, RawPacket};
use serde_json::json;

fn records(value: serde_json::Value) -> Vec<RawPacket> {
    serde_json::from_value(value).unwrap()
}

fn malformed(err: FlowError) -> (usize, PacketField, MalformedReason) {
    match err {
        FlowError::MalformedPacket { index, field, reason } => (index, field, reason),
        other => panic!("expected MalformedPacket, got {other:?}"),
    }
}

#[test]
fn empty_flow_rejected() {
    assert_eq!(validate(&[]).unwrap_err(), FlowError::EmptyFlow);
}

#[test]
fn well_formed_flow_accepted() {
    let flow = validate(&request_response()).unwrap();
    assert_eq!(flow.len(), 2);
    assert_eq!(flow.first().key.src_ip, A);
    assert_eq!(flow.first().key.src_port, 54321);
    assert_eq!(flow.last().key.dst_ip, A);
    assert_eq!(flow.micros()[1] - flow.micros()[0], 111_111);
}

#[test]
fn missing_field_names_index_and_field() {
    let r = records(json!([
        {"timestamp": "2025-03-19T15:43:22.123456", "src_ip": A, "dst_ip": B, "src_port": 1, "dst_port": 2},
        {"timestamp": "2025-03-19T15:43:22.223456", "src_ip": B, "src_port": 2, "dst_port": 1}
    ]));
    let err = validate(&r).unwrap_err();
    assert_eq!(err.to_string(), "packet 1: dst_ip is missing");
    assert_eq!(malformed(err), (1, PacketField::DstIp, MalformedReason::Missing));
}

#[test]
fn null_counts_as_missing() {
    let r = records(json!([
        {"timestamp": null, "src_ip": A, "dst_ip": B, "src_port": 1, "dst_port": 2}
    ]));
    let (index, field, reason) = malformed(validate(&r).unwrap_err());
    assert_eq!((index, field, reason), (0, PacketField::Timestamp, MalformedReason::Missing));
}

#[test]
fn unparsable_timestamp_rejected() {
    let r = records(json!([
        {"timestamp": "yesterday", "src_ip": A, "dst_ip": B, "src_port": 1, "dst_port": 2}
    ]));
    let (_, field, reason) = malformed(validate(&r).unwrap_err());
    assert_eq!(field, PacketField::Timestamp);
    assert!(matches!(reason, MalformedReason::BadTimestamp(_)));
}

#[test]
fn ports_must_be_in_range_integers() {
    for (port, expect_range) in [(json!(65536), true), (json!(-1), true), (json!("80"), false), (json!(80.5), false)] {
        let r = records(json!([
            {"timestamp": "2025-03-19T15:43:22", "src_ip": A, "dst_ip": B, "src_port": 1, "dst_port": port}
        ]));
        let (index, field, reason) = malformed(validate(&r).unwrap_err());
        assert_eq!((index, field), (0, PacketField::DstPort));
        if expect_range {
            assert!(matches!(reason, MalformedReason::PortOutOfRange(_)), "{reason:?}");
        } else {
            assert!(matches!(reason, MalformedReason::WrongType { .. }), "{reason:?}");
        }
    }
}

#[test]
fn port_bounds_inclusive() {
    let r = records(json!([
        {"timestamp": "2025-03-19T15:43:22", "src_ip": A, "dst_ip": B, "src_port": 0, "dst_port": 65535}
    ]));
    let flow = validate(&r).unwrap();
    assert_eq!(flow.first().key.src_port, 0);
    assert_eq!(flow.first().key.dst_port, 65535);
}

#[test]
fn empty_ip_rejected() {
    let r = records(json!([
        {"timestamp": "2025-03-19T15:43:22", "src_ip": " ", "dst_ip": B, "src_port": 1, "dst_port": 2}
    ]));
    assert_eq!(
        malformed(validate(&r).unwrap_err()),
        (0, PacketField::SrcIp, MalformedReason::Empty)
    );
}

#[test]
fn first_bad_record_reported() {
    let r = records(json!([
        {"timestamp": "2025-03-19T15:43:22", "src_ip": A, "dst_ip": B, "src_port": 1, "dst_port": 2},
        {"timestamp": "bad", "src_ip": A, "dst_ip": B, "src_port": 1},
        {}
    ]));
    let (index, field, _) = malformed(validate(&r).unwrap_err());
    assert_eq!((index, field), (1, PacketField::Timestamp));
}

#[test]
fn timestamp_forms() {
    let naive = parse_timestamp("2025-03-19T15:43:22.123456").unwrap();
    assert_eq!(parse_timestamp("2025-03-19 15:43:22.123456"), Some(naive));
    assert_eq!(parse_timestamp("2025-03-19T15:43:22.123456Z"), Some(naive));
    assert_eq!(parse_timestamp("2025-03-19T17:43:22.123456+02:00"), Some(naive));
    // sub-microsecond digits truncated
    assert_eq!(parse_timestamp("2025-03-19T15:43:22.123456789Z"), Some(naive));
    assert_eq!(
        parse_timestamp("2025-03-19T15:43:22").unwrap().timestamp_micros() + 123_456,
        naive.timestamp_micros()
    );
    assert!(parse_timestamp("2025-13-19T15:43:22").is_none());
    assert!(parse_timestamp("").is_none());
}
