//! Forward/backward partition relative to the first packet's 4-tuple.
//!
//! Matching is exact equality on `(src_ip, src_port, dst_ip, dst_port)`; a
//! reply with the tuple reversed is backward, and so is any packet that shares
//! only part of the tuple. The model was trained on features computed this way.

use super::Flow;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// Packet indices per direction, each in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionSplit {
    pub forward: Vec<usize>,
    pub backward: Vec<usize>,
}

impl DirectionSplit {
    pub fn direction_of(&self, index: usize) -> Option<Direction> {
        if self.forward.binary_search(&index).is_ok() {
            Some(Direction::Forward)
        } else if self.backward.binary_search(&index).is_ok() {
            Some(Direction::Backward)
        } else {
            None
        }
    }

    /// Timestamps (µs) of the given indices, in the flow's order.
    pub fn micros(flow: &Flow, indices: &[usize]) -> Vec<i64> {
        let packets = flow.packets();
        indices.iter().map(|&i| packets[i].micros()).collect()
    }
}

pub fn assemble(flow: &Flow) -> DirectionSplit {
    let reference = &flow.first().key;
    let mut split = DirectionSplit::default();
    for (i, p) in flow.packets().iter().enumerate() {
        if p.key == *reference {
            split.forward.push(i);
        } else {
            split.backward.push(i);
        }
    }
    split
}
