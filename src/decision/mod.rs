//! Thresholded attack decision over a classifier probability.

mod policy;

pub use policy::{Decision, DecisionPolicy, Verdict};
