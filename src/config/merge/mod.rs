//! Config composition: source ordering and defaults.

pub mod merge_policy;
pub mod service;
