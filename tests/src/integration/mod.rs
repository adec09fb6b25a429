//! # Integration Tests
//!
//! Store and engine working together on realistic message histories.

pub mod byzantine_detection;
pub mod flows;
