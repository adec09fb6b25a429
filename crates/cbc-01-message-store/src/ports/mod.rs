//! Ports for the Message Store subsystem

pub mod inbound;

pub use inbound::*;
