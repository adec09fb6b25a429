//! Domain layer for the Message Store subsystem

mod errors;
mod message;

pub use errors::*;
pub use message::*;
