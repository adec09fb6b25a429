//! Adapters for the Message Store subsystem
//!
//! - `memory`: in-process store used by the engine and tests

mod memory;

pub use memory::InMemoryMessageStore;
