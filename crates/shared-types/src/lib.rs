//! # Shared Types Crate
//!
//! Primitive types used across the CBC-Casper subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: digests, sender identifiers and estimates are
//!   defined once here and re-used by the store and the engine.
//! - **Content Addressing**: a [`Digest`] is the only handle to a message.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
