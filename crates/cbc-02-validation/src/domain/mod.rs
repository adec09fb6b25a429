//! Domain layer for the Validation subsystem

pub mod chain;
mod config;
mod error;
mod estimator;
mod outcome;

pub use chain::{ChainLookup, ChainRecord, ForkConflict};
pub use config::*;
pub use error::*;
pub use estimator::*;
pub use outcome::*;
