//! # CBC Telemetry
//!
//! Logging bootstrap for binaries and test harnesses built on the CBC-Casper
//! crates. The library crates only emit `tracing` events; this crate decides
//! where they go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cbc_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CBC_SERVICE_NAME` | `cbc-casper` | Service name in log output |
//! | `CBC_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `CBC_JSON_LOGS` | `false` | JSON formatted logs |
//! | `CBC_CONSOLE_OUTPUT` | `true` | Write logs to the console |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
