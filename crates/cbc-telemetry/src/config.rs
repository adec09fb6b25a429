//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to log output
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or full `EnvFilter` directive
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to write logs to the console at all
    pub console_output: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "cbc-casper".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            console_output: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CBC_SERVICE_NAME`: Service name (default: cbc-casper)
    /// - `CBC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CBC_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `CBC_CONSOLE_OUTPUT`: Enable console output (default: true)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("CBC_SERVICE_NAME").unwrap_or_else(|_| "cbc-casper".to_string()),

            log_level: env::var("CBC_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("CBC_JSON_LOGS")
                .map(|v| parse_flag(&v, false))
                .unwrap_or(false),

            console_output: env::var("CBC_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v, true))
                .unwrap_or(true),
        }
    }

    /// Configuration for tests: debug level, console only.
    pub fn for_tests() -> Self {
        Self {
            service_name: "cbc-tests".to_string(),
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }
}

/// `true`/`1`/`yes` and `false`/`0`/`no`, case-insensitive; anything else is `default`.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        _ => default,
    }
}
