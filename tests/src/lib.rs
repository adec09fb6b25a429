//! # CBC-Casper Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── fixtures.rs        # Shared message builders
//! │   └── integration/       # Store + engine scenarios
//! │       ├── byzantine_detection.rs
//! │       └── flows.rs
//! └── benches/
//!     └── validation_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cbc-tests
//!
//! # By category
//! cargo test -p cbc-tests integration::byzantine_detection::
//!
//! # Benchmarks
//! cargo bench -p cbc-tests
//! ```

pub mod integration;
