//! # Roster Directory Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (verification, admission)
//! └── src/integration/  # Flows across validation, storage and HTTP
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rd-tests
//! cargo bench -p rd-tests
//! ```

pub mod integration;
