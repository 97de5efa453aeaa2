//! # Entry Validation (rd-01)
//!
//! Decides whether a submitted directory entry may be admitted.
//!
//! ## Trust Chain
//!
//! ```text
//! authorityKey ──signs──→ member.key ‖ member.metadata        = member.signature
//! authorityKey ──signs──→ member.signature ‖ body.data ‖ ts   = body.signature
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Freshness | `body.timestamp` in `[now - 5000ms, now]`, non-zero |
//! | 2 | Presence | authority key, member key, both signatures non-empty |
//! | 3 | Member Chain | member signature verifies under the authority key |
//! | 4 | Body Chain | body signature verifies under the authority key |
//!
//! Checks run in that order and the first failure is reported.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, framing, validator, errors
//! - `ports/` - Clock port
//! - `adapters/` - System clock

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod test_utils;

pub use adapters::SystemTimeSource;
pub use domain::entities::{Body, Entry, EntryKey, Member, SiblingEntry, TimestampMs};
pub use domain::errors::ValidationError;
pub use domain::framing::{body_message, member_message, MessageFraming};
pub use domain::validator::{EntryValidator, ValidatorConfig, DEFAULT_FRESHNESS_WINDOW_MS};
pub use ports::outbound::TimeSource;
