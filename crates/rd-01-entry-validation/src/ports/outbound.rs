//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the validator needs from its host.

use crate::domain::entities::TimestampMs;

/// Abstract wall clock (for testability).
///
/// Admission freshness reads this clock. Expiry sweeps take their cutoff as
/// an explicit argument and never share a reading with admission.
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since epoch.
    fn now_millis(&self) -> TimestampMs;
}
