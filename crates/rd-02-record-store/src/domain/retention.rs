//! Retention window for the expiry sweep.

use rd_01_entry_validation::TimestampMs;
use std::time::Duration;

/// Records older than this (by `body.timestamp`) are swept.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(30 * 60);

/// Cutoff for a sweep taken at `now`; saturates at zero.
pub fn retention_cutoff(now: TimestampMs, retention: Duration) -> TimestampMs {
    now.saturating_sub(retention.as_millis() as TimestampMs)
}
