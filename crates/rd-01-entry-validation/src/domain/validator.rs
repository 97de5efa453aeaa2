//! # Entry Validator
//!
//! Gate function deciding whether a candidate entry may be admitted.
//!
//! ## Check Order
//!
//! 1. Freshness of `body.timestamp`
//! 2. Presence of `authorityKey`, `member.key`, `member.signature`, `body.signature`
//! 3. Member chain: authority signed `member.key ‖ member.metadata`
//! 4. Body chain: authority signed `member.signature ‖ body.data ‖ body.timestamp`
//!
//! The first failing check is reported. Both links are signed by the
//! authority key; the body link binds the member *signature*, so a body is
//! only valid for one endorsed version of the member identity.

use crate::domain::entities::{Entry, TimestampMs};
use crate::domain::errors::ValidationError;
use crate::domain::framing::{body_message, member_message, MessageFraming};
use shared_crypto::verify_encoded_blocking;
use tracing::debug;

/// How far in the past a body timestamp may be at admission.
pub const DEFAULT_FRESHNESS_WINDOW_MS: u64 = 5_000;

/// Validator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Oldest accepted timestamp is `now - freshness_window_ms`.
    pub freshness_window_ms: u64,
    /// Signed-message framing shared with signers.
    pub framing: MessageFraming,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            freshness_window_ms: DEFAULT_FRESHNESS_WINDOW_MS,
            framing: MessageFraming::Concatenated,
        }
    }
}

/// Stateless entry validator.
#[derive(Debug, Clone, Default)]
pub struct EntryValidator {
    config: ValidatorConfig,
}

impl EntryValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `entry` against the wall-clock reading `now`.
    pub async fn validate(&self, entry: &Entry, now: TimestampMs) -> Result<(), ValidationError> {
        let result = self.run_checks(entry, now).await;
        if let Err(reason) = &result {
            debug!(
                member_key = %entry.member.key,
                timestamp = entry.body.timestamp,
                now = now,
                reason = %reason,
                "Entry rejected"
            );
        }
        result
    }

    async fn run_checks(&self, entry: &Entry, now: TimestampMs) -> Result<(), ValidationError> {
        self.check_freshness(entry.body.timestamp, now)?;
        check_required(entry)?;

        let member_msg = member_message(self.config.framing, &entry.member);
        verify_encoded_blocking(
            entry.authority_key.clone(),
            entry.member.signature.clone(),
            member_msg,
        )
        .await
        .map_err(ValidationError::MemberSignature)?;

        let body_msg = body_message(self.config.framing, &entry.member.signature, &entry.body);
        verify_encoded_blocking(
            entry.authority_key.clone(),
            entry.body.signature.clone(),
            body_msg,
        )
        .await
        .map_err(ValidationError::BodySignature)?;

        Ok(())
    }

    /// `timestamp` must be non-zero and within `[now - window, now]`.
    pub fn check_freshness(
        &self,
        timestamp: TimestampMs,
        now: TimestampMs,
    ) -> Result<(), ValidationError> {
        let oldest = now.saturating_sub(self.config.freshness_window_ms);
        if timestamp == 0 || timestamp < oldest || timestamp > now {
            return Err(ValidationError::InvalidTimestamp);
        }
        Ok(())
    }
}

/// Required fields, checked in reporting order.
fn check_required(entry: &Entry) -> Result<(), ValidationError> {
    let required = [
        ("authorityKey", &entry.authority_key),
        ("member.key", &entry.member.key),
        ("member.signature", &entry.member.signature),
        ("body.signature", &entry.body.signature),
    ];
    for (name, value) in required {
        if value.is_empty() {
            return Err(ValidationError::MissingField(name));
        }
    }
    Ok(())
}
