//! # Test Utilities
//!
//! Helpers for building correctly signed entries and controlling time.
//!
//! # Example
//!
//! ```rust
//! use rd_01_entry_validation::test_utils::{EntrySigner, FixedTimeSource};
//! use rd_01_entry_validation::TimeSource;
//! use shared_crypto::Ed25519KeyPair;
//!
//! let signer = EntrySigner::new(Ed25519KeyPair::generate());
//! let entry = signer.entry("member-key", "v1", "hello", 1_000);
//! assert_eq!(entry.authority_key, signer.authority_key());
//!
//! let clock = FixedTimeSource::new(1_000);
//! clock.advance(500);
//! assert_eq!(clock.now_millis(), 1_500);
//! ```

use crate::domain::entities::{Body, Entry, Member, TimestampMs};
use crate::domain::framing::{body_message, member_message, MessageFraming};
use crate::ports::outbound::TimeSource;
use shared_crypto::Ed25519KeyPair;
use std::sync::atomic::{AtomicU64, Ordering};

/// Signs entries on behalf of an authority key.
pub struct EntrySigner {
    authority: Ed25519KeyPair,
    framing: MessageFraming,
}

impl EntrySigner {
    pub fn new(authority: Ed25519KeyPair) -> Self {
        Self {
            authority,
            framing: MessageFraming::Concatenated,
        }
    }

    pub fn with_framing(mut self, framing: MessageFraming) -> Self {
        self.framing = framing;
        self
    }

    /// Base64 authority public key.
    pub fn authority_key(&self) -> String {
        self.authority.public_key().to_base64()
    }

    /// Endorse a member identity.
    pub fn member(&self, key: &str, metadata: &str) -> Member {
        let mut member = Member {
            key: key.to_string(),
            metadata: metadata.to_string(),
            signature: String::new(),
        };
        member.signature = self.sign(&member_message(self.framing, &member));
        member
    }

    /// Sign a body under an endorsed member.
    pub fn body(&self, member: &Member, data: &str, timestamp: TimestampMs) -> Body {
        let mut body = Body {
            data: data.to_string(),
            timestamp,
            signature: String::new(),
        };
        body.signature = self.sign(&body_message(self.framing, &member.signature, &body));
        body
    }

    /// A fully signed entry.
    pub fn entry(
        &self,
        member_key: &str,
        metadata: &str,
        data: &str,
        timestamp: TimestampMs,
    ) -> Entry {
        let member = self.member(member_key, metadata);
        let body = self.body(&member, data, timestamp);
        Entry {
            authority_key: self.authority_key(),
            member,
            body,
        }
    }

    fn sign(&self, message: &str) -> String {
        self.authority
            .sign_text(message)
            .expect("test messages are single-byte text")
    }
}

/// A time source that returns a settable timestamp.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    millis: AtomicU64,
}

impl FixedTimeSource {
    /// Create a new fixed time source (milliseconds since epoch).
    pub fn new(millis: TimestampMs) -> Self {
        Self {
            millis: AtomicU64::new(millis),
        }
    }

    pub fn set(&self, millis: TimestampMs) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, delta: u64) {
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now_millis(&self) -> TimestampMs {
        self.millis.load(Ordering::SeqCst)
    }
}
