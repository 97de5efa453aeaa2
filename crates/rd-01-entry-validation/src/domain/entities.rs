//! # Domain Entities
//!
//! The submitted record and its parts.
//!
//! Every field has a default so that a partially filled submission still
//! deserializes; missing fields are reported by the validator with a
//! field-specific reason instead of a generic parse error. An explicit JSON
//! `null` counts as missing.

use serde::{Deserialize, Deserializer, Serialize};

/// Milliseconds since the Unix epoch.
pub type TimestampMs = u64;

/// `null` becomes the field's default in human-readable formats. Binary
/// formats carry no null marker and decode the field as is.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    if deserializer.is_human_readable() {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    } else {
        T::deserialize(deserializer)
    }
}

/// An identity claim, signed by the authority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    /// Base64 public key identifying the member.
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    /// Opaque metadata bound to the key.
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: String,
    /// Authority signature over the key and metadata.
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
}

/// The payload attached to a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    /// Opaque payload.
    #[serde(deserialize_with = "null_as_default")]
    pub data: String,
    /// Submission time, milliseconds since epoch.
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: TimestampMs,
    /// Authority signature over the member signature, data and timestamp.
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
}

/// A candidate or stored directory record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entry {
    /// Base64 public key of the governing authority.
    #[serde(alias = "masterKey", deserialize_with = "null_as_default")]
    pub authority_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub member: Member,
    #[serde(deserialize_with = "null_as_default")]
    pub body: Body,
}

impl Entry {
    /// Identity of this record for uniqueness and replacement.
    pub fn key(&self) -> EntryKey {
        EntryKey::new(&self.authority_key, &self.member.key)
    }

    /// Drop the authority key, keeping what a sibling listing returns.
    pub fn into_sibling(self) -> SiblingEntry {
        SiblingEntry {
            member: self.member,
            body: self.body,
        }
    }
}

/// `(authority key, member key)`: at most one live record exists per value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub authority_key: String,
    pub member_key: String,
}

impl EntryKey {
    pub fn new(authority_key: impl Into<String>, member_key: impl Into<String>) -> Self {
        Self {
            authority_key: authority_key.into(),
            member_key: member_key.into(),
        }
    }
}

/// A record as returned to a submitter, without the shared authority key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingEntry {
    pub member: Member,
    pub body: Body,
}
