//! # Storage Keys
//!
//! Layout: `entry:` ‖ u32be(len(authority)) ‖ authority ‖ member
//!
//! The length prefix keeps `(authority, member)` splits distinct and makes
//! every record of one authority share a scannable prefix.

use rd_01_entry_validation::EntryKey;

/// Prefix shared by every record key.
pub const ENTRY_PREFIX: &[u8] = b"entry:";

/// Prefix of all records under one authority.
pub fn authority_prefix(authority_key: &str) -> Vec<u8> {
    let authority = authority_key.as_bytes();
    let mut key = Vec::with_capacity(ENTRY_PREFIX.len() + 4 + authority.len());
    key.extend_from_slice(ENTRY_PREFIX);
    key.extend_from_slice(&(authority.len() as u32).to_be_bytes());
    key.extend_from_slice(authority);
    key
}

/// Key of the single live record for a pair.
pub fn record_key(key: &EntryKey) -> Vec<u8> {
    let mut out = authority_prefix(&key.authority_key);
    out.extend_from_slice(key.member_key.as_bytes());
    out
}
