//! # Signed Message Framing
//!
//! Both chain links sign a message built from several string fields:
//!
//! - member link: `member.key`, `member.metadata`
//! - body link: `member.signature`, `body.data`, `body.timestamp` (decimal)
//!
//! `Concatenated` joins the fields with no separator. Existing signers use
//! it, but it is ambiguous: `("ab", "c")` and `("a", "bc")` sign the same
//! bytes. `LengthPrefixed` writes each field's length as four big-endian
//! bytes before the field and has no such collisions.

use crate::domain::entities::{Body, Member};
use std::fmt;
use std::str::FromStr;

/// How chain-link fields are joined into the signed message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageFraming {
    /// Plain concatenation (legacy wire format).
    #[default]
    Concatenated,
    /// Each field preceded by its u32 big-endian length.
    LengthPrefixed,
}

impl MessageFraming {
    /// Join fields into one message string.
    ///
    /// Prefix bytes are emitted as U+0000..=U+00FF characters so that the
    /// single-byte message encoding reproduces them exactly.
    pub fn join(self, fields: &[&str]) -> String {
        match self {
            MessageFraming::Concatenated => fields.concat(),
            MessageFraming::LengthPrefixed => {
                let mut out = String::new();
                for field in fields {
                    let len = field.chars().count() as u32;
                    out.extend(len.to_be_bytes().into_iter().map(char::from));
                    out.push_str(field);
                }
                out
            }
        }
    }
}

impl fmt::Display for MessageFraming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageFraming::Concatenated => write!(f, "concatenated"),
            MessageFraming::LengthPrefixed => write!(f, "length-prefixed"),
        }
    }
}

impl FromStr for MessageFraming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concatenated" => Ok(MessageFraming::Concatenated),
            "length-prefixed" => Ok(MessageFraming::LengthPrefixed),
            other => Err(format!("unknown message framing: {}", other)),
        }
    }
}

/// Message the authority signs to endorse a member identity.
pub fn member_message(framing: MessageFraming, member: &Member) -> String {
    framing.join(&[&member.key, &member.metadata])
}

/// Message the authority signs to endorse a body under one member version.
pub fn body_message(framing: MessageFraming, member_signature: &str, body: &Body) -> String {
    let timestamp = body.timestamp.to_string();
    framing.join(&[member_signature, &body.data, &timestamp])
}
