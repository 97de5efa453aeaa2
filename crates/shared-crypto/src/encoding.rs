//! # Wire Encodings
//!
//! Keys and signatures travel as standard-alphabet base64. Padding is
//! optional on decode, always emitted on encode.
//!
//! Signed messages are strings turned into bytes one character at a time:
//! each character must fit in a single byte (U+0000..=U+00FF).

use crate::VerifyError;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a base64 string.
pub fn decode_base64(data: &str) -> Option<Vec<u8>> {
    BASE64.decode(data).ok()
}

/// Encode bytes as padded base64.
pub fn encode_base64(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Map each character of `message` to a single byte.
///
/// Fails with [`VerifyError::MessageEncode`] on the first character above
/// U+00FF.
pub fn latin1_bytes(message: &str) -> Result<Vec<u8>, VerifyError> {
    message
        .chars()
        .map(|c| u8::try_from(c).map_err(|_| VerifyError::MessageEncode))
        .collect()
}
