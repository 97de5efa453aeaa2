//! Verification error types.

use thiserror::Error;

/// Reasons a signature check can fail.
///
/// Callers usually treat every variant as "invalid", but the variant is kept
/// so the reason can be reported back to the submitter.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// Public key is not valid base64
    #[error("Failed to decode key")]
    KeyDecode,

    /// Decoded key is not a usable Ed25519 public key
    #[error("Failed to import key")]
    KeyImport,

    /// Signature is not valid base64
    #[error("Failed to decode signature")]
    SignatureDecode,

    /// Message contains characters outside the single-byte range
    #[error("Failed to parse body")]
    MessageEncode,

    /// Signature does not match key and message
    #[error("Invalid signature")]
    Mismatch,

    /// Verification could not be carried out
    #[error("Failed to verify signature")]
    Engine,
}
