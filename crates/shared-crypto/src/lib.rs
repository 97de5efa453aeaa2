//! # Shared Crypto - Signature Verification Primitives
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `signatures` | Ed25519 keys, signing, and verification |
//! | `encoding` | Base64 wire form, single-byte message encoding |
//! | `errors` | Distinct failure reasons for diagnostics |
//!
//! ## Verification Contract
//!
//! [`verify_encoded`] takes a base64 public key, a base64 signature and a
//! string message. It never panics; every failure is a [`VerifyError`].
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency
//! - Secret keys are zeroized on drop by ed25519-dalek's `SigningKey`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod errors;
pub mod signatures;

// Re-exports
pub use encoding::{decode_base64, encode_base64, latin1_bytes};
pub use errors::VerifyError;
pub use signatures::{
    verify_encoded, verify_encoded_blocking, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
