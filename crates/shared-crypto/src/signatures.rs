//! # Ed25519 Signatures
//!
//! Raw key and signature types, plus verification of base64-encoded
//! signatures over single-byte-encoded string messages.
//!
//! ## Failure Reasons
//!
//! | Step | Error |
//! |------|-------|
//! | Key is not base64 | `KeyDecode` |
//! | Key is not a 32-byte curve point | `KeyImport` |
//! | Signature is not base64 | `SignatureDecode` |
//! | Message has a char above U+00FF | `MessageEncode` |
//! | Wrong length or bad signature | `Mismatch` |
//! | Blocking worker lost | `Engine` |

use crate::encoding::{decode_base64, encode_base64, latin1_bytes};
use crate::VerifyError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
/// Ed25519 public key (32 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519PublicKey([u8; 32]);

impl Ed25519PublicKey {
    /// Import a raw key, checking it decodes to a curve point.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VerifyError> {
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| VerifyError::KeyImport)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| VerifyError::KeyImport)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Base64 form used on the wire.
    pub fn to_base64(&self) -> String {
        encode_base64(&self.0)
    }

    /// Verify a signature over raw message bytes.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), VerifyError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| VerifyError::KeyImport)?;

        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);

        verifying_key
            .verify(message, &sig)
            .map_err(|_| VerifyError::Mismatch)
    }
}

/// Ed25519 signature (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Signature([u8; 64]);

impl Ed25519Signature {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// A signature of the wrong length can never verify.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VerifyError> {
        let bytes: [u8; 64] = bytes.try_into().map_err(|_| VerifyError::Mismatch)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Base64 form used on the wire.
    pub fn to_base64(&self) -> String {
        encode_base64(&self.0)
    }
}

/// Ed25519 keypair.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret seed (32 bytes).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        Self { signing_key }
    }

    /// Get public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        let verifying_key = self.signing_key.verifying_key();
        Ed25519PublicKey(verifying_key.to_bytes())
    }

    /// Sign a message (deterministic - no RNG needed).
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let sig = self.signing_key.sign(message);
        Ed25519Signature(sig.to_bytes())
    }

    /// Sign a string message with the single-byte encoding and return base64.
    pub fn sign_text(&self, message: &str) -> Result<String, VerifyError> {
        let bytes = latin1_bytes(message)?;
        Ok(self.sign(&bytes).to_base64())
    }

    /// Get secret seed (for serialization).
    pub fn to_seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

/// Verify a base64 signature by a base64 key over a string message.
///
/// Steps run in a fixed order and the first failure is returned: key
/// decode, key import, signature decode, message encode, verification.
pub fn verify_encoded(key: &str, signature: &str, message: &str) -> Result<(), VerifyError> {
    let key_bytes = decode_base64(key).ok_or(VerifyError::KeyDecode)?;
    let public_key = Ed25519PublicKey::from_slice(&key_bytes)?;

    let sig_bytes = decode_base64(signature).ok_or(VerifyError::SignatureDecode)?;
    let message = latin1_bytes(message)?;

    let signature = Ed25519Signature::from_slice(&sig_bytes)?;
    public_key.verify(&message, &signature)
}

/// [`verify_encoded`] on the blocking thread pool.
///
/// A worker that panics or is cancelled reports [`VerifyError::Engine`].
pub async fn verify_encoded_blocking(
    key: String,
    signature: String,
    message: String,
) -> Result<(), VerifyError> {
    tokio::task::spawn_blocking(move || verify_encoded(&key, &signature, &message))
        .await
        .unwrap_or(Err(VerifyError::Engine))
}
