//! # Validation Errors
//!
//! The first failing check decides the variant. Display strings are the
//! rejection reasons returned to submitters verbatim.

use shared_crypto::VerifyError;
use thiserror::Error;

/// Why a candidate entry was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// `body.timestamp` is zero or outside the freshness window.
    #[error("Invalid Timestamp")]
    InvalidTimestamp,

    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Authority signature over the member identity did not verify.
    #[error("Invalid memberSignature: {0}")]
    MemberSignature(VerifyError),

    /// Authority signature over the body did not verify.
    #[error("Invalid bodySignature: {0}")]
    BodySignature(VerifyError),
}
