//! # Domain Layer
//!
//! Errors, storage key layout, retention rules.

pub mod errors;
pub mod keys;
pub mod retention;
