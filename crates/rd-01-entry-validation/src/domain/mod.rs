//! # Domain Layer
//!
//! Entry model and validation rules, no I/O.

pub mod entities;
pub mod errors;
pub mod framing;
pub mod validator;
