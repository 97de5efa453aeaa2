//! Domain layer for the directory API.

pub mod error;
