//! # Ports Layer
//!
//! - **Outbound (Driven)**: Dependencies this subsystem needs

pub mod outbound;
