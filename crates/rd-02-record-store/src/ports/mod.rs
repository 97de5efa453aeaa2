//! # Ports Layer
//!
//! - **Outbound (Driven)**: persistence this subsystem needs

pub mod outbound;
