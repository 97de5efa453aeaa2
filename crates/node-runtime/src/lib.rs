//! # Node Runtime Library
//!
//! Configuration and service wiring for the Roster directory node. The
//! entry point is the `roster-directory` binary in `main.rs`.

pub mod container;

pub use container::{ConfigError, ContainerError, NodeConfig, ServiceContainer};
