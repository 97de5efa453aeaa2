//! # Service Container
//!
//! Configuration plus the wired service graph: storage backend, record
//! store, directory service and expiry sweeper.

pub mod config;
pub mod services;

pub use config::{
    ConfigError, ExpiryConfig, HttpConfig, NodeConfig, StorageBackend, StorageConfig,
    ValidationConfig,
};
pub use services::{ContainerError, ServiceContainer, SharedRepository};
