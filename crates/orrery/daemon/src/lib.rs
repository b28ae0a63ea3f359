//! Orrery Daemon library
//!
//! This module provides the core components for the orrery daemon:
//! - REST API for custom planets
//! - Storage backends (memory, PostgreSQL)
//! - Read-only imagery proxy
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod imagery;
pub mod server;
pub mod storage;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError, StorageError};
pub use imagery::ImageryClient;
pub use server::Server;
pub use storage::{InMemoryStorage, PlanetStorage, PostgresStorage};
