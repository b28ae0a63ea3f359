//! Storage layer for orrery-daemon
//!
//! Persists custom planets. Ids are assigned here and never reused.

mod memory;
mod postgres;
mod traits;

pub use memory::InMemoryStorage;
pub use postgres::PostgresStorage;
pub use traits::{PlanetStorage, StorageResult};
