//! Orrery entity store clients
//!
//! The entity store is the authoritative collection of custom planets. The
//! scene only talks to it through the narrow [`PlanetStore`] contract:
//! list, create, delete and delete-all.
//!
//! Two implementations are provided:
//! - [`HttpPlanetStore`]: talks to `orreryd` over its REST API
//! - [`MemoryPlanetStore`]: process-local store for offline use and tests
//!
//! [`HttpPlanetStore`] also reaches the daemon's read-only imagery proxy;
//! [`PlanetImageCache`] keeps one image link per body for a session.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod error;
mod http;
mod imagery;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use http::{DaemonHealth, HttpPlanetStore};
pub use imagery::{first_image_link, ApodPicture, PlanetImageCache};
pub use memory::MemoryPlanetStore;
pub use store::PlanetStore;
