//! Orrery Types - Core types for the solar system scene
//!
//! Orrery renders the Sun and the eight planets with simple orbital motion
//! and lets users add their own "custom planets", persisted by a small
//! REST daemon.
//!
//! ## Key Concepts
//!
//! - **PlanetRecord**: A custom planet as stored by the daemon (authoritative)
//! - **PlanetDraft**: A validated, not-yet-stored planet
//! - **CreatePlanetRequest**: The wire form submitted by users, validated into a draft
//! - **Catalog**: The nine built-in bodies, never created or removed at runtime
//! - **PlanetCard**: Flat information card used by the list view

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod card;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod planet;
pub mod request;
pub mod wire;

// Re-export main types
pub use card::{cards_for, ListFilter, PlanetCard};
pub use catalog::{catalog, catalog_body, CatalogBody};
pub use error::ValidationError;
pub use ids::PlanetId;
pub use planet::{PlanetDraft, PlanetKind, PlanetRecord};
pub use request::CreatePlanetRequest;
pub use wire::{CreatePlanetResponse, DeletePlanetResponse, ErrorBody};
