//! Orrery Scene - keeps rendered planets in step with the entity store
//!
//! Each planet on screen is a [`VisualTriple`]: a body, its orbit ring and
//! its label. Built-in catalog bodies are mounted once per session; custom
//! planets come and go as the authoritative store changes.
//!
//! ## Components
//!
//! - **SceneMembershipIndex**: which triples are in the scene and who owns them
//! - **Reconciler**: converges the index to a store snapshot, matching strictly by id
//! - **SceneSync**: store round-trips with at most one in flight at a time
//! - **SyncDriver**: periodic / on-demand refresh loop
//! - **ViewState**: UI state reducer (toggles, speed, selection, list filter)
//!
//! Rendering itself is behind the [`VisualFactory`] and [`SceneGraph`]
//! traits; [`HeadlessScene`] is an in-memory implementation.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod driver;
pub mod error;
pub mod headless;
pub mod index;
pub mod orbit;
pub mod reconcile;
pub mod sync;
pub mod view;
pub mod visual;

pub use driver::{DriverConfig, SyncDriver};
pub use error::{SyncError, SyncResult};
pub use headless::{HeadlessObject, HeadlessScene, ObjectRole};
pub use index::{HandleSource, SceneMembershipIndex, VisualHandle};
pub use orbit::OrbitalMotion;
pub use reconcile::{ReconcileReport, Reconciler, SkipReason};
pub use sync::{SceneSync, SyncNotice, SyncOutcome};
pub use view::{InfoPanel, Selection, ViewEffect, ViewEvent, ViewState};
pub use visual::{SceneGraph, Vec3, VisualDescriptor, VisualFactory, VisualTriple};
