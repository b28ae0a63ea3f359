//! CLI commands

pub mod apod;
pub mod catalog;
pub mod planets;
pub mod scene;
pub mod status;
