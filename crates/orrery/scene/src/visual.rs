//! Rendering contracts
//!
//! The rendering library is opaque to the scene logic. It is reached through
//! two traits: [`VisualFactory`] turns a descriptor into three objects and
//! [`SceneGraph`] adds, removes and moves them. Every scene operation takes a
//! whole [`VisualTriple`], so a body can never be attached or detached
//! without its ring and label.

use orrery_types::{CatalogBody, PlanetRecord};
use serde::{Deserialize, Serialize};

/// Half-width of an orbit ring
pub const RING_HALF_WIDTH: f64 = 0.1;

/// Height of a label above its body's surface
pub const LABEL_LIFT: f64 = 2.0;

/// Scene-space position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// The three rendered objects representing one body
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTriple<O> {
    pub body: O,
    pub ring: O,
    pub label: O,
}

impl<O> VisualTriple<O> {
    pub fn iter(&self) -> impl Iterator<Item = &O> {
        [&self.body, &self.ring, &self.label].into_iter()
    }
}

/// Everything the factory needs to build a triple
#[derive(Debug, Clone, PartialEq)]
pub struct VisualDescriptor {
    pub name: String,
    pub radius: f64,
    pub distance: f64,
    pub color: u32,
    /// Stars are self-lit and do not orbit
    pub star: bool,
}

impl VisualDescriptor {
    pub fn from_record(record: &PlanetRecord) -> Self {
        Self {
            name: record.name.clone(),
            radius: record.size,
            distance: record.distance,
            color: record.kind.color(),
            star: false,
        }
    }

    pub fn from_catalog(body: &CatalogBody) -> Self {
        Self {
            name: body.name.to_string(),
            radius: body.radius,
            distance: body.distance,
            color: body.color,
            star: body.is_star(),
        }
    }

    /// Inner and outer radius of the orbit ring
    pub fn ring_radii(&self) -> (f64, f64) {
        (
            self.distance - RING_HALF_WIDTH,
            self.distance + RING_HALF_WIDTH,
        )
    }

    /// Where the label sits
    pub fn label_position(&self) -> Vec3 {
        Vec3::new(self.distance, self.radius + LABEL_LIFT, 0.0)
    }
}

/// Builds rendered objects
pub trait VisualFactory {
    /// Opaque handle to one rendered object
    type Object;

    /// Build (but do not attach) the triple for a descriptor.
    ///
    /// The ring is sized from [`VisualDescriptor::ring_radii`] and the label
    /// sits at [`VisualDescriptor::label_position`]; neither moves afterwards.
    fn build(&mut self, descriptor: &VisualDescriptor) -> VisualTriple<Self::Object>;
}

/// The render scene
pub trait SceneGraph: VisualFactory {
    /// Add all three objects to the scene
    fn attach(&mut self, triple: &VisualTriple<Self::Object>);

    /// Remove all three objects from the scene
    fn detach(&mut self, triple: &VisualTriple<Self::Object>);

    /// Move the body and set its self-rotation
    fn place(&mut self, triple: &VisualTriple<Self::Object>, position: Vec3, spin: f64);

    /// Show or hide the ring and label; bodies are always visible
    fn set_visibility(&mut self, triple: &VisualTriple<Self::Object>, ring: bool, label: bool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_types::catalog_body;

    #[test]
    fn test_descriptor_geometry() {
        let earth = VisualDescriptor::from_catalog(catalog_body("Earth").unwrap());
        let (inner, outer) = earth.ring_radii();
        assert!((inner - 13.9).abs() < 1e-9);
        assert!((outer - 14.1).abs() < 1e-9);
        assert_eq!(earth.label_position(), Vec3::new(14.0, 2.6, 0.0));
        assert!(!earth.star);
    }

    #[test]
    fn test_sun_descriptor_is_star() {
        let sun = VisualDescriptor::from_catalog(catalog_body("Sun").unwrap());
        assert!(sun.star);
        assert_eq!(sun.color, 0xffff00);
    }
}
