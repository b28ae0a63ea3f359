//! In-memory scene backend
//!
//! Used by the CLI's scene simulation and by tests. It tracks which objects
//! are attached, where bodies are, and what is visible.

use crate::visual::{SceneGraph, Vec3, VisualDescriptor, VisualFactory, VisualTriple};
use std::collections::{HashMap, HashSet};

/// Part of a triple an object plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectRole {
    Body,
    Ring,
    Label,
}

/// Handle to one headless object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeadlessObject {
    pub id: u64,
    /// Shared by the three objects of one triple
    pub group: u64,
    pub role: ObjectRole,
    pub name: String,
}

#[derive(Debug, Clone)]
struct ObjectState {
    position: Vec3,
    spin: f64,
    visible: bool,
    /// Inner and outer radius, rings only
    ring: Option<(f64, f64)>,
}

#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_id: u64,
    next_group: u64,
    built: u64,
    objects: HashMap<u64, (HeadlessObject, ObjectState)>,
    attached: HashSet<u64>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects currently in the scene
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Objects ever built
    pub fn built_count(&self) -> u64 {
        self.built
    }

    pub fn is_attached(&self, object: &HeadlessObject) -> bool {
        self.attached.contains(&object.id)
    }

    /// Attached and not hidden
    pub fn is_visible(&self, object: &HeadlessObject) -> bool {
        self.attached_state(object)
            .map(|state| state.visible)
            .unwrap_or(false)
    }

    pub fn position(&self, object: &HeadlessObject) -> Option<Vec3> {
        self.attached_state(object).map(|state| state.position)
    }

    pub fn spin(&self, object: &HeadlessObject) -> Option<f64> {
        self.attached_state(object).map(|state| state.spin)
    }

    pub fn ring_radii(&self, object: &HeadlessObject) -> Option<(f64, f64)> {
        self.attached_state(object).and_then(|state| state.ring)
    }

    /// Attached bodies with their positions, sorted by name
    pub fn bodies(&self) -> Vec<(String, Vec3)> {
        let mut bodies: Vec<_> = self
            .attached_objects()
            .filter(|(object, _)| object.role == ObjectRole::Body)
            .map(|(object, state)| (object.name.clone(), state.position))
            .collect();
        bodies.sort_by(|a, b| a.0.cmp(&b.0));
        bodies
    }

    /// Number of attached objects per triple group
    pub fn group_sizes(&self) -> HashMap<u64, usize> {
        let mut sizes = HashMap::new();
        for (object, _) in self.attached_objects() {
            *sizes.entry(object.group).or_insert(0) += 1;
        }
        sizes
    }

    fn attached_objects(&self) -> impl Iterator<Item = &(HeadlessObject, ObjectState)> {
        self.attached.iter().filter_map(|id| self.objects.get(id))
    }

    fn attached_state(&self, object: &HeadlessObject) -> Option<&ObjectState> {
        if !self.attached.contains(&object.id) {
            return None;
        }
        self.objects.get(&object.id).map(|(_, state)| state)
    }

    fn object(&mut self, group: u64, role: ObjectRole, name: &str) -> HeadlessObject {
        self.next_id += 1;
        self.built += 1;
        let object = HeadlessObject {
            id: self.next_id,
            group,
            role,
            name: name.to_string(),
        };
        let state = ObjectState {
            position: Vec3::default(),
            spin: 0.0,
            visible: true,
            ring: None,
        };
        self.objects.insert(object.id, (object.clone(), state));
        object
    }

    fn state_mut(&mut self, object: &HeadlessObject) -> Option<&mut ObjectState> {
        self.objects.get_mut(&object.id).map(|(_, state)| state)
    }
}

impl VisualFactory for HeadlessScene {
    type Object = HeadlessObject;

    fn build(&mut self, descriptor: &VisualDescriptor) -> VisualTriple<HeadlessObject> {
        self.next_group += 1;
        let group = self.next_group;
        let triple = VisualTriple {
            body: self.object(group, ObjectRole::Body, &descriptor.name),
            ring: self.object(group, ObjectRole::Ring, &descriptor.name),
            label: self.object(group, ObjectRole::Label, &descriptor.name),
        };

        if let Some(state) = self.state_mut(&triple.ring) {
            state.ring = Some(descriptor.ring_radii());
        }
        if let Some(state) = self.state_mut(&triple.label) {
            state.position = descriptor.label_position();
        }
        triple
    }
}

impl SceneGraph for HeadlessScene {
    fn attach(&mut self, triple: &VisualTriple<HeadlessObject>) {
        for object in triple.iter() {
            self.attached.insert(object.id);
        }
    }

    fn detach(&mut self, triple: &VisualTriple<HeadlessObject>) {
        // detached objects are dropped
        for object in triple.iter() {
            self.attached.remove(&object.id);
            self.objects.remove(&object.id);
        }
    }

    fn place(&mut self, triple: &VisualTriple<HeadlessObject>, position: Vec3, spin: f64) {
        if let Some(state) = self.state_mut(&triple.body) {
            state.position = position;
            state.spin = spin;
        }
    }

    fn set_visibility(&mut self, triple: &VisualTriple<HeadlessObject>, ring: bool, label: bool) {
        if let Some(state) = self.state_mut(&triple.ring) {
            state.visible = ring;
        }
        if let Some(state) = self.state_mut(&triple.label) {
            state.visible = label;
        }
    }
}
