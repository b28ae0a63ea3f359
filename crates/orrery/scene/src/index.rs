//! Scene membership index
//!
//! Catalog handles are kept apart from custom handles so that nothing keyed
//! by planet id can ever reach them. Custom handles are keyed by [`PlanetId`]
//! and at most one handle exists per id.

use crate::orbit::OrbitalMotion;
use crate::visual::VisualTriple;
use orrery_types::{CatalogBody, PlanetId, PlanetRecord};
use std::collections::BTreeMap;

/// Where a handle came from
#[derive(Debug, Clone, PartialEq)]
pub enum HandleSource {
    /// Built-in body, never removed by reconciliation
    Catalog(&'static CatalogBody),
    /// Store-backed planet
    Custom(PlanetRecord),
}

impl HandleSource {
    pub fn id(&self) -> Option<PlanetId> {
        match self {
            Self::Catalog(_) => None,
            Self::Custom(record) => Some(record.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Catalog(body) => body.name,
            Self::Custom(record) => &record.name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// One rendered body together with its bookkeeping
#[derive(Debug)]
pub struct VisualHandle<O> {
    source: HandleSource,
    triple: VisualTriple<O>,
    motion: OrbitalMotion,
}

impl<O> VisualHandle<O> {
    pub fn new(source: HandleSource, triple: VisualTriple<O>, motion: OrbitalMotion) -> Self {
        Self {
            source,
            triple,
            motion,
        }
    }

    pub fn source(&self) -> &HandleSource {
        &self.source
    }

    pub fn id(&self) -> Option<PlanetId> {
        self.source.id()
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn is_custom(&self) -> bool {
        self.source.is_custom()
    }

    pub fn triple(&self) -> &VisualTriple<O> {
        &self.triple
    }

    pub fn motion(&self) -> &OrbitalMotion {
        &self.motion
    }

    pub(crate) fn motion_mut(&mut self) -> &mut OrbitalMotion {
        &mut self.motion
    }

    pub(crate) fn into_triple(self) -> VisualTriple<O> {
        self.triple
    }
}

/// Which handles are currently part of the scene
#[derive(Debug)]
pub struct SceneMembershipIndex<O> {
    catalog: Vec<VisualHandle<O>>,
    custom: BTreeMap<PlanetId, VisualHandle<O>>,
}

impl<O> Default for SceneMembershipIndex<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> SceneMembershipIndex<O> {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            custom: BTreeMap::new(),
        }
    }

    /// Add a handle.
    ///
    /// A custom handle whose id is already present is handed back untouched.
    pub fn insert(&mut self, handle: VisualHandle<O>) -> Result<(), VisualHandle<O>> {
        match handle.id() {
            None => {
                self.catalog.push(handle);
                Ok(())
            }
            Some(id) if self.custom.contains_key(&id) => Err(handle),
            Some(id) => {
                self.custom.insert(id, handle);
                Ok(())
            }
        }
    }

    /// Remove the custom handle for an id
    pub fn remove(&mut self, id: PlanetId) -> Option<VisualHandle<O>> {
        self.custom.remove(&id)
    }

    pub fn contains(&self, id: PlanetId) -> bool {
        self.custom.contains_key(&id)
    }

    pub fn get(&self, id: PlanetId) -> Option<&VisualHandle<O>> {
        self.custom.get(&id)
    }

    /// Ids of all custom handles, ascending
    pub fn custom_ids(&self) -> impl Iterator<Item = PlanetId> + '_ {
        self.custom.keys().copied()
    }

    /// Catalog handle by case-insensitive name
    pub fn catalog_handle(&self, name: &str) -> Option<&VisualHandle<O>> {
        self.catalog
            .iter()
            .find(|handle| handle.name().eq_ignore_ascii_case(name))
    }

    /// Every handle, catalog first
    pub fn iter(&self) -> impl Iterator<Item = &VisualHandle<O>> {
        self.catalog.iter().chain(self.custom.values())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut VisualHandle<O>> {
        self.catalog.iter_mut().chain(self.custom.values_mut())
    }

    /// Remove and return every handle, catalog included
    pub(crate) fn drain_all(&mut self) -> Vec<VisualHandle<O>> {
        let mut handles: Vec<_> = self.catalog.drain(..).collect();
        handles.extend(std::mem::take(&mut self.custom).into_values());
        handles
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    pub fn len(&self) -> usize {
        self.catalog.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
