//! Custom planet reconciler
//!
//! Converges the scene to a store snapshot. Matching is by [`PlanetId`]
//! only: two planets with identical coordinates are still two planets, and
//! a planet is never identified by where it happens to be drawn.

use crate::index::{HandleSource, SceneMembershipIndex, VisualHandle};
use crate::orbit::OrbitalMotion;
use crate::view::{InfoPanel, Selection};
use crate::visual::{SceneGraph, VisualDescriptor};
use orrery_types::{catalog, PlanetId, PlanetRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Why a snapshot record produced no visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Zero or non-finite distance, or non-finite size
    Degenerate,
    /// The id already appeared earlier in the same snapshot
    DuplicateId,
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub added: Vec<PlanetId>,
    pub removed: Vec<PlanetId>,
    pub skipped: Vec<(PlanetId, SkipReason)>,
}

impl ReconcileReport {
    /// Whether the scene was left unchanged
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Owns the render backend and the membership index for one view session
pub struct Reconciler<B: SceneGraph> {
    backend: B,
    index: SceneMembershipIndex<B::Object>,
    rng: StdRng,
    show_orbits: bool,
    show_labels: bool,
}

impl<B: SceneGraph> Reconciler<B> {
    /// Mount the view: build and attach every catalog body
    pub fn mount(backend: B) -> Self {
        Self::mount_with_rng(backend, StdRng::from_entropy())
    }

    /// Mount with a fixed seed for reproducible orbital phases
    pub fn mount_seeded(backend: B, seed: u64) -> Self {
        Self::mount_with_rng(backend, StdRng::seed_from_u64(seed))
    }

    fn mount_with_rng(backend: B, rng: StdRng) -> Self {
        let mut reconciler = Self {
            backend,
            index: SceneMembershipIndex::new(),
            rng,
            show_orbits: true,
            show_labels: true,
        };

        for body in catalog() {
            let descriptor = VisualDescriptor::from_catalog(body);
            let motion = OrbitalMotion::for_catalog(body, &mut reconciler.rng);
            let handle = reconciler.build_handle(HandleSource::Catalog(body), &descriptor, motion);
            // catalog handles have no id and cannot collide
            let _ = reconciler.index.insert(handle);
        }

        tracing::debug!(bodies = reconciler.index.catalog_len(), "Scene mounted");
        reconciler
    }

    /// Unmount the view: detach everything and hand the backend back
    pub fn unmount(mut self) -> B {
        for handle in self.index.drain_all() {
            self.backend.detach(&handle.into_triple());
        }
        tracing::debug!("Scene unmounted");
        self.backend
    }

    fn build_handle(
        &mut self,
        source: HandleSource,
        descriptor: &VisualDescriptor,
        motion: OrbitalMotion,
    ) -> VisualHandle<B::Object> {
        let triple = self.backend.build(descriptor);
        self.backend
            .set_visibility(&triple, self.show_orbits, self.show_labels);
        self.backend.place(&triple, motion.position(), motion.spin);
        self.backend.attach(&triple);
        VisualHandle::new(source, triple, motion)
    }

    /// Converge the custom part of the scene to `snapshot`.
    ///
    /// Handles whose id is absent from the snapshot are detached first, then
    /// every record without a handle gets one. Records that cannot be drawn,
    /// and repeated ids, are skipped and reported. Catalog bodies are never
    /// touched.
    pub fn reconcile(&mut self, snapshot: &[PlanetRecord]) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let present: HashSet<PlanetId> = snapshot.iter().map(|record| record.id).collect();

        let stale: Vec<PlanetId> = self
            .index
            .custom_ids()
            .filter(|id| !present.contains(id))
            .collect();
        for id in stale {
            if self.remove(id) {
                report.removed.push(id);
            }
        }

        let mut seen = HashSet::with_capacity(snapshot.len());
        for record in snapshot {
            if !seen.insert(record.id) {
                tracing::warn!(planet_id = %record.id, "Duplicate id in snapshot");
                report.skipped.push((record.id, SkipReason::DuplicateId));
                continue;
            }
            if self.index.contains(record.id) {
                continue;
            }
            if !record.is_renderable() {
                tracing::warn!(
                    planet_id = %record.id,
                    distance = record.distance,
                    size = record.size,
                    "Skipping planet that cannot be rendered"
                );
                report.skipped.push((record.id, SkipReason::Degenerate));
                continue;
            }

            let descriptor = VisualDescriptor::from_record(record);
            let motion = OrbitalMotion::for_record(record, &mut self.rng);
            let handle = self.build_handle(HandleSource::Custom(record.clone()), &descriptor, motion);
            if let Err(handle) = self.index.insert(handle) {
                self.backend.detach(handle.triple());
                continue;
            }
            tracing::debug!(planet_id = %record.id, name = %record.name, "Planet added to scene");
            report.added.push(record.id);
        }

        if !report.is_noop() {
            tracing::info!(
                added = report.added.len(),
                removed = report.removed.len(),
                skipped = report.skipped.len(),
                "Scene reconciled"
            );
        }
        report
    }

    /// Detach the visual for one id; `false` if there was none
    pub fn remove(&mut self, id: PlanetId) -> bool {
        match self.index.remove(id) {
            Some(handle) => {
                self.backend.detach(handle.triple());
                tracing::debug!(planet_id = %id, "Planet removed from scene");
                true
            }
            None => false,
        }
    }

    /// Remove every custom visual
    pub fn clear_custom(&mut self) -> ReconcileReport {
        self.reconcile(&[])
    }

    /// Advance every body by one frame
    pub fn tick(&mut self, rate: f64) {
        for handle in self.index.iter_mut() {
            let position = handle.motion_mut().advance(rate);
            let spin = handle.motion().spin;
            self.backend.place(handle.triple(), position, spin);
        }
    }

    /// Show or hide rings and labels, including visuals created later
    pub fn set_visibility(&mut self, orbits: bool, labels: bool) {
        self.show_orbits = orbits;
        self.show_labels = labels;
        for handle in self.index.iter() {
            self.backend.set_visibility(handle.triple(), orbits, labels);
        }
    }

    pub fn visibility(&self) -> (bool, bool) {
        (self.show_orbits, self.show_labels)
    }

    /// Information panel for a selection, if it still exists in the scene
    pub fn describe(&self, selection: &Selection) -> Option<InfoPanel> {
        let handle = match selection {
            Selection::Custom(id) => self.index.get(*id)?,
            Selection::Catalog(name) => self.index.catalog_handle(name)?,
        };

        let panel = match handle.source() {
            HandleSource::Custom(record) => InfoPanel {
                title: record.name.clone(),
                rows: vec![
                    ("Creator".into(), record.pseudo.clone()),
                    ("Type".into(), record.kind.label().to_string()),
                    ("Size".into(), format!("{} units", record.size)),
                    ("Distance".into(), format!("{} units", record.distance)),
                    ("Temperature".into(), format!("{}°C", record.temperature)),
                    (
                        "Atmosphere".into(),
                        record.atmosphere_text().unwrap_or_else(|| "None".into()),
                    ),
                    ("Water".into(), yes_no(record.has_water).into()),
                ],
                description: None,
                deletable: Some(record.id),
            },
            HandleSource::Catalog(body) => InfoPanel {
                title: body.name.to_string(),
                rows: vec![
                    ("Type".into(), body.kind.label().to_string()),
                    ("Radius".into(), format!("{} units", body.radius)),
                    ("Distance".into(), format!("{} units", body.distance)),
                    ("Temperature".into(), format!("{}°C", body.temperature)),
                    (
                        "Atmosphere".into(),
                        if body.atmosphere.is_empty() {
                            "None".into()
                        } else {
                            body.atmosphere.join(", ")
                        },
                    ),
                    ("Water".into(), yes_no(body.has_water).into()),
                ],
                description: Some(body.description.to_string()),
                deletable: None,
            },
        };
        Some(panel)
    }

    pub fn index(&self) -> &SceneMembershipIndex<B::Object> {
        &self.index
    }

    /// Record behind a custom visual
    pub fn record(&self, id: PlanetId) -> Option<&PlanetRecord> {
        match self.index.get(id)?.source() {
            HandleSource::Custom(record) => Some(record),
            HandleSource::Catalog(_) => None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
