//! UI state
//!
//! [`ViewState`] is a plain reducer: events go in, the state changes and a
//! [`ViewEffect`] tells the caller what the scene has to do about it.

use orrery_types::{ListFilter, PlanetId};
use serde::{Deserialize, Serialize};

pub const MIN_SPEED: f64 = 0.0;
pub const MAX_SPEED: f64 = 5.0;
pub const DEFAULT_SPEED: f64 = 1.0;

/// What the user clicked on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "lowercase")]
pub enum Selection {
    /// Built-in body, by name
    Catalog(String),
    /// Custom planet, by id
    Custom(PlanetId),
}

/// Contents of the information panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoPanel {
    pub title: String,
    /// Label / value rows, in display order
    pub rows: Vec<(String, String)>,
    pub description: Option<String>,
    /// Present for custom planets, which can be deleted from the panel
    pub deletable: Option<PlanetId>,
}

impl InfoPanel {
    pub fn row(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// User intents
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    ToggleOrbits,
    ToggleLabels,
    SetSpeed(f64),
    Select(Selection),
    CloseInfo,
    SetFilter(ListFilter),
    OpenForm,
    CloseForm,
    /// A planet disappeared from the store
    PlanetRemoved(PlanetId),
    /// Every custom planet was removed
    CustomCleared,
    ResetView,
}

/// What the scene must do after an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEffect {
    None,
    Visibility { orbits: bool, labels: bool },
    ResetCamera,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub show_orbits: bool,
    pub show_labels: bool,
    pub speed: f64,
    pub filter: ListFilter,
    pub selection: Option<Selection>,
    pub form_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            show_orbits: true,
            show_labels: true,
            speed: DEFAULT_SPEED,
            filter: ListFilter::default(),
            selection: None,
            form_open: false,
        }
    }
}

impl ViewState {
    pub fn apply(&mut self, event: ViewEvent) -> ViewEffect {
        match event {
            ViewEvent::ToggleOrbits => {
                self.show_orbits = !self.show_orbits;
                self.visibility()
            }
            ViewEvent::ToggleLabels => {
                self.show_labels = !self.show_labels;
                self.visibility()
            }
            ViewEvent::SetSpeed(speed) => {
                self.speed = clamp_speed(speed);
                ViewEffect::None
            }
            ViewEvent::Select(selection) => {
                self.selection = Some(selection);
                ViewEffect::None
            }
            ViewEvent::CloseInfo => {
                self.selection = None;
                ViewEffect::None
            }
            ViewEvent::SetFilter(filter) => {
                self.filter = filter;
                ViewEffect::None
            }
            ViewEvent::OpenForm => {
                self.form_open = true;
                ViewEffect::None
            }
            ViewEvent::CloseForm => {
                self.form_open = false;
                ViewEffect::None
            }
            ViewEvent::PlanetRemoved(id) => {
                if self.selection == Some(Selection::Custom(id)) {
                    self.selection = None;
                }
                ViewEffect::None
            }
            ViewEvent::CustomCleared => {
                if matches!(self.selection, Some(Selection::Custom(_))) {
                    self.selection = None;
                }
                ViewEffect::None
            }
            ViewEvent::ResetView => {
                self.selection = None;
                ViewEffect::ResetCamera
            }
        }
    }

    fn visibility(&self) -> ViewEffect {
        ViewEffect::Visibility {
            orbits: self.show_orbits,
            labels: self.show_labels,
        }
    }
}

/// Clamp a requested speed into the slider range; NaN falls back to the default
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        DEFAULT_SPEED
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_report_visibility() {
        let mut state = ViewState::default();
        assert_eq!(
            state.apply(ViewEvent::ToggleOrbits),
            ViewEffect::Visibility {
                orbits: false,
                labels: true
            }
        );
        assert_eq!(
            state.apply(ViewEvent::ToggleLabels),
            ViewEffect::Visibility {
                orbits: false,
                labels: false
            }
        );
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut state = ViewState::default();
        state.apply(ViewEvent::SetSpeed(12.0));
        assert_eq!(state.speed, MAX_SPEED);
        state.apply(ViewEvent::SetSpeed(-1.0));
        assert_eq!(state.speed, MIN_SPEED);
        state.apply(ViewEvent::SetSpeed(f64::NAN));
        assert_eq!(state.speed, DEFAULT_SPEED);
    }

    #[test]
    fn test_removal_clears_matching_selection_only() {
        let mut state = ViewState::default();
        state.apply(ViewEvent::Select(Selection::Custom(PlanetId::new(4))));

        state.apply(ViewEvent::PlanetRemoved(PlanetId::new(5)));
        assert!(state.selection.is_some());

        state.apply(ViewEvent::PlanetRemoved(PlanetId::new(4)));
        assert!(state.selection.is_none());
    }

    #[test]
    fn test_clearing_custom_keeps_catalog_selection() {
        let mut state = ViewState::default();
        state.apply(ViewEvent::Select(Selection::Catalog("Mars".into())));
        state.apply(ViewEvent::CustomCleared);
        assert_eq!(state.selection, Some(Selection::Catalog("Mars".into())));
    }

    #[test]
    fn test_reset_view() {
        let mut state = ViewState::default();
        state.apply(ViewEvent::Select(Selection::Catalog("Earth".into())));
        assert_eq!(state.apply(ViewEvent::ResetView), ViewEffect::ResetCamera);
        assert!(state.selection.is_none());
    }
}
