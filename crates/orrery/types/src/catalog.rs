//! The fixed catalog of built-in bodies
//!
//! Values are presentation units, not astronomical ones.

use crate::planet::PlanetKind;

/// A built-in solar system body
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogBody {
    pub name: &'static str,
    pub kind: PlanetKind,
    pub radius: f64,
    pub distance: f64,
    /// Angle advanced per frame at 1x speed
    pub orbital_speed: f64,
    pub color: u32,
    pub temperature: f64,
    pub atmosphere: &'static [&'static str],
    pub has_water: bool,
    pub description: &'static str,
}

impl CatalogBody {
    /// The Sun sits at the origin and does not orbit
    pub fn is_star(&self) -> bool {
        self.kind == PlanetKind::Star
    }
}

static CATALOG: [CatalogBody; 9] = [
    CatalogBody {
        name: "Sun",
        kind: PlanetKind::Star,
        radius: 5.0,
        distance: 0.0,
        orbital_speed: 0.0,
        color: 0xffff00,
        temperature: 5500.0,
        atmosphere: &[],
        has_water: false,
        description: "The star at the centre of our solar system.",
    },
    CatalogBody {
        name: "Mercury",
        kind: PlanetKind::Rocky,
        radius: 0.4,
        distance: 8.0,
        orbital_speed: 0.02,
        color: 0x8c7853,
        temperature: 427.0,
        atmosphere: &[],
        has_water: false,
        description: "The closest planet to the Sun, and the fastest to complete an orbit.",
    },
    CatalogBody {
        name: "Venus",
        kind: PlanetKind::Rocky,
        radius: 0.6,
        distance: 11.0,
        orbital_speed: 0.015,
        color: 0xffc649,
        temperature: 462.0,
        atmosphere: &["co2"],
        has_water: false,
        description: "Named after the Roman goddess of love, it is the hottest planet in the solar system.",
    },
    CatalogBody {
        name: "Earth",
        kind: PlanetKind::Rocky,
        radius: 0.6,
        distance: 14.0,
        orbital_speed: 0.01,
        color: 0x6b93d6,
        temperature: 15.0,
        atmosphere: &["oxygen", "nitrogen"],
        has_water: true,
        description: "Our home planet, the only one known to hold free oxygen and liquid water.",
    },
    CatalogBody {
        name: "Mars",
        kind: PlanetKind::Rocky,
        radius: 0.5,
        distance: 18.0,
        orbital_speed: 0.008,
        color: 0xc1440e,
        temperature: -65.0,
        atmosphere: &["co2"],
        has_water: false,
        description: "The fourth planet from the Sun and the second smallest, nicknamed the red planet.",
    },
    CatalogBody {
        name: "Jupiter",
        kind: PlanetKind::Gaseous,
        radius: 1.2,
        distance: 24.0,
        orbital_speed: 0.005,
        color: 0xd8ca9d,
        temperature: -110.0,
        atmosphere: &["hydrogen", "helium"],
        has_water: false,
        description: "The largest planet in the solar system, named after the king of the Roman gods.",
    },
    CatalogBody {
        name: "Saturn",
        kind: PlanetKind::Gaseous,
        radius: 1.0,
        distance: 30.0,
        orbital_speed: 0.003,
        color: 0xfad5a5,
        temperature: -140.0,
        atmosphere: &["hydrogen", "helium"],
        has_water: false,
        description: "The sixth planet from the Sun and the second largest, known for its rings.",
    },
    CatalogBody {
        name: "Uranus",
        kind: PlanetKind::Gaseous,
        radius: 0.8,
        distance: 36.0,
        orbital_speed: 0.002,
        color: 0x4fd0e7,
        temperature: -195.0,
        atmosphere: &["hydrogen", "helium", "methane"],
        has_water: false,
        description: "The first planet found with a telescope, notable for its extreme axial tilt.",
    },
    CatalogBody {
        name: "Neptune",
        kind: PlanetKind::Gaseous,
        radius: 0.8,
        distance: 42.0,
        orbital_speed: 0.001,
        color: 0x4b70dd,
        temperature: -200.0,
        atmosphere: &["hydrogen", "helium", "methane"],
        has_water: false,
        description: "The eighth planet from the Sun, predicted by mathematics before it was observed.",
    },
];

/// All built-in bodies, Sun first, then by distance
pub fn catalog() -> &'static [CatalogBody] {
    &CATALOG
}

/// Look up a built-in body by name (case-insensitive)
pub fn catalog_body(name: &str) -> Option<&'static CatalogBody> {
    CATALOG
        .iter()
        .find(|body| body.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_sun_and_eight_planets() {
        let bodies = catalog();
        assert_eq!(bodies.len(), 9);
        assert_eq!(bodies.iter().filter(|b| b.is_star()).count(), 1);
        assert!(bodies[0].is_star());
    }

    #[test]
    fn test_planets_ordered_by_distance() {
        let distances: Vec<f64> = catalog().iter().map(|b| b.distance).collect();
        assert!(distances.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let earth = catalog_body("earth").unwrap();
        assert_eq!(earth.distance, 14.0);
        assert!(earth.has_water);
        assert!(catalog_body("Vulcan").is_none());
    }
}
