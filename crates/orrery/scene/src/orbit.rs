//! Per-frame orbital motion

use crate::visual::Vec3;
use orrery_types::{CatalogBody, PlanetRecord};
use rand::Rng;
use std::f64::consts::TAU;

/// Custom planet angular speed at distance 10
pub const CUSTOM_SPEED_FACTOR: f64 = 0.01;

/// Self-rotation per frame at speed 1
pub const PLANET_SPIN_RATE: f64 = 0.01;

/// Star self-rotation per frame at speed 1
pub const STAR_SPIN_RATE: f64 = 0.002;

/// Angular speed of a custom planet; farther planets orbit slower
pub fn custom_speed(distance: f64) -> f64 {
    CUSTOM_SPEED_FACTOR / (distance / 10.0)
}

/// Initial orbital phase, uniform in `[0, 2π)`
pub fn random_phase<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..TAU)
}

/// Orbit state of one body
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalMotion {
    pub distance: f64,
    /// Radians per frame at speed 1
    pub speed: f64,
    pub angle: f64,
    pub spin: f64,
    /// Stars rotate in place and never orbit
    pub star: bool,
}

impl OrbitalMotion {
    pub fn for_record<R: Rng + ?Sized>(record: &PlanetRecord, rng: &mut R) -> Self {
        Self {
            distance: record.distance,
            speed: custom_speed(record.distance),
            angle: random_phase(rng),
            spin: 0.0,
            star: false,
        }
    }

    pub fn for_catalog<R: Rng + ?Sized>(body: &CatalogBody, rng: &mut R) -> Self {
        let star = body.is_star();
        Self {
            distance: body.distance,
            speed: body.orbital_speed,
            angle: if star { 0.0 } else { random_phase(rng) },
            spin: 0.0,
            star,
        }
    }

    /// Advance one frame at the given speed multiplier and return the new position
    pub fn advance(&mut self, rate: f64) -> Vec3 {
        if self.star {
            self.spin += STAR_SPIN_RATE * rate;
        } else {
            self.angle += self.speed * rate;
            self.spin += PLANET_SPIN_RATE * rate;
        }
        self.position()
    }

    /// Position on the orbital plane
    pub fn position(&self) -> Vec3 {
        if self.star {
            return Vec3::default();
        }
        Vec3::new(
            self.angle.cos() * self.distance,
            0.0,
            self.angle.sin() * self.distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_types::catalog_body;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_custom_speed_scales_inversely_with_distance() {
        assert!((custom_speed(10.0) - 0.01).abs() < 1e-12);
        assert!((custom_speed(20.0) - 0.005).abs() < 1e-12);
        // negative distances orbit the other way
        assert!(custom_speed(-10.0) < 0.0);
    }

    #[test]
    fn test_speed_zero_freezes_motion() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut motion = OrbitalMotion::for_catalog(catalog_body("Earth").unwrap(), &mut rng);
        let before = motion.clone();
        motion.advance(0.0);
        assert_eq!(motion, before);
    }

    #[test]
    fn test_star_spins_in_place() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sun = OrbitalMotion::for_catalog(catalog_body("Sun").unwrap(), &mut rng);
        let position = sun.advance(2.0);
        assert_eq!(position, Vec3::default());
        assert!((sun.spin - 0.004).abs() < 1e-12);
    }

    #[test]
    fn test_advance_moves_along_circle() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut earth = OrbitalMotion::for_catalog(catalog_body("Earth").unwrap(), &mut rng);
        let start = earth.angle;
        let p = earth.advance(1.0);
        assert!((earth.angle - start - 0.01).abs() < 1e-12);
        assert!(((p.x * p.x + p.z * p.z).sqrt() - 14.0).abs() < 1e-9);
        assert_eq!(p.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_phase_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let phase = random_phase(&mut rng);
            prop_assert!((0.0..TAU).contains(&phase));
        }
    }
}
