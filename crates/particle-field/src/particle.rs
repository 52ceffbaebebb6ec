//! Individual particle state and recycling.

use rand::Rng;
use viz_common::GeoBounds;

/// A single advected point.
///
/// Particles live in grid coordinate space (lon, lat) and are recycled
/// in place: an expired or escaped particle is reset to a fresh random
/// position rather than being dropped from the population.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// Longitude position in degrees.
    pub lon: f64,
    /// Latitude position in degrees.
    pub lat: f64,
    /// Frames since the particle last (re)spawned.
    pub age: u32,
    /// Frames after which the particle is recycled.
    pub max_age: u32,
    /// Speed sampled at the last advection step (m/s), for color encoding.
    pub speed: f32,
}

impl Particle {
    /// Spawn a fresh particle at a uniformly random in-bounds position.
    ///
    /// The lifetime is drawn from the upper half of `max_age` so the
    /// population's respawns stay staggered instead of pulsing together.
    pub fn spawn<R: Rng>(rng: &mut R, bounds: &GeoBounds, max_age: u32) -> Self {
        let mut particle = Self {
            lon: 0.0,
            lat: 0.0,
            age: 0,
            max_age: 0,
            speed: 0.0,
        };
        particle.respawn(rng, bounds, max_age);
        particle
    }

    /// Reset this particle in place: new random position, age zero.
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, bounds: &GeoBounds, max_age: u32) {
        self.lon = bounds.west + rng.gen::<f64>() * bounds.width();
        self.lat = bounds.south + rng.gen::<f64>() * bounds.height();
        self.age = 0;
        self.speed = 0.0;
        let floor = (max_age / 2).max(1);
        self.max_age = rng.gen_range(floor..=max_age.max(floor));
    }

    /// Whether this particle has outlived its maximum age.
    pub fn is_expired(&self) -> bool {
        self.age > self.max_age
    }
}
