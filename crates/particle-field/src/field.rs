//! The particle population and its advection step.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;
use viz_common::GeoBounds;
use wind_grid::WindGrid;

use crate::particle::Particle;

/// The live particle population for one wind field.
///
/// The population size always equals the configured count: resizing pads
/// with fresh particles or truncates, never resetting survivors.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: GeoBounds,
    max_age: u32,
    rng: ChaCha8Rng,
}

impl ParticleField {
    /// Seed a population of `count` particles uniformly over `bounds`.
    ///
    /// A fixed `seed` makes the whole animation deterministic; `None`
    /// seeds from OS entropy.
    pub fn new(count: usize, bounds: GeoBounds, max_age: u32, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let particles = (0..count)
            .map(|_| Particle::spawn(&mut rng, &bounds, max_age))
            .collect();

        Self {
            particles,
            bounds,
            max_age,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    /// Grow or shrink the population to `count`.
    ///
    /// Existing particles keep their positions and ages; growth appends
    /// freshly spawned particles.
    pub fn resize(&mut self, count: usize) {
        if count < self.particles.len() {
            self.particles.truncate(count);
        } else {
            while self.particles.len() < count {
                self.particles
                    .push(Particle::spawn(&mut self.rng, &self.bounds, self.max_age));
            }
        }
    }

    /// Advance every particle by one frame.
    ///
    /// Each particle samples the wind at its current position
    /// (nearest-neighbor), displaces by `(u, v) * scale * speed_factor`
    /// degrees, and ages by one frame. Expired or escaped particles are
    /// recycled in place.
    pub fn step(&mut self, grid: &WindGrid, scale: f64, speed_factor: f64) {
        let factor = scale * speed_factor;
        let mut recycled = 0usize;

        for particle in &mut self.particles {
            let sample = grid.sample_nearest(particle.lon, particle.lat);
            particle.speed = sample.speed();
            particle.lon += sample.u as f64 * factor;
            particle.lat += sample.v as f64 * factor;
            particle.age += 1;

            if particle.is_expired() || !self.bounds.contains(particle.lon, particle.lat) {
                particle.respawn(&mut self.rng, &self.bounds, self.max_age);
                recycled += 1;
            }
        }

        trace!(
            particles = self.particles.len(),
            recycled,
            "Advection step complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_grid(u: f32, v: f32) -> WindGrid {
        WindGrid::new(
            vec![-10.0, 0.0, 10.0],
            vec![-10.0, 0.0, 10.0],
            vec![u; 9],
            vec![v; 9],
        )
        .unwrap()
    }

    fn test_bounds() -> GeoBounds {
        GeoBounds::new(-10.0, -10.0, 10.0, 10.0)
    }

    #[test]
    fn test_population_size_is_stable_across_steps() {
        let grid = uniform_grid(3.0, -2.0);
        let mut field = ParticleField::new(250, test_bounds(), 20, Some(42));

        for _ in 0..100 {
            field.step(&grid, 0.05, 1.0);
            assert_eq!(field.len(), 250);
        }
    }

    #[test]
    fn test_particles_stay_in_bounds_after_any_step() {
        // Strong eastward wind pushes everything out fast; every escape
        // must be recycled back inside.
        let grid = uniform_grid(50.0, 0.0);
        let mut field = ParticleField::new(100, test_bounds(), 1000, Some(7));

        for _ in 0..50 {
            field.step(&grid, 0.1, 1.0);
            for p in field.particles() {
                assert!(field.bounds().contains(p.lon, p.lat));
            }
        }
    }

    #[test]
    fn test_uniform_advection_displacement() {
        let grid = uniform_grid(2.0, 1.0);
        let mut field = ParticleField::new(10, test_bounds(), 10_000, Some(3));

        let before: Vec<(f64, f64)> = field.particles().iter().map(|p| (p.lon, p.lat)).collect();
        field.step(&grid, 0.5, 2.0);

        for (p, (lon0, lat0)) in field.particles().iter().zip(before) {
            if p.age == 1 {
                // factor = 0.5 * 2.0 = 1.0 -> displaced by exactly (u, v)
                assert!((p.lon - (lon0 + 2.0)).abs() < 1e-9);
                assert!((p.lat - (lat0 + 1.0)).abs() < 1e-9);
                assert_eq!(p.speed, (5.0f32).sqrt());
            }
        }
    }

    #[test]
    fn test_resize_grows_without_resetting_survivors() {
        let grid = uniform_grid(1.0, 0.0);
        let mut field = ParticleField::new(10, test_bounds(), 10_000, Some(9));
        field.step(&grid, 0.01, 1.0);

        let survivor = field.particles()[0];
        field.resize(20);
        assert_eq!(field.len(), 20);
        assert_eq!(field.particles()[0].lon, survivor.lon);
        assert_eq!(field.particles()[0].age, survivor.age);
        // New particles start fresh
        assert_eq!(field.particles()[19].age, 0);
    }

    #[test]
    fn test_resize_truncates() {
        let mut field = ParticleField::new(30, test_bounds(), 100, Some(11));
        field.resize(5);
        assert_eq!(field.len(), 5);
    }

    #[test]
    fn test_expiry_triggers_respawn() {
        let grid = uniform_grid(0.0, 0.0); // calm: nothing ever escapes
        let mut field = ParticleField::new(50, test_bounds(), 4, Some(13));

        // After more steps than any max_age, every particle must have
        // been recycled at least once and be younger than its cap.
        for _ in 0..20 {
            field.step(&grid, 0.1, 1.0);
        }
        for p in field.particles() {
            assert!(p.age <= p.max_age);
        }
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let grid = uniform_grid(1.0, 1.0);
        let mut a = ParticleField::new(40, test_bounds(), 30, Some(99));
        let mut b = ParticleField::new(40, test_bounds(), 30, Some(99));

        for _ in 0..25 {
            a.step(&grid, 0.05, 1.5);
            b.step(&grid, 0.05, 1.5);
        }
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.lon, pb.lon);
            assert_eq!(pa.lat, pb.lat);
            assert_eq!(pa.age, pb.age);
        }
    }
}
