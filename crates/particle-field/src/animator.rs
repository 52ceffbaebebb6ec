//! The animator state machine.

use tracing::{debug, info};
use wind_grid::WindGrid;

use crate::color::speed_color;
use crate::field::ParticleField;
use crate::surface::{Canvas, CanvasError};

/// Animator lifecycle states.
///
/// Idle -> (start) -> Running <-> (pause/resume) -> Paused,
/// and any state -> (stop) -> Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running,
    Paused,
}

/// Live animation parameters.
#[derive(Debug, Clone)]
pub struct AnimatorConfig {
    /// Number of particles in the population.
    pub particle_count: usize,
    /// User-adjustable speed multiplier.
    pub speed_factor: f64,
    /// Degrees of displacement per m/s per frame, before the speed factor.
    pub advection_scale: f64,
    /// Upper bound on particle lifetime in frames.
    pub max_age: u32,
    /// Per-frame alpha keep factor for the trail fade.
    pub trail_fade: f32,
    /// Particle splat size in pixels.
    pub point_size: u32,
    /// Output frame width in pixels.
    pub canvas_width: usize,
    /// Output frame height in pixels.
    pub canvas_height: usize,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            particle_count: 2000,
            speed_factor: 1.0,
            advection_scale: 0.02,
            max_age: 120,
            trail_fade: 0.92,
            point_size: 2,
            canvas_width: 800,
            canvas_height: 600,
            seed: None,
        }
    }
}

/// Canvas-backed wind particle animator.
///
/// Owns the particle population, the current wind grid snapshot, and the
/// frame buffer exclusively. Callers drive it with [`Animator::tick`],
/// typically from an [`crate::AnimationDriver`].
pub struct Animator {
    config: AnimatorConfig,
    state: AnimatorState,
    grid: Option<WindGrid>,
    field: Option<ParticleField>,
    canvas: Canvas,
    speed_range: (f32, f32),
    frames_rendered: u64,
}

impl Animator {
    pub fn new(config: AnimatorConfig) -> Self {
        let canvas = Canvas::new(config.canvas_width, config.canvas_height);
        Self {
            config,
            state: AnimatorState::Idle,
            grid: None,
            field: None,
            canvas,
            speed_range: (0.0, 0.0),
            frames_rendered: 0,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn particle_count(&self) -> usize {
        self.field.as_ref().map(|f| f.len()).unwrap_or(0)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Seed the animator with a wind field and enter Running.
    ///
    /// Any previous grid and population are replaced wholesale; the
    /// canvas restarts from transparent.
    pub fn start(&mut self, grid: WindGrid) {
        let bounds = grid.bounds();
        self.speed_range = grid.speed_range();
        self.field = Some(ParticleField::new(
            self.config.particle_count,
            bounds,
            self.config.max_age,
            self.config.seed,
        ));
        self.grid = Some(grid);
        self.canvas.clear();
        self.frames_rendered = 0;
        self.state = AnimatorState::Running;

        info!(
            particles = self.config.particle_count,
            width = self.canvas.width(),
            height = self.canvas.height(),
            "Animation started"
        );
    }

    /// Suspend stepping without discarding particle state.
    pub fn pause(&mut self) {
        if self.state == AnimatorState::Running {
            self.state = AnimatorState::Paused;
            debug!("Animation paused");
        }
    }

    /// Resume stepping after a pause.
    pub fn resume(&mut self) {
        if self.state == AnimatorState::Paused {
            self.state = AnimatorState::Running;
            debug!("Animation resumed");
        }
    }

    /// Halt the animation and release everything: population, grid
    /// snapshot, and rendered frame. Safe to call from any state.
    pub fn stop(&mut self) {
        self.field = None;
        self.grid = None;
        self.canvas.clear();
        self.speed_range = (0.0, 0.0);
        if self.state != AnimatorState::Idle {
            info!(frames = self.frames_rendered, "Animation stopped");
        }
        self.state = AnimatorState::Idle;
    }

    /// Adjust the speed multiplier live.
    pub fn set_speed_factor(&mut self, factor: f64) {
        self.config.speed_factor = factor;
    }

    /// Adjust the particle count live; survivors keep their state.
    pub fn set_particle_count(&mut self, count: usize) {
        self.config.particle_count = count;
        if let Some(field) = self.field.as_mut() {
            field.resize(count);
        }
    }

    /// Render one frame: fade the trail, advect, draw.
    ///
    /// A no-op unless Running.
    pub fn tick(&mut self) {
        if self.state != AnimatorState::Running {
            return;
        }
        let (Some(grid), Some(field)) = (self.grid.as_ref(), self.field.as_mut()) else {
            return;
        };

        self.canvas.fade(self.config.trail_fade);
        field.step(grid, self.config.advection_scale, self.config.speed_factor);

        let bounds = *field.bounds();
        let (min_speed, max_speed) = self.speed_range;
        for particle in field.particles() {
            let (x, y) = self.canvas.to_pixel(&bounds, particle.lon, particle.lat);
            let color = speed_color(particle.speed, min_speed, max_speed);
            self.canvas
                .fill_square(x, y, self.config.point_size, color);
        }

        self.frames_rendered += 1;
    }

    /// Encode the current frame as PNG bytes.
    pub fn frame_png(&self) -> Result<Vec<u8>, CanvasError> {
        self.canvas.to_png()
    }
}
