//! Wind particle animation.
//!
//! Implements the particle system that advects points through a sampled
//! wind field and renders them to an RGBA canvas with a trail-fade
//! effect:
//! - Particle population with in-place recycling
//! - Per-frame advection stepping
//! - Speed color ramp
//! - Canvas with trail fade and PNG frame encoding
//! - The Idle/Running/Paused animator state machine and its periodic
//!   driver task

pub mod animator;
pub mod color;
pub mod driver;
pub mod field;
pub mod particle;
pub mod surface;

pub use animator::{Animator, AnimatorConfig, AnimatorState};
pub use color::{speed_color, Color};
pub use driver::AnimationDriver;
pub use field::ParticleField;
pub use particle::Particle;
pub use surface::{Canvas, CanvasError};
