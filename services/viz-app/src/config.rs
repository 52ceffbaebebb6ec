//! Configuration loading for the visualization client.
//!
//! Settings come from an optional YAML file; every field has a default
//! so a missing file means stock settings.

use std::path::Path;

use anyhow::{Context, Result};
use particle_field::AnimatorConfig;
use serde::Deserialize;
use tracing::{debug, warn};

/// Root settings for the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
}

/// Backend connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// Animation parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimationSettings {
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
    #[serde(default = "default_speed_factor")]
    pub speed_factor: f64,
    #[serde(default = "default_advection_scale")]
    pub advection_scale: f64,
    #[serde(default = "default_max_age")]
    pub max_age: u32,
    #[serde(default = "default_trail_fade")]
    pub trail_fade: f32,
    #[serde(default = "default_point_size")]
    pub point_size: u32,
    #[serde(default = "default_frame_width")]
    pub frame_width: usize,
    #[serde(default = "default_frame_height")]
    pub frame_height: usize,
    /// Frames per second for the driver loop.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Fixed RNG seed for reproducible output.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            particle_count: default_particle_count(),
            speed_factor: default_speed_factor(),
            advection_scale: default_advection_scale(),
            max_age: default_max_age(),
            trail_fade: default_trail_fade(),
            point_size: default_point_size(),
            frame_width: default_frame_width(),
            frame_height: default_frame_height(),
            fps: default_fps(),
            seed: None,
        }
    }
}

fn default_particle_count() -> usize {
    2000
}

fn default_speed_factor() -> f64 {
    1.0
}

fn default_advection_scale() -> f64 {
    0.02
}

fn default_max_age() -> u32 {
    120
}

fn default_trail_fade() -> f32 {
    0.92
}

fn default_point_size() -> u32 {
    2
}

fn default_frame_width() -> usize {
    800
}

fn default_frame_height() -> usize {
    600
}

fn default_fps() -> u32 {
    30
}

impl Settings {
    /// Load settings from a YAML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Translate into the animator's own configuration type.
    pub fn animator_config(&self) -> AnimatorConfig {
        AnimatorConfig {
            particle_count: self.animation.particle_count,
            speed_factor: self.animation.speed_factor,
            advection_scale: self.animation.advection_scale,
            max_age: self.animation.max_age,
            trail_fade: self.animation.trail_fade,
            point_size: self.animation.point_size,
            canvas_width: self.animation.frame_width,
            canvas_height: self.animation.frame_height,
            seed: self.animation.seed,
        }
    }
}
