//! Orchestration between the upload controller and the animator.
//!
//! The controller owns the session; the animator owns canvas and
//! particles. This type is the only place the two meet: upload success
//! signals `start`, session clear signals `stop`. Particle state is
//! never touched from here.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use backend_client::{ApiClient, ClientConfig, UploadController, UploadOptions};
use particle_field::{AnimationDriver, Animator, AnimatorState};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Settings;

/// Summary of an upload, for display.
#[derive(Debug)]
pub struct UploadSummary {
    pub session_id: String,
    pub has_wind: bool,
}

/// The client application: one controller, one animator.
pub struct App {
    controller: UploadController,
    animator: Arc<Mutex<Animator>>,
    frame_interval: Duration,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = ApiClient::new(ClientConfig::new(settings.backend.base_url.clone()))
            .context("Failed to create backend client")?;
        let animator = Arc::new(Mutex::new(Animator::new(settings.animator_config())));
        let frame_interval = Duration::from_secs_f64(1.0 / settings.animation.fps.max(1) as f64);

        Ok(Self {
            controller: UploadController::new(client),
            animator,
            frame_interval,
        })
    }

    pub fn animator(&self) -> Arc<Mutex<Animator>> {
        self.animator.clone()
    }

    /// Upload files and, when a wind field comes back, start the
    /// animation with it.
    pub async fn upload(
        &mut self,
        paths: &[PathBuf],
        options: &UploadOptions,
    ) -> Result<UploadSummary> {
        let outcome = self.controller.upload(paths, options).await?;
        let has_wind = outcome.wind_grid.is_some();

        if let Some(grid) = outcome.wind_grid {
            self.animator.lock().await.start(grid);
        } else {
            info!(session = %outcome.session_id, "No wind field; nothing to animate");
        }

        Ok(UploadSummary {
            session_id: outcome.session_id.to_string(),
            has_wind,
        })
    }

    /// Run the frame loop and write `frames` numbered PNGs.
    ///
    /// The driver ticks the shared animator at the configured fps while
    /// this task snapshots each frame to disk.
    pub async fn render_frames(&mut self, frames: usize, output_dir: &Path) -> Result<usize> {
        {
            let animator = self.animator.lock().await;
            if animator.state() == AnimatorState::Idle {
                anyhow::bail!("no wind field loaded; upload a dataset with wind components first");
            }
        }
        tokio::fs::create_dir_all(output_dir)
            .await
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        let driver = AnimationDriver::spawn(self.animator.clone(), self.frame_interval);
        let mut interval = tokio::time::interval(self.frame_interval);
        let mut written = 0usize;

        for index in 0..frames {
            interval.tick().await;
            let png = {
                let animator = self.animator.lock().await;
                animator.frame_png()?
            };
            let path = output_dir.join(format!("frame_{:05}.png", index));
            tokio::fs::write(&path, png)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written += 1;
        }

        driver.stop().await;
        info!(frames = written, dir = %output_dir.display(), "Frames written");
        Ok(written)
    }

    /// Clear the session and stop any running animation.
    pub async fn clear(&mut self) -> Result<()> {
        if let Err(e) = self.controller.clear().await {
            // Cleanup is best-effort all the way down
            warn!(error = %e, "Session clear reported an error");
        }
        self.animator.lock().await.stop();
        Ok(())
    }

    pub fn controller(&self) -> &UploadController {
        &self.controller
    }
}
