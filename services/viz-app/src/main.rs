//! Weather visualization client.
//!
//! Uploads NetCDF files to the visualization backend and animates the
//! returned wind field as PNG frames:
//! - `upload` — validate and upload, print the session and metadata
//! - `animate` — upload, then render the wind particle animation to disk
//! - `clear` — release a server-side session
//! - `health` — probe backend liveness

mod app;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use backend_client::{ApiClient, ClientConfig, UploadOptions};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use viz_common::SessionId;

use app::App;
use config::Settings;

#[derive(Parser, Debug)]
#[command(name = "viz-app")]
#[command(about = "NetCDF upload and wind particle animation client")]
struct Args {
    /// Backend base URL (overrides the settings file)
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,

    /// Settings file
    #[arg(long, env = "VIZ_SETTINGS", default_value = "config/viz-app.yaml")]
    settings: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload NetCDF file(s) and print the resulting session
    Upload {
        /// Files to upload (.nc)
        files: Vec<PathBuf>,

        /// Visualization type requested from the backend
        #[arg(long, default_value = "vector")]
        visualization_type: String,

        /// Skip server-side tileset creation
        #[arg(long)]
        no_tileset: bool,

        /// Tileset name(s), one per file
        #[arg(long)]
        tileset_name: Vec<String>,
    },

    /// Upload and render the wind animation to PNG frames
    Animate {
        /// Files to upload (.nc)
        files: Vec<PathBuf>,

        /// Output directory for frames
        #[arg(long, default_value = "frames")]
        output_dir: PathBuf,

        /// Number of frames to render
        #[arg(long, default_value = "120")]
        frames: usize,

        /// Override the configured particle count
        #[arg(long)]
        particles: Option<usize>,

        /// Override the configured speed factor
        #[arg(long)]
        speed_factor: Option<f64>,

        /// Keep the server-side session alive after rendering
        #[arg(long)]
        keep_session: bool,
    },

    /// Release a server-side session
    Clear {
        /// Session identifier to delete
        session: String,
    },

    /// Probe backend liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut settings = Settings::load(&args.settings)?;
    if let Some(url) = args.backend_url {
        settings.backend.base_url = url;
    }

    match args.command {
        Command::Upload {
            files,
            visualization_type,
            no_tileset,
            tileset_name,
        } => {
            let options = UploadOptions {
                create_tileset: !no_tileset,
                visualization_type,
                tileset_names: tileset_name,
            };
            let mut app = App::new(&settings)?;
            match app.upload(&files, &options).await {
                Ok(summary) => {
                    println!("Session: {}", summary.session_id);
                    println!(
                        "Wind data: {}",
                        if summary.has_wind { "available" } else { "none" }
                    );
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        Command::Animate {
            files,
            output_dir,
            frames,
            particles,
            speed_factor,
            keep_session,
        } => {
            if let Some(count) = particles {
                settings.animation.particle_count = count;
            }
            if let Some(factor) = speed_factor {
                settings.animation.speed_factor = factor;
            }

            let mut app = App::new(&settings)?;
            let summary = match app.upload(&files, &UploadOptions::default()).await {
                Ok(summary) => summary,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };

            if !summary.has_wind {
                eprintln!("Dataset has no wind components; nothing to animate");
                app.clear().await?;
                std::process::exit(1);
            }

            let written = app.render_frames(frames, &output_dir).await?;
            println!("Wrote {} frames to {}", written, output_dir.display());

            if !keep_session {
                app.clear().await?;
            } else {
                info!(session = %summary.session_id, "Session kept alive");
                println!("Session kept: {}", summary.session_id);
            }
        }

        Command::Clear { session } => {
            let client = ApiClient::new(ClientConfig::new(settings.backend.base_url.clone()))?;
            let session = SessionId::new(session)?;
            match client.delete_session(&session).await {
                Ok(true) => println!("Session {} released", session),
                Ok(false) => println!("Session {} not acknowledged by server", session),
                Err(e) => {
                    eprintln!("Failed to release session: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Command::Health => {
            let client = ApiClient::new(ClientConfig::new(settings.backend.base_url.clone()))?;
            let health = client.health().await?;
            println!("Status: {}", health.status);
            if let Some(sessions) = health.active_sessions {
                println!("Active sessions: {}", sessions);
            }
            if let Some(version) = health.version {
                println!("Version: {}", version);
            }
        }
    }

    Ok(())
}
