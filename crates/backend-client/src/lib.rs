//! Client for the visualization backend's REST surface.
//!
//! Two layers:
//! - [`ApiClient`]: typed HTTP calls (multipart uploads, wind-data fetch,
//!   session delete, health probe) with the deployment environment's
//!   timeout and size limits baked in.
//! - [`UploadController`]: session lifecycle on top of the client —
//!   selection validation, single-vs-batch dispatch, wind-data follow-up,
//!   and the epoch guard that keeps stale responses from leaking past a
//!   session clear.

pub mod client;
pub mod controller;
pub mod types;

pub use client::{ApiClient, ClientConfig, UploadOptions, WindDataQuery};
pub use controller::{UploadController, UploadOutcome};
pub use types::{
    BatchUploadResponse, DatasetMetadata, GridAxes, HealthResponse, UploadResponse,
    WindDataMetadata, WindDataResponse,
};
