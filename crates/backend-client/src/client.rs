//! Typed HTTP client for the backend REST surface.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument};
use viz_common::{SessionId, VizError, VizResult};

use crate::types::{
    BatchUploadResponse, HealthResponse, SessionDeleteResponse, UploadResponse, WindDataResponse,
};

/// Operational limits fixed by the deployment environment.
const MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024; // 500MB
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(75);

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. "http://localhost:8000".
    pub base_url: String,
    /// HTTP request timeout.
    pub request_timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Maximum accepted upload size per file.
    pub max_upload_bytes: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: REQUEST_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

/// Form options for the upload endpoints.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub create_tileset: bool,
    pub visualization_type: String,
    /// Single upload: optional tileset name. Batch: names are joined
    /// comma-separated under `tileset_names`.
    pub tileset_names: Vec<String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            create_tileset: true,
            visualization_type: "vector".to_string(),
            tileset_names: Vec::new(),
        }
    }
}

/// Query parameters for the wind-data endpoint.
#[derive(Debug, Clone, Default)]
pub struct WindDataQuery {
    pub time_index: usize,
    pub level_index: Option<usize>,
}

/// HTTP client for the visualization backend.
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> VizResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| VizError::ConfigError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Upload one NetCDF file.
    #[instrument(skip(self, options), fields(path = %path.display()))]
    pub async fn upload_file(
        &self,
        path: &Path,
        options: &UploadOptions,
    ) -> VizResult<UploadResponse> {
        let mut form = Form::new()
            .part("file", self.file_part(path).await?)
            .text("create_tileset", bool_field(options.create_tileset))
            .text("visualization_type", options.visualization_type.clone());
        if let Some(name) = options.tileset_names.first() {
            form = form.text("tileset_name", name.clone());
        }

        let response = self
            .http
            .post(self.url("/api/upload-netcdf"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let response = check_status(response).await?;
        Ok(response.json().await.map_err(map_reqwest_error)?)
    }

    /// Upload several NetCDF files in one batch request.
    #[instrument(skip(self, paths, options), fields(count = paths.len()))]
    pub async fn upload_batch(
        &self,
        paths: &[impl AsRef<Path>],
        options: &UploadOptions,
    ) -> VizResult<BatchUploadResponse> {
        let mut form = Form::new();
        for path in paths {
            form = form.part("files", self.file_part(path.as_ref()).await?);
        }
        form = form
            .text("create_tileset", bool_field(options.create_tileset))
            .text("visualization_type", options.visualization_type.clone());
        if !options.tileset_names.is_empty() {
            form = form.text("tileset_names", options.tileset_names.join(","));
        }

        let response = self
            .http
            .post(self.url("/api/upload-netcdf-batch"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let response = check_status(response).await?;
        Ok(response.json().await.map_err(map_reqwest_error)?)
    }

    /// Fetch the gridded wind field for a session.
    #[instrument(skip(self, query), fields(session = %session))]
    pub async fn wind_data(
        &self,
        session: &SessionId,
        query: &WindDataQuery,
    ) -> VizResult<WindDataResponse> {
        let mut request = self
            .http
            .get(self.url(&format!("/api/wind-data/{}", session)))
            .query(&[("time_index", query.time_index)]);
        if let Some(level) = query.level_index {
            request = request.query(&[("level_index", level)]);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(VizError::NoWindData(session.to_string()));
        }
        let response = check_status(response).await?;
        Ok(response.json().await.map_err(map_reqwest_error)?)
    }

    /// Release the backend's session resources.
    ///
    /// Returns whether the server acknowledged the deletion.
    #[instrument(skip(self), fields(session = %session))]
    pub async fn delete_session(&self, session: &SessionId) -> VizResult<bool> {
        let response = self
            .http
            .delete(self.url(&format!("/api/session/{}", session)))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(VizError::SessionNotFound(session.to_string()));
        }
        let response = check_status(response).await?;
        let ack: SessionDeleteResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(ack.success)
    }

    /// Probe backend liveness.
    pub async fn health(&self) -> VizResult<HealthResponse> {
        let response = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        Ok(response.json().await.map_err(map_reqwest_error)?)
    }

    /// Build a multipart file part, enforcing the upload size limit
    /// before any bytes hit the network.
    async fn file_part(&self, path: &Path) -> VizResult<Part> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            VizError::InvalidSelection(format!("{}: {}", path.display(), e))
        })?;
        if metadata.len() > self.config.max_upload_bytes {
            return Err(VizError::FileTooLarge {
                path: path.display().to_string(),
                size: metadata.len(),
                limit: self.config.max_upload_bytes,
            });
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.nc")
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        debug!(file = %filename, size = bytes.len(), "Prepared upload part");

        Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/x-netcdf")
            .map_err(|e| VizError::InternalError(format!("invalid mime type: {}", e)))
    }
}

fn bool_field(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// Map transport-level reqwest failures onto the error taxonomy.
fn map_reqwest_error(err: reqwest::Error) -> VizError {
    if err.is_timeout() {
        VizError::Timeout
    } else {
        VizError::Transport(err.to_string())
    }
}

/// Turn non-2xx responses into errors carrying the server's message text.
async fn check_status(response: Response) -> VizResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(VizError::HttpStatus {
        status: status.as_u16(),
        message,
    })
}
