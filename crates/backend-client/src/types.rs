//! Response envelope types for the backend's REST surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use viz_common::{GeoBounds, VizError, VizResult};
use wind_grid::{WindComponents, WindGrid};

/// Dataset metadata extracted by the backend during analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Dimension name to size.
    #[serde(default)]
    pub dimensions: HashMap<String, u64>,
    /// Data variable names.
    #[serde(default)]
    pub variables: Vec<String>,
    /// Coordinate variable names.
    #[serde(default)]
    pub coordinates: Vec<String>,
    /// Global attributes, passed through untyped.
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Envelope for a single-file upload (also each entry of a batch result).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub bounds: Option<GeoBounds>,
    #[serde(default)]
    pub metadata: Option<DatasetMetadata>,
    #[serde(default)]
    pub wind_components: Option<WindComponents>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadResponse {
    /// The server's error text, or a placeholder if the envelope failed
    /// without one.
    pub fn error_text(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "unknown server error".to_string())
    }
}

/// Envelope for a multi-file upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUploadResponse {
    #[serde(default)]
    pub batch_id: Option<String>,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub processed_files: usize,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub files: Vec<UploadResponse>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl BatchUploadResponse {
    /// First successfully processed file, if any.
    pub fn first_success(&self) -> Option<&UploadResponse> {
        self.files.iter().find(|f| f.success)
    }

    /// Best available error text when nothing succeeded.
    pub fn error_text(&self) -> String {
        self.files
            .iter()
            .find_map(|f| f.error.clone())
            .or_else(|| self.errors.first().cloned())
            .unwrap_or_else(|| "no files were processed".to_string())
    }
}

/// Coordinate axes of the wind-data grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridAxes {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    /// (rows, cols) as reported by the backend.
    #[serde(default)]
    pub shape: Option<Vec<usize>>,
}

/// Units and slicing info attached to a wind-data response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindDataMetadata {
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub time_index: Option<usize>,
    #[serde(default)]
    pub level_index: Option<usize>,
}

/// Envelope for the gridded wind field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindDataResponse {
    pub success: bool,
    #[serde(default)]
    pub grid: Option<GridAxes>,
    #[serde(default)]
    pub u_component: Vec<Vec<f32>>,
    #[serde(default)]
    pub v_component: Vec<Vec<f32>>,
    /// Precomputed speeds; redundant with (u, v) and ignored client-side.
    #[serde(default)]
    pub speed: Vec<Vec<f32>>,
    #[serde(default)]
    pub metadata: Option<WindDataMetadata>,
    #[serde(default)]
    pub error: Option<String>,
}

impl WindDataResponse {
    /// Convert the wire arrays into a validated [`WindGrid`].
    pub fn into_grid(self) -> VizResult<WindGrid> {
        if !self.success {
            return Err(VizError::InvalidGrid(
                self.error
                    .unwrap_or_else(|| "server reported failure".to_string()),
            ));
        }
        let axes = self
            .grid
            .ok_or_else(|| VizError::InvalidGrid("response has no grid axes".to_string()))?;

        WindGrid::from_components(axes.lons, axes.lats, &self.u_component, &self.v_component)
            .map_err(|e| VizError::InvalidGrid(e.to_string()))
    }
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub active_sessions: Option<u64>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Session deletion acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDeleteResponse {
    #[serde(default)]
    pub success: bool,
}
