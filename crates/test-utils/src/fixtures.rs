//! Canned backend responses and upload fixtures.

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

use crate::generators::{linear_axis, vortex_wind_rows};

/// A successful single-upload response envelope with wind components.
pub fn upload_success_json(session_id: &str) -> Value {
    json!({
        "success": true,
        "session_id": session_id,
        "bounds": {
            "west": -10.0,
            "south": 40.0,
            "east": 10.0,
            "north": 60.0
        },
        "metadata": {
            "dimensions": {"lat": 5, "lon": 5, "time": 1},
            "variables": ["u10", "v10", "t2m"],
            "coordinates": ["lat", "lon", "time"],
            "attributes": {"source": "test fixture"}
        },
        "wind_components": {"u": "u10", "v": "v10"}
    })
}

/// A successful upload response for a dataset without wind variables.
pub fn upload_success_no_wind_json(session_id: &str) -> Value {
    json!({
        "success": true,
        "session_id": session_id,
        "bounds": {
            "west": -10.0,
            "south": 40.0,
            "east": 10.0,
            "north": 60.0
        },
        "metadata": {
            "dimensions": {"lat": 5, "lon": 5},
            "variables": ["t2m"],
            "coordinates": ["lat", "lon"],
            "attributes": {}
        },
        "wind_components": null
    })
}

/// A server-reported upload failure (2xx envelope, success: false).
pub fn upload_failure_json(error: &str) -> Value {
    json!({
        "success": false,
        "error": error
    })
}

/// A batch response wrapping one envelope per file.
pub fn batch_success_json(session_ids: &[&str]) -> Value {
    let files: Vec<Value> = session_ids
        .iter()
        .map(|id| upload_success_json(id))
        .collect();
    json!({
        "batch_id": uuid::Uuid::new_v4().to_string(),
        "total_files": session_ids.len(),
        "processed_files": session_ids.len(),
        "status": "completed",
        "files": files,
        "errors": []
    })
}

/// A wind-data response carrying a `width` x `height` vortex field.
pub fn wind_data_json(width: usize, height: usize) -> Value {
    let (u_rows, v_rows) = vortex_wind_rows(width, height, 1.0);
    let speed_rows: Vec<Vec<f32>> = u_rows
        .iter()
        .zip(&v_rows)
        .map(|(u_row, v_row)| {
            u_row
                .iter()
                .zip(v_row)
                .map(|(u, v)| (u * u + v * v).sqrt())
                .collect()
        })
        .collect();

    json!({
        "success": true,
        "grid": {
            "lons": linear_axis(-10.0, 20.0 / (width.max(2) - 1) as f64, width),
            "lats": linear_axis(40.0, 20.0 / (height.max(2) - 1) as f64, height),
            "shape": [height, width]
        },
        "u_component": u_rows,
        "v_component": v_rows,
        "speed": speed_rows,
        "metadata": {
            "units": "m/s",
            "time_index": 0,
            "level_index": null
        }
    })
}

/// A wind-data failure response.
pub fn wind_data_failure_json(error: &str) -> Value {
    json!({
        "success": false,
        "error": error
    })
}

/// Write small fake `.nc` files into a temp directory.
///
/// The client never parses NetCDF locally (the backend does), so any
/// bytes will do; a recognizable magic prefix keeps the fixtures honest.
pub fn write_temp_nc_files(names: &[&str]) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().expect("create temp dir");
    let mut paths = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.path().join(name);
        fs::write(&path, b"CDF\x01test-fixture-not-a-real-dataset").expect("write fixture file");
        paths.push(path);
    }
    (dir, paths)
}
