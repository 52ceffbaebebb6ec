//! Integration tests for the upload controller workflow.

use backend_client::{ApiClient, ClientConfig, UploadController, UploadOptions};
use serde_json::json;
use test_utils::{fixtures, MockBackend};
use viz_common::VizError;

fn controller_for(mock: &MockBackend) -> UploadController {
    UploadController::new(ApiClient::new(ClientConfig::new(mock.base_url())).unwrap())
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_upload_stores_session_and_loads_wind_grid() {
    let mock = MockBackend::start().await;
    mock.set_upload_response(200, fixtures::upload_success_json("20240115120000"));
    mock.set_wind_response(200, fixtures::wind_data_json(5, 5));
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["storm.nc"]);

    let outcome = controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.session_id.as_str(), "20240115120000");
    assert_eq!(controller.session().unwrap().as_str(), "20240115120000");
    assert!(outcome.bounds.is_some());

    let grid = outcome.wind_grid.expect("wind grid should be fetched");
    assert_eq!(grid.width(), 5);
    assert_eq!(grid.height(), 5);

    // Exactly one upload call and one wind-data call went out
    assert_eq!(mock.requests_to("/api/upload-netcdf").len(), 1);
    assert_eq!(
        mock.requests_to("/api/wind-data/20240115120000").len(),
        1
    );
}

#[tokio::test]
async fn test_upload_without_wind_components_skips_fetch() {
    let mock = MockBackend::start().await;
    mock.set_upload_response(200, fixtures::upload_success_no_wind_json("20240115130000"));
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["temps.nc"]);

    let outcome = controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap();

    assert!(outcome.wind_grid.is_none());
    // No wind-data request was issued
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_two_files_dispatch_as_batch() {
    let mock = MockBackend::start().await;
    mock.set_batch_response(200, fixtures::batch_success_json(&["s1", "s2"]));
    mock.set_wind_response(200, fixtures::wind_data_json(4, 4));
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["a.nc", "b.nc"]);

    let outcome = controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap();

    // First successful file's session becomes the active one
    assert_eq!(outcome.session_id.as_str(), "s1");
    assert_eq!(mock.requests_to("/api/upload-netcdf-batch").len(), 1);
}

// ============================================================================
// Server-reported failure
// ============================================================================

#[tokio::test]
async fn test_failure_envelope_surfaces_message_and_stores_no_session() {
    let mock = MockBackend::start().await;
    mock.set_upload_response(200, fixtures::upload_failure_json("bad format"));
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["storm.nc"]);

    let err = controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Upload failed: bad format");
    assert!(controller.session().is_none());
}

#[tokio::test]
async fn test_batch_with_no_successes_fails_with_first_error() {
    let mock = MockBackend::start().await;
    mock.set_batch_response(
        200,
        json!({
            "batch_id": "b1",
            "total_files": 2,
            "processed_files": 0,
            "status": "failed",
            "files": [
                {"success": false, "error": "corrupt header"},
                {"success": false, "error": "not netcdf"}
            ],
            "errors": []
        }),
    );
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["a.nc", "b.nc"]);

    let err = controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Upload failed: corrupt header");
    assert!(controller.session().is_none());
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_mixed_selection_rejected_without_network() {
    let mock = MockBackend::start().await;
    let mut controller = controller_for(&mock);
    let (_dir, mut paths) = fixtures::write_temp_nc_files(&["good.nc"]);
    paths.push(paths[0].with_extension("txt"));

    let err = controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(mock.requests().is_empty());
    assert!(controller.session().is_none());
}

// ============================================================================
// Clear
// ============================================================================

#[tokio::test]
async fn test_clear_without_session_is_idempotent_and_offline() {
    let mock = MockBackend::start().await;
    let mut controller = controller_for(&mock);

    controller.clear().await.unwrap();
    controller.clear().await.unwrap();

    assert_eq!(mock.delete_count(), 0);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_clear_deletes_active_session() {
    let mock = MockBackend::start().await;
    mock.set_upload_response(200, fixtures::upload_success_no_wind_json("20240115140000"));
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["storm.nc"]);

    controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap();
    controller.clear().await.unwrap();

    assert!(controller.session().is_none());
    assert_eq!(mock.delete_count(), 1);

    // Second clear is a no-op
    controller.clear().await.unwrap();
    assert_eq!(mock.delete_count(), 1);
}

#[tokio::test]
async fn test_clear_swallows_delete_failure() {
    let mock = MockBackend::start().await;
    mock.set_upload_response(200, fixtures::upload_success_no_wind_json("20240115150000"));
    mock.set_delete_response(500, json!({"success": false, "error": "backend exploded"}));
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["storm.nc"]);

    controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap();

    // Best-effort: the failure is logged, not surfaced
    controller.clear().await.unwrap();
    assert!(controller.session().is_none());
}

// ============================================================================
// Wind fetch degradation
// ============================================================================

#[tokio::test]
async fn test_wind_fetch_failure_degrades_to_no_grid() {
    let mock = MockBackend::start().await;
    mock.set_upload_response(200, fixtures::upload_success_json("20240115160000"));
    mock.set_wind_response(404, fixtures::wind_data_failure_json("No wind data found"));
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["storm.nc"]);

    let outcome = controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap();

    // Upload stands; only the animation payload is missing
    assert!(outcome.wind_grid.is_none());
    assert_eq!(controller.session().unwrap().as_str(), "20240115160000");
}

#[tokio::test]
async fn test_malformed_wind_payload_degrades_to_no_grid() {
    let mock = MockBackend::start().await;
    mock.set_upload_response(200, fixtures::upload_success_json("20240115170000"));
    // Ragged component rows: parses as JSON but fails grid validation
    mock.set_wind_response(
        200,
        json!({
            "success": true,
            "grid": {"lons": [0.0, 1.0], "lats": [0.0, 1.0]},
            "u_component": [[1.0, 2.0], [3.0]],
            "v_component": [[0.0, 0.0], [0.0, 0.0]]
        }),
    );
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["storm.nc"]);

    let outcome = controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap();
    assert!(outcome.wind_grid.is_none());
}

// ============================================================================
// Error taxonomy passthrough
// ============================================================================

#[tokio::test]
async fn test_non_2xx_upload_is_transport_category() {
    let mock = MockBackend::start().await;
    mock.set_upload_response(503, json!({"detail": "maintenance"}));
    let mut controller = controller_for(&mock);
    let (_dir, paths) = fixtures::write_temp_nc_files(&["storm.nc"]);

    let err = controller
        .upload(&paths, &UploadOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, VizError::HttpStatus { status: 503, .. }));
    assert!(controller.session().is_none());
}
