//! Session lifecycle on top of the REST client.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use viz_common::{GeoBounds, SessionId, VizError, VizResult};
use wind_grid::WindGrid;

use crate::client::{ApiClient, UploadOptions, WindDataQuery};
use crate::types::{DatasetMetadata, UploadResponse};

/// Everything a successful upload produced.
#[derive(Debug)]
pub struct UploadOutcome {
    pub session_id: SessionId,
    pub bounds: Option<GeoBounds>,
    pub metadata: Option<DatasetMetadata>,
    /// Present when the dataset had wind components and the follow-up
    /// fetch succeeded.
    pub wind_grid: Option<WindGrid>,
}

/// Owns the one active session and the upload workflow.
///
/// The controller never touches animation state; it validates selections,
/// talks to the backend, and hands back a [`WindGrid`] for the caller to
/// feed into an animator. A monotonically increasing epoch guards against
/// results of an upload landing after the session was cleared.
pub struct UploadController {
    client: ApiClient,
    session: Option<SessionId>,
    epoch: u64,
    upload_in_flight: bool,
}

impl UploadController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            session: None,
            epoch: 0,
            upload_in_flight: false,
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Validate a file selection: every file must carry a `.nc`
    /// extension. One offender rejects the entire selection.
    pub fn select_files(paths: &[PathBuf]) -> VizResult<()> {
        if paths.is_empty() {
            return Err(VizError::InvalidSelection("no files selected".to_string()));
        }
        for path in paths {
            if !has_nc_extension(path) {
                return Err(VizError::InvalidSelection(format!(
                    "{} is not a NetCDF (.nc) file",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Upload the selection and, when the dataset carries wind
    /// components, fetch its gridded field.
    ///
    /// Dispatches single or batch by file count. Rejects overlapping
    /// uploads outright. A `success: false` envelope surfaces as
    /// [`VizError::UploadFailed`] and stores no session.
    pub async fn upload(
        &mut self,
        paths: &[PathBuf],
        options: &UploadOptions,
    ) -> VizResult<UploadOutcome> {
        if self.upload_in_flight {
            return Err(VizError::UploadInProgress);
        }
        Self::select_files(paths)?;

        self.upload_in_flight = true;
        let result = self.upload_inner(paths, options).await;
        self.upload_in_flight = false;
        result
    }

    async fn upload_inner(
        &mut self,
        paths: &[PathBuf],
        options: &UploadOptions,
    ) -> VizResult<UploadOutcome> {
        let started_epoch = self.epoch;

        let envelope = if paths.len() == 1 {
            self.client.upload_file(&paths[0], options).await?
        } else {
            let batch = self.client.upload_batch(paths, options).await?;
            match batch.first_success() {
                Some(file) => file.clone(),
                None => return Err(VizError::UploadFailed(batch.error_text())),
            }
        };

        if !envelope.success {
            return Err(VizError::UploadFailed(envelope.error_text()));
        }

        let session_id = parse_session(&envelope)?;

        // A clear() issued while the request was in flight invalidates
        // this result; do not store the session or fetch wind data.
        if self.epoch != started_epoch {
            warn!(session = %session_id, "Discarding upload result: session was cleared");
            return Err(VizError::Superseded);
        }

        self.session = Some(session_id.clone());
        info!(session = %session_id, "Upload accepted");

        let wind_grid = match &envelope.wind_components {
            Some(components) => {
                self.fetch_wind_grid(&session_id, started_epoch, &components.u, &components.v)
                    .await?
            }
            None => None,
        };

        Ok(UploadOutcome {
            session_id,
            bounds: envelope.bounds,
            metadata: envelope.metadata,
            wind_grid,
        })
    }

    /// Follow-up wind-data fetch. Fetch failures are logged, not fatal:
    /// the upload itself already succeeded.
    async fn fetch_wind_grid(
        &mut self,
        session_id: &SessionId,
        started_epoch: u64,
        u_var: &str,
        v_var: &str,
    ) -> VizResult<Option<WindGrid>> {
        let fetched = self
            .client
            .wind_data(session_id, &WindDataQuery::default())
            .await;

        if self.epoch != started_epoch {
            warn!(session = %session_id, "Discarding stale wind data: session was cleared");
            return Err(VizError::Superseded);
        }

        match fetched.and_then(|response| response.into_grid()) {
            Ok(grid) => {
                info!(
                    session = %session_id,
                    u = u_var,
                    v = v_var,
                    width = grid.width(),
                    height = grid.height(),
                    "Wind field loaded"
                );
                Ok(Some(grid))
            }
            Err(e) => {
                warn!(session = %session_id, error = %e, "Wind data fetch failed");
                Ok(None)
            }
        }
    }

    /// Release the current session.
    ///
    /// Bumps the epoch first so any in-flight response is recognized as
    /// stale, then requests deletion best-effort: a failed delete is
    /// logged and swallowed. With no active session this is a no-op.
    pub async fn clear(&mut self) -> VizResult<()> {
        self.epoch += 1;

        let Some(session) = self.session.take() else {
            return Ok(());
        };

        match self.client.delete_session(&session).await {
            Ok(acknowledged) => {
                info!(session = %session, acknowledged, "Session cleared");
            }
            Err(e) => {
                warn!(session = %session, error = %e, "Session delete failed (ignored)");
            }
        }
        Ok(())
    }
}

/// `.nc` extension check, matching the backend's own validation.
fn has_nc_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("nc")
}

fn parse_session(envelope: &UploadResponse) -> VizResult<SessionId> {
    let raw = envelope.session_id.as_deref().ok_or_else(|| {
        VizError::Transport("successful upload response carried no session id".to_string())
    })?;
    SessionId::new(raw).map_err(|e| VizError::Transport(e.to_string()))
}
