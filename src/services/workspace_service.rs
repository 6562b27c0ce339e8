use crate::models::{normalize_workspaces, Workspace, WorkspacesResponse};
use crate::services::api_client::{ApiClient, RequestOptions, WorkspaceOverride};
use crate::services::error::ApiError;
use crate::utils::AbortHandle;

/// `GET /workspaces` normalizado y ordenado. No lleva scope de workspace:
/// es justamente la llamada que los descubre.
pub async fn fetch_workspaces(api: &ApiClient, abort: AbortHandle) -> Result<Vec<Workspace>, ApiError> {
    let options = RequestOptions {
        workspace: WorkspaceOverride::Omit,
        ..RequestOptions::default()
    }
    .with_abort(abort);
    let response: WorkspacesResponse = api.get_json("/workspaces", options).await?;
    Ok(normalize_workspaces(response.into_raw()))
}
