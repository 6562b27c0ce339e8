use serde::Deserialize;

use crate::models::{Project, ProjectDraft};
use crate::services::api_client::{ApiClient, RequestOptions};
use crate::services::error::ApiError;
use crate::utils::AbortHandle;

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectsResponse {
    List(Vec<Project>),
    Wrapped { projects: Vec<Project> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectResponse {
    Wrapped { project: Project },
    Bare(Project),
}

pub async fn list_projects(api: &ApiClient, workspace_id: &str, abort: AbortHandle) -> Result<Vec<Project>, ApiError> {
    let options = RequestOptions::default().with_workspace(workspace_id).with_abort(abort);
    let response: ProjectsResponse = api.get_json("/projects", options).await?;
    Ok(match response {
        ProjectsResponse::List(projects) | ProjectsResponse::Wrapped { projects } => projects,
    })
}

pub async fn create_project(api: &ApiClient, workspace_id: &str, draft: &ProjectDraft) -> Result<Project, ApiError> {
    draft.validate().map_err(ApiError::Validation)?;
    let options = RequestOptions::default().with_workspace(workspace_id);
    let response: ProjectResponse = api.post_json("/projects", draft, options).await?;
    Ok(match response {
        ProjectResponse::Wrapped { project } | ProjectResponse::Bare(project) => project,
    })
}

pub async fn update_project(
    api: &ApiClient,
    workspace_id: &str,
    project_id: &str,
    draft: &ProjectDraft,
) -> Result<Project, ApiError> {
    draft.validate().map_err(ApiError::Validation)?;
    let options = RequestOptions::default().with_workspace(workspace_id);
    let path = format!("/projects/{}", urlencoding::encode(project_id));
    let response: ProjectResponse = api.put_json(&path, draft, options).await?;
    Ok(match response {
        ProjectResponse::Wrapped { project } | ProjectResponse::Bare(project) => project,
    })
}
