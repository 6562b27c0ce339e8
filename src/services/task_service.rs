use serde::Deserialize;

use crate::models::{Task, TaskDraft};
use crate::services::api_client::{ApiClient, RequestOptions};
use crate::services::error::ApiError;
use crate::utils::AbortHandle;

#[derive(Deserialize)]
#[serde(untagged)]
enum TasksResponse {
    List(Vec<Task>),
    Wrapped { tasks: Vec<Task> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskResponse {
    Wrapped { task: Task },
    Bare(Task),
}

impl TaskResponse {
    fn into_task(self) -> Task {
        match self {
            TaskResponse::Wrapped { task } | TaskResponse::Bare(task) => task,
        }
    }
}

pub async fn list_tasks(api: &ApiClient, workspace_id: &str, abort: AbortHandle) -> Result<Vec<Task>, ApiError> {
    let options = RequestOptions::default().with_workspace(workspace_id).with_abort(abort);
    let response: TasksResponse = api.get_json("/tasks", options).await?;
    Ok(match response {
        TasksResponse::List(tasks) | TasksResponse::Wrapped { tasks } => tasks,
    })
}

pub async fn create_task(api: &ApiClient, workspace_id: &str, draft: &TaskDraft) -> Result<Task, ApiError> {
    draft.validate().map_err(ApiError::Validation)?;
    let options = RequestOptions::default().with_workspace(workspace_id);
    let response: TaskResponse = api.post_json("/tasks", draft, options).await?;
    Ok(response.into_task())
}

pub async fn update_task(api: &ApiClient, workspace_id: &str, task_id: &str, draft: &TaskDraft) -> Result<Task, ApiError> {
    draft.validate().map_err(ApiError::Validation)?;
    let options = RequestOptions::default().with_workspace(workspace_id);
    let path = format!("/tasks/{}", urlencoding::encode(task_id));
    let response: TaskResponse = api.put_json(&path, draft, options).await?;
    Ok(response.into_task())
}
