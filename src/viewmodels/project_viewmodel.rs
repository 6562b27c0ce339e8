use crate::models::{Project, ProjectDraft};
use crate::services::{project_service, ApiClient};
use crate::state::AppState;
use crate::viewmodels::collection_loader::CollectionLoader;

/// Lista de proyectos del workspace activo + alta/edición
pub struct ProjectViewModel {
    api: ApiClient,
    state: AppState,
    loader: CollectionLoader<Project>,
}

impl ProjectViewModel {
    pub fn new(api: ApiClient, state: AppState) -> Self {
        let loader = CollectionLoader::new("PROJECTS", state.projects.clone());
        Self { api, state, loader }
    }

    pub async fn refresh(&self) -> bool {
        let Some(workspace_id) = self.state.workspaces.current_id() else {
            return false;
        };
        let api = self.api.clone();
        let ws = workspace_id.clone();
        let applied = self
            .loader
            .load(&workspace_id, move |abort| async move {
                project_service::list_projects(&api, &ws, abort).await
            })
            .await;
        self.state.notify_changes();
        applied
    }

    pub fn abort(&self) {
        self.loader.abort();
    }

    pub async fn create(&self, draft: ProjectDraft) -> Result<Project, String> {
        let workspace_id = self
            .state
            .workspaces
            .current_id()
            .ok_or_else(|| "Select a workspace first".to_string())?;
        let project = project_service::create_project(&self.api, &workspace_id, &draft)
            .await
            .map_err(|e| e.user_message("Failed to create project"))?;
        if self.state.projects.workspace_id().as_deref() == Some(workspace_id.as_str()) {
            self.state.projects.push(project.clone());
        }
        self.state.notify_changes();
        Ok(project)
    }

    pub async fn update(&self, project_id: &str, draft: ProjectDraft) -> Result<Project, String> {
        let workspace_id = self
            .state
            .workspaces
            .current_id()
            .ok_or_else(|| "Select a workspace first".to_string())?;
        let project = project_service::update_project(&self.api, &workspace_id, project_id, &draft)
            .await
            .map_err(|e| e.user_message("Failed to update project"))?;
        self.state.projects.replace_where(|p| p.id == project.id, project.clone());
        self.state.notify_changes();
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectStatus, Route, Workspace, WorkspaceKind};
    use crate::services::api_client::test_support::*;

    #[tokio::test]
    async fn update_replaces_cached_project() {
        let transport = ScriptedTransport::new();
        let state = AppState::new(Route::Projects);
        state.session.authenticate("tok".into(), identity());
        state.workspaces.set_items(
            vec![Workspace {
                id: "w".into(),
                name: "W".into(),
                kind: WorkspaceKind::Personal,
                role: "owner".into(),
                created_at: String::new(),
            }],
            None,
        );
        let api = client(transport.clone(), state.session.clone(), state.workspaces.clone());
        let vm = ProjectViewModel::new(api, state.clone());

        transport.reply(200, r#"{"projects":[{"_id":"p1","name":"Site","status":"planning"}]}"#);
        assert!(vm.refresh().await);

        transport.reply(200, r#"{"_id":"p1","name":"Site","status":"active"}"#);
        let draft = ProjectDraft {
            name: "Site".into(),
            status: ProjectStatus::Active,
            ..ProjectDraft::default()
        };
        vm.update("p1", draft).await.unwrap();

        assert_eq!(state.projects.get_items()[0].status, ProjectStatus::Active);
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, crate::services::Method::Put);
        assert_eq!(request.url, "https://api.test/projects/p1?workspaceId=w");
    }
}
