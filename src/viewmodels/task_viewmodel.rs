// ============================================================================
// TASK VIEWMODEL - Lista de tareas del workspace activo + alta/edición
// ============================================================================

use crate::models::{Task, TaskDraft};
use crate::services::{task_service, ApiClient};
use crate::state::AppState;
use crate::viewmodels::collection_loader::CollectionLoader;

pub struct TaskViewModel {
    api: ApiClient,
    state: AppState,
    loader: CollectionLoader<Task>,
}

impl TaskViewModel {
    pub fn new(api: ApiClient, state: AppState) -> Self {
        let loader = CollectionLoader::new("TASKS", state.tasks.clone());
        Self { api, state, loader }
    }

    /// Recarga para el workspace activo (no hace nada sin workspace)
    pub async fn refresh(&self) -> bool {
        let Some(workspace_id) = self.state.workspaces.current_id() else {
            return false;
        };
        let api = self.api.clone();
        let ws = workspace_id.clone();
        let applied = self
            .loader
            .load(&workspace_id, move |abort| async move {
                task_service::list_tasks(&api, &ws, abort).await
            })
            .await;
        self.state.notify_changes();
        applied
    }

    pub fn abort(&self) {
        self.loader.abort();
    }

    pub async fn create(&self, draft: TaskDraft) -> Result<Task, String> {
        let workspace_id = self.require_workspace()?;
        let task = task_service::create_task(&self.api, &workspace_id, &draft)
            .await
            .map_err(|e| e.user_message("Failed to create task"))?;
        if self.state.tasks.workspace_id().as_deref() == Some(workspace_id.as_str()) {
            self.state.tasks.push(task.clone());
        }
        self.state.notify_changes();
        Ok(task)
    }

    pub async fn update(&self, task_id: &str, draft: TaskDraft) -> Result<Task, String> {
        let workspace_id = self.require_workspace()?;
        let task = task_service::update_task(&self.api, &workspace_id, task_id, &draft)
            .await
            .map_err(|e| e.user_message("Failed to update task"))?;
        self.state.tasks.replace_where(|t| t.id == task.id, task.clone());
        self.state.notify_changes();
        Ok(task)
    }

    fn require_workspace(&self) -> Result<String, String> {
        self.state
            .workspaces
            .current_id()
            .ok_or_else(|| "Select a workspace first".to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::models::{Route, Workspace, WorkspaceKind};
    use crate::services::api_client::test_support::*;

    fn workspace(id: &str) -> Workspace {
        Workspace {
            id: id.into(),
            name: id.into(),
            kind: WorkspaceKind::Team,
            role: "member".into(),
            created_at: String::new(),
        }
    }

    fn setup() -> (Rc<ScriptedTransport>, AppState, TaskViewModel) {
        let transport = ScriptedTransport::new();
        let state = AppState::new(Route::Tasks);
        state.session.authenticate("tok".into(), identity());
        state.workspaces.set_items(vec![workspace("A"), workspace("B")], Some("A"));
        let api = client(transport.clone(), state.session.clone(), state.workspaces.clone());
        let vm = TaskViewModel::new(api, state.clone());
        (transport, state, vm)
    }

    #[tokio::test]
    async fn stale_response_from_previous_workspace_is_discarded() {
        let (transport, state, vm) = setup();
        let reply_a = transport.deferred();
        let reply_b = transport.deferred();

        let (applied_a, applied_b, _) = futures::join!(
            vm.refresh(),
            async {
                tokio::task::yield_now().await;
                state.workspaces.select("B");
                vm.refresh().await
            },
            async {
                tokio::task::yield_now().await;
                tokio::task::yield_now().await;
                let _ = reply_b.send(Ok(json_response(200, r#"[{"_id":"b1","title":"From B"}]"#)));
                tokio::task::yield_now().await;
                tokio::task::yield_now().await;
                let _ = reply_a.send(Ok(json_response(200, r#"[{"_id":"a1","title":"From A"}]"#)));
            }
        );

        assert!(!applied_a);
        assert!(applied_b);
        let titles: Vec<String> = state.tasks.get_items().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["From B"]);
        assert_eq!(state.tasks.workspace_id().as_deref(), Some("B"));
        assert!(!state.tasks.get_loading());

        let urls: Vec<String> = transport.requests.borrow().iter().map(|r| r.url.clone()).collect();
        assert_eq!(urls, vec!["https://api.test/tasks?workspaceId=A", "https://api.test/tasks?workspaceId=B"]);
    }

    #[tokio::test]
    async fn failures_surface_as_inline_errors() {
        let (transport, state, vm) = setup();
        transport.reply(500, r#"{"message":"tasks exploded"}"#);
        assert!(vm.refresh().await);
        assert_eq!(state.tasks.get_error().as_deref(), Some("tasks exploded"));
    }

    #[tokio::test]
    async fn abort_on_unmount_leaves_state_untouched() {
        let (transport, state, vm) = setup();
        let reply = transport.deferred();

        let (applied, _) = futures::join!(vm.refresh(), async {
            tokio::task::yield_now().await;
            vm.abort();
            let _ = reply.send(Ok(json_response(200, r#"[{"_id":"x","title":"late"}]"#)));
        });

        assert!(!applied);
        assert!(state.tasks.get_items().is_empty());
        assert!(!state.tasks.get_loading());
    }

    #[tokio::test]
    async fn create_validates_then_appends() {
        let (transport, state, vm) = setup();
        assert_eq!(vm.create(TaskDraft::default()).await.unwrap_err(), "Title is required");
        assert_eq!(transport.request_count(), 0);

        transport.reply(200, "[]");
        vm.refresh().await;
        transport.reply(201, r#"{"task":{"_id":"t9","title":"New","priority":"high"}}"#);
        let draft = TaskDraft { title: "New".into(), ..TaskDraft::default() };
        let task = vm.create(draft).await.unwrap();

        assert_eq!(task.id, "t9");
        assert_eq!(state.tasks.get_items().len(), 1);
        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://api.test/tasks?workspaceId=A");
        assert!(request.body.unwrap().contains(r#""title":"New""#));
    }
}
