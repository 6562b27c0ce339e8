// ============================================================================
// APP VIEWMODEL - Orquesta sesión, bootstrap, guard, socket y colecciones
// ============================================================================
// Las vistas solo llaman a este viewmodel. Los efectos async se lanzan con el
// `Spawner` inyectado (spawn_local en el navegador, LocalSet en tests).
// ============================================================================

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::config::AppConfig;
use crate::models::Route;
use crate::services::{ApiClient, HttpTransport, NotificationPresenter, SocketConnector};
use crate::state::AppState;
use crate::utils::storage::CURRENT_WORKSPACE_KEY;
use crate::utils::{KeyValueStore, Navigator};
use crate::viewmodels::notification_channel::NotificationChannel;
use crate::viewmodels::project_viewmodel::ProjectViewModel;
use crate::viewmodels::route_guard::{GuardState, RouteGuard};
use crate::viewmodels::session_viewmodel::SessionViewModel;
use crate::viewmodels::task_viewmodel::TaskViewModel;
use crate::viewmodels::workspace_bootstrap::{BootstrapOutcome, BootstrapTrigger, WorkspaceBootstrap};

pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Adaptadores de plataforma que necesita la app
pub struct AppServices {
    pub transport: Rc<dyn HttpTransport>,
    pub storage: Rc<dyn KeyValueStore>,
    pub navigator: Rc<dyn Navigator>,
    pub connector: Rc<dyn SocketConnector>,
    pub presenter: Rc<dyn NotificationPresenter>,
    pub spawner: Spawner,
}

pub struct AppViewModel {
    state: AppState,
    storage: Rc<dyn KeyValueStore>,
    navigator: Rc<dyn Navigator>,
    spawner: Spawner,
    pub session: SessionViewModel,
    pub bootstrap: WorkspaceBootstrap,
    pub guard: RouteGuard,
    pub notifications: NotificationChannel,
    pub tasks: TaskViewModel,
    pub projects: ProjectViewModel,
}

fn uses_tasks(route: Route) -> bool {
    matches!(route, Route::Dashboard | Route::Tasks | Route::Calendar)
}

fn uses_projects(route: Route) -> bool {
    matches!(route, Route::Dashboard | Route::Tasks | Route::Projects)
}

impl AppViewModel {
    pub fn new(config: &AppConfig, state: AppState, services: AppServices) -> Rc<Self> {
        let api = ApiClient::new(config, state.session.clone(), state.workspaces.clone(), services.transport);
        Rc::new(Self {
            session: SessionViewModel::new(api.clone(), state.clone(), services.storage.clone()),
            bootstrap: WorkspaceBootstrap::new(api.clone(), state.clone(), services.storage.clone()),
            guard: RouteGuard::new(services.navigator.clone()),
            notifications: NotificationChannel::new(
                api.clone(),
                state.clone(),
                config.socket_url.clone(),
                services.connector,
                services.presenter,
            ),
            tasks: TaskViewModel::new(api.clone(), state.clone()),
            projects: ProjectViewModel::new(api, state.clone()),
            storage: services.storage,
            navigator: services.navigator,
            spawner: services.spawner,
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn spawn<F>(&self, future: F)
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        (self.spawner)(future.boxed_local());
    }

    /// Arranque: restaura la sesión persistida y dispara sus efectos
    pub fn start(self: &Rc<Self>) {
        log::info!("🚀 [APP] Arrancando TaskFlux");
        self.session.restore();
        self.session_effects();
    }

    /// Efectos de una sesión autenticada: bootstrap de workspaces y socket
    fn session_effects(self: &Rc<Self>) {
        if !self.state.session.is_authenticated() {
            return;
        }
        self.run_bootstrap(BootstrapTrigger::SessionChanged);
        self.open_notifications();
    }

    fn run_bootstrap(self: &Rc<Self>, trigger: BootstrapTrigger) {
        if trigger != BootstrapTrigger::ManualRefresh && !self.bootstrap.should_fetch() {
            return;
        }
        let this = self.clone();
        self.spawn(async move {
            if this.bootstrap.handle(trigger).await == BootstrapOutcome::Loaded {
                this.ensure_collections();
            }
        });
    }

    fn open_notifications(self: &Rc<Self>) {
        let Some(inbox) = self.notifications.open() else {
            return;
        };
        self.spawn(self.notifications.dispatcher().run(inbox));
        let this = self.clone();
        self.spawn(async move { this.notifications.load().await });
    }

    pub async fn login(self: &Rc<Self>, email: String, password: String) -> Result<(), String> {
        self.session.login(email, password).await?;
        self.session_effects();
        self.navigate(Route::Dashboard);
        Ok(())
    }

    pub async fn register(self: &Rc<Self>, name: String, email: String, password: String) -> Result<(), String> {
        self.session.register(name, email, password).await?;
        self.session_effects();
        self.navigate(Route::Dashboard);
        Ok(())
    }

    pub fn logout(&self) {
        self.bootstrap.cancel();
        self.tasks.abort();
        self.projects.abort();
        self.notifications.close();
        self.session.logout();
        self.navigator.replace(Route::Login);
    }

    /// Montaje del shell del dashboard
    pub fn mount_dashboard(self: &Rc<Self>) {
        self.run_bootstrap(BootstrapTrigger::Mounted);
        self.open_notifications();
    }

    pub fn refresh_workspaces(self: &Rc<Self>) {
        self.run_bootstrap(BootstrapTrigger::ManualRefresh);
    }

    pub fn guard(&self) -> GuardState {
        self.guard.check(&self.state)
    }

    pub fn navigate(self: &Rc<Self>, route: Route) {
        if self.state.current_route() != route {
            self.navigator.push(route);
        }
        self.route_entered();
    }

    /// Back/forward del navegador
    pub fn location_changed(self: &Rc<Self>, path: &str) {
        self.state.set_route(Route::from_path(path));
        self.route_entered();
    }

    fn route_entered(self: &Rc<Self>) {
        let route = self.state.current_route();
        if !uses_tasks(route) {
            self.tasks.abort();
        }
        if !uses_projects(route) {
            self.projects.abort();
        }
        self.ensure_collections();
    }

    pub fn select_workspace(self: &Rc<Self>, workspace_id: &str) {
        if !self.state.workspaces.select(workspace_id) {
            log::warn!("⚠️ [APP] Workspace desconocido: {}", workspace_id);
            return;
        }
        if let Err(e) = self.storage.set(CURRENT_WORKSPACE_KEY, workspace_id) {
            log::error!("❌ [APP] {}", e);
        }
        log::info!("🏢 [APP] Workspace activo: {}", workspace_id);
        self.state.notify_changes();
        self.ensure_collections();
    }

    /// Carga las listas que usa la ruta actual si no están cargadas (ni cargando) para el workspace activo
    fn ensure_collections(self: &Rc<Self>) {
        let route = self.state.current_route();
        if !route.is_protected() || !self.state.session.is_authenticated() {
            return;
        }
        let Some(current) = self.state.workspaces.current_id() else {
            return;
        };
        if uses_tasks(route) && !self.state.tasks.covers(&current) {
            let this = self.clone();
            self.spawn(async move {
                this.tasks.refresh().await;
            });
        }
        if uses_projects(route) && !self.state.projects.covers(&current) {
            let this = self.clone();
            self.spawn(async move {
                this.projects.refresh().await;
            });
        }
    }

    pub fn reload_tasks(self: &Rc<Self>) {
        let this = self.clone();
        self.spawn(async move {
            this.tasks.refresh().await;
        });
    }

    pub fn reload_projects(self: &Rc<Self>) {
        let this = self.clone();
        self.spawn(async move {
            this.projects.refresh().await;
        });
    }

    pub fn request_desktop_permission(self: &Rc<Self>) {
        let this = self.clone();
        self.spawn(async move {
            this.notifications.request_desktop_permission().await;
        });
    }

    pub fn toggle_notifications(&self) {
        self.state.toggle_notifications_panel();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;

    use super::*;
    use crate::models::Identity;
    use crate::services::api_client::test_support::{identity, json_response};
    use crate::services::{ApiError, HttpResponse, PreparedRequest};
    use crate::state::ConnectionStatus;
    use crate::utils::storage::{self, TOKEN_KEY, USER_KEY};
    use crate::utils::{AbortHandle, MemoryStore};
    use crate::viewmodels::notification_channel::test_support::{FakeConnector, FakePresenter};
    use crate::viewmodels::route_guard::test_support::{RecordingNavigator, StateNavigator};

    /// Responde según el path; el orden de las tareas no importa
    #[derive(Default)]
    struct RoutedTransport {
        requests: RefCell<Vec<PreparedRequest>>,
        // La próxima petición de tareas nunca responde
        stall_tasks: Cell<bool>,
    }

    impl RoutedTransport {
        fn count(&self, fragment: &str) -> usize {
            self.requests.borrow().iter().filter(|r| r.url.contains(fragment)).count()
        }

        fn urls(&self) -> Vec<String> {
            self.requests.borrow().iter().map(|r| r.url.clone()).collect()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for RoutedTransport {
        async fn send(&self, request: PreparedRequest, _abort: Option<AbortHandle>) -> Result<HttpResponse, ApiError> {
            let url = request.url.clone();
            self.requests.borrow_mut().push(request);
            if url.contains("/tasks") && self.stall_tasks.replace(false) {
                return futures::future::pending().await;
            }
            let body = if url.contains("/auth/login") {
                r#"{"token":"fresh","user":{"_id":"u1","name":"Ana","email":"ana@taskflux.dev"}}"#
            } else if url.contains("/workspaces") {
                r#"[
                    {"_id":"w2","name":"Team","type":"team","createdAt":"2024-03-01"},
                    {"_id":"w1","name":"Mine","type":"personal","createdAt":"2024-05-01"}
                ]"#
            } else if url.contains("/notifications/preferences") {
                "{}"
            } else if url.contains("/notifications") {
                r#"[{"_id":"n1","title":"Welcome","type":"system"}]"#
            } else if url.contains("/tasks") {
                r#"[{"_id":"t1","title":"Write docs"}]"#
            } else if url.contains("/projects") {
                r#"[{"_id":"p1","name":"Launch"}]"#
            } else {
                return Ok(json_response(404, r#"{"message":"Not found"}"#));
            };
            Ok(json_response(200, body))
        }
    }

    struct Harness {
        vm: Rc<AppViewModel>,
        state: AppState,
        transport: Rc<RoutedTransport>,
        storage: Rc<MemoryStore>,
        connector: Rc<FakeConnector>,
        navigator: Rc<StateNavigator>,
    }

    fn harness(route: Route, persisted: Option<Identity>) -> Harness {
        let state = AppState::new(route);
        let transport = Rc::new(RoutedTransport::default());
        let storage = Rc::new(MemoryStore::new());
        if let Some(user) = persisted {
            storage.set(TOKEN_KEY, "tok").unwrap();
            storage::save_json(storage.as_ref(), USER_KEY, &user).unwrap();
        }
        let connector = Rc::new(FakeConnector::default());
        let navigator = Rc::new(StateNavigator { state: state.clone(), log: RecordingNavigator::default() });
        let spawner: Spawner = Rc::new(|future: LocalBoxFuture<'static, ()>| {
            tokio::task::spawn_local(future);
        });
        let config = AppConfig {
            backend_url: "https://api.test".into(),
            socket_url: "wss://rt.test/ws".into(),
            ..AppConfig::default()
        };
        let vm = AppViewModel::new(
            &config,
            state.clone(),
            AppServices {
                transport: transport.clone(),
                storage: storage.clone(),
                navigator: navigator.clone(),
                connector: connector.clone(),
                presenter: Rc::new(FakePresenter::default()),
                spawner,
            },
        );
        Harness { vm, state, transport, storage, connector, navigator }
    }

    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn restored_session_bootstraps_once_and_opens_socket() {
        let h = harness(Route::Dashboard, Some(identity()));
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                h.vm.start();
                h.vm.mount_dashboard();
                settle().await;
                h.vm.mount_dashboard();
                settle().await;
            })
            .await;

        assert_eq!(h.transport.count("/workspaces"), 1);
        assert_eq!(h.state.workspaces.current_id().as_deref(), Some("w1"));
        assert!(h.state.workspaces.has_initialized());
        assert_eq!(h.connector.urls.borrow().len(), 1);
        assert_eq!(h.state.notifications.get_items().len(), 1);
        assert_eq!(h.state.tasks.get_items().len(), 1);
        assert_eq!(h.state.projects.get_items().len(), 1);
        assert!(h.transport.urls().contains(&"https://api.test/tasks?workspaceId=w1".to_string()));
        assert_eq!(h.vm.guard(), GuardState::Authorized);
    }

    #[tokio::test]
    async fn anonymous_visit_to_protected_route_redirects_without_requests() {
        let h = harness(Route::Tasks, None);
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                h.vm.start();
                settle().await;
            })
            .await;

        assert_eq!(h.vm.guard(), GuardState::Unauthorized);
        assert_eq!(h.state.current_route(), Route::Login);
        assert_eq!(h.vm.guard(), GuardState::Public);
        assert!(h.transport.urls().is_empty());
        assert!(h.connector.urls.borrow().is_empty());
    }

    #[tokio::test]
    async fn login_triggers_bootstrap_and_lands_on_dashboard() {
        let h = harness(Route::Login, None);
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                h.vm.start();
                h.vm.login("ana@taskflux.dev".into(), "secret1".into()).await.unwrap();
                settle().await;
            })
            .await;

        assert_eq!(h.state.current_route(), Route::Dashboard);
        assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("fresh"));
        assert_eq!(h.transport.count("/workspaces"), 1);
        assert_eq!(h.connector.urls.borrow().as_slice(), ["wss://rt.test/ws?token=fresh"]);
    }

    #[tokio::test]
    async fn selecting_a_workspace_persists_and_reloads_lists() {
        let h = harness(Route::Tasks, Some(identity()));
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                h.vm.start();
                settle().await;
                h.vm.select_workspace("w2");
                settle().await;
            })
            .await;

        assert_eq!(h.storage.get(CURRENT_WORKSPACE_KEY).as_deref(), Some("w2"));
        assert_eq!(h.state.tasks.workspace_id().as_deref(), Some("w2"));
        assert_eq!(h.transport.count("/tasks?workspaceId=w2"), 1);
        assert_eq!(h.transport.count("/projects?workspaceId=w2"), 1);
    }

    #[tokio::test]
    async fn returning_to_a_route_reloads_a_list_whose_load_was_cancelled() {
        let h = harness(Route::Team, Some(identity()));
        h.transport.stall_tasks.set(true);
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                h.vm.start();
                settle().await;
                h.vm.navigate(Route::Tasks);
                settle().await;
                assert!(h.state.tasks.get_loading());

                h.vm.navigate(Route::Team);
                settle().await;
                assert!(!h.state.tasks.get_loading());

                h.vm.navigate(Route::Tasks);
                settle().await;
            })
            .await;

        assert_eq!(h.transport.count("/tasks?workspaceId=w1"), 2);
        assert_eq!(h.state.tasks.get_items().len(), 1);
        assert_eq!(h.transport.count("/projects?workspaceId=w1"), 1);
    }

    #[tokio::test]
    async fn logout_tears_down_session_effects() {
        let h = harness(Route::Dashboard, Some(identity()));
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                h.vm.start();
                settle().await;
                h.vm.logout();
                settle().await;
            })
            .await;

        assert!(h.connector.closed.get());
        assert_eq!(h.state.notifications.get_connection(), ConnectionStatus::Disconnected);
        assert!(!h.storage.contains(TOKEN_KEY));
        assert!(!h.storage.contains(CURRENT_WORKSPACE_KEY));
        assert!(h.state.workspaces.get_items().is_empty());
        assert!(!h.state.workspaces.has_initialized());
        assert!(h.state.tasks.get_items().is_empty());
        assert_eq!(h.state.current_route(), Route::Login);
        assert_eq!(h.navigator.log.replaced(), vec![Route::Login]);
    }
}
