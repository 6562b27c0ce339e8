pub mod session_viewmodel;
pub mod workspace_bootstrap;
pub mod route_guard;
pub mod collection_loader;
pub mod task_viewmodel;
pub mod project_viewmodel;
pub mod notification_channel;
pub mod app_viewmodel;

pub use session_viewmodel::SessionViewModel;
pub use workspace_bootstrap::{BootstrapOutcome, BootstrapTrigger, WorkspaceBootstrap};
pub use route_guard::{GuardState, RouteGuard};
pub use task_viewmodel::TaskViewModel;
pub use project_viewmodel::ProjectViewModel;
pub use notification_channel::{NotificationChannel, NotificationDispatcher};
pub use app_viewmodel::{AppServices, AppViewModel, Spawner};
