pub mod auth;
pub mod workspace;
pub mod task;
pub mod project;
pub mod notification;
pub mod route;

pub use auth::{AuthResponse, Identity, LoginRequest, RegisterRequest};
pub use workspace::{normalize_workspaces, RawWorkspace, Workspace, WorkspaceKind, WorkspacesResponse};
pub use task::{Task, TaskDraft, TaskPriority, TaskStatus};
pub use project::{Project, ProjectDraft, ProjectStatus};
pub use notification::{
    ChannelPreference, Notification, NotificationCategory, NotificationEvent,
    NotificationPreferences,
};
pub use route::Route;
