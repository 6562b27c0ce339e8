pub mod error;
pub mod transport;
pub mod api_client;
pub mod auth_service;
pub mod workspace_service;
pub mod task_service;
pub mod project_service;
pub mod notification_service;
pub mod socket;
pub mod desktop;

pub use error::ApiError;
pub use transport::{GlooTransport, HttpResponse, HttpTransport, Method, PreparedRequest};
pub use api_client::{ApiClient, RequestOptions, WorkspaceOverride};
pub use socket::{BrowserSocketConnector, SocketConnection, SocketConnector, SocketMessage};
pub use desktop::{BrowserPresenter, NotificationPresenter};
