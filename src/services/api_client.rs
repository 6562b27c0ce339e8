// ============================================================================
// API CLIENT - Gateway único de requests al backend
// ============================================================================
// Toda request pasa por aquí: URL base, Authorization, scope de workspace y
// señal de aborto. Los servicios por feature solo eligen path y opciones.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{AppConfig, WorkspaceScope};
use crate::services::error::ApiError;
use crate::services::transport::{HttpResponse, HttpTransport, Method, PreparedRequest};
use crate::state::{SessionState, WorkspaceState};
use crate::utils::AbortHandle;

/// Qué workspace adjuntar a la request
#[derive(Clone, Debug, PartialEq, Default)]
pub enum WorkspaceOverride {
    /// El workspace activo del store
    #[default]
    Active,
    Explicit(String),
    /// Nunca adjuntar workspace
    Omit,
}

#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub include_authorization: bool,
    pub include_query_param: bool,
    pub workspace: WorkspaceOverride,
    pub abort: Option<AbortHandle>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            include_authorization: true,
            include_query_param: true,
            workspace: WorkspaceOverride::Active,
            abort: None,
        }
    }
}

impl RequestOptions {
    /// Endpoints públicos (login/registro)
    pub fn public() -> Self {
        Self::default().without_authorization().without_workspace()
    }

    pub fn without_authorization(mut self) -> Self {
        self.include_authorization = false;
        self
    }

    pub fn without_workspace(mut self) -> Self {
        self.include_query_param = false;
        self
    }

    pub fn with_workspace(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace = WorkspaceOverride::Explicit(workspace_id.into());
        self
    }

    pub fn with_abort(mut self, handle: AbortHandle) -> Self {
        self.abort = Some(handle);
        self
    }
}

/// Cliente API - lee token y workspace de los stores, nunca los modifica
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    workspace_scope: WorkspaceScope,
    workspace_query_param: String,
    workspace_header: String,
    session: SessionState,
    workspaces: WorkspaceState,
    transport: Rc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(
        config: &AppConfig,
        session: SessionState,
        workspaces: WorkspaceState,
        transport: Rc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_url: config.backend_url().to_string(),
            workspace_scope: config.workspace_scope,
            workspace_query_param: config.workspace_query_param.clone(),
            workspace_header: config.workspace_header.clone(),
            session,
            workspaces,
            transport,
        }
    }

    /// Construye la request final sin enviarla
    pub fn prepare(&self, method: Method, path: &str, body: Option<String>, options: &RequestOptions) -> PreparedRequest {
        let mut url = join_url(&self.base_url, path);
        let mut headers = Vec::new();

        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        if options.include_authorization {
            if let Some(token) = self.session.get_token() {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }

        if options.include_query_param {
            let workspace_id = match &options.workspace {
                WorkspaceOverride::Active => self.workspaces.current_id(),
                WorkspaceOverride::Explicit(id) => Some(id.clone()),
                WorkspaceOverride::Omit => None,
            };
            if let Some(id) = workspace_id {
                match self.workspace_scope {
                    WorkspaceScope::Query => {
                        url = append_query(&url, &self.workspace_query_param, &id);
                    }
                    WorkspaceScope::Header => {
                        headers.push((self.workspace_header.clone(), id));
                    }
                }
            }
        }

        PreparedRequest { method, url, headers, body }
    }

    /// Envía la request. Respuestas no-2xx se convierten en `ApiError::Http`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        options: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.prepare(method, path, body, &options);
        log::debug!("🌐 [API] {} {}", method.as_str(), request.url);

        let response = self.transport.send(request, options.abort.clone()).await?;
        if options.abort.as_ref().is_some_and(AbortHandle::is_aborted) {
            return Err(ApiError::Aborted);
        }
        if !response.ok() {
            log::warn!("⚠️ [API] {} {} → HTTP {}", method.as_str(), path, response.status);
            return Err(ApiError::from_response(&response));
        }
        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        let response = self.send(Method::Get, path, None, options).await?;
        parse_body(&response)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::Post, path, Some(encode_body(body)?), options).await?;
        parse_body(&response)
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::Put, path, Some(encode_body(body)?), options).await?;
        parse_body(&response)
    }

    /// PUT sin cuerpo ni respuesta útil (acciones tipo "marcar como leída")
    pub async fn put_empty(&self, path: &str, options: RequestOptions) -> Result<(), ApiError> {
        self.send(Method::Put, path, None, options).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<(), ApiError> {
        self.send(Method::Delete, path, None, options).await.map(|_| ())
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Parse(format!("Serialization error: {}", e)))
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

fn append_query(url: &str, key: &str, value: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        url,
        separator,
        urlencoding::encode(key),
        urlencoding::encode(value)
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Transporte guionado para tests: cada `send` consume la siguiente
    //! respuesta de la cola (inmediata o controlada por un oneshot).

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use futures::channel::oneshot;

    use super::*;
    use crate::models::Identity;

    pub enum Scripted {
        Ready(Result<HttpResponse, ApiError>),
        Pending(oneshot::Receiver<Result<HttpResponse, ApiError>>),
    }

    #[derive(Default)]
    pub struct ScriptedTransport {
        pub requests: RefCell<Vec<PreparedRequest>>,
        script: RefCell<VecDeque<Scripted>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn reply(&self, status: u16, body: &str) {
            self.script.borrow_mut().push_back(Scripted::Ready(Ok(json_response(status, body))));
        }

        pub fn fail(&self, error: ApiError) {
            self.script.borrow_mut().push_back(Scripted::Ready(Err(error)));
        }

        /// Respuesta que se entrega cuando el test envía por el oneshot
        pub fn deferred(&self) -> oneshot::Sender<Result<HttpResponse, ApiError>> {
            let (tx, rx) = oneshot::channel();
            self.script.borrow_mut().push_back(Scripted::Pending(rx));
            tx
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last_request(&self) -> Option<PreparedRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: PreparedRequest, _abort: Option<AbortHandle>) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            let next = self.script.borrow_mut().pop_front();
            match next {
                Some(Scripted::Ready(result)) => result,
                Some(Scripted::Pending(rx)) => rx.await.unwrap_or(Err(ApiError::Aborted)),
                None => Err(ApiError::Network("no scripted response".into())),
            }
        }
    }

    pub fn json_response(status: u16, body: &str) -> HttpResponse {
        let status_text = match status {
            200 => "OK",
            201 => "Created",
            401 => "Unauthorized",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "",
        };
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }

    pub fn identity() -> Identity {
        Identity {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@taskflux.dev".into(),
            avatar_url: None,
        }
    }

    pub fn client(
        transport: Rc<ScriptedTransport>,
        session: SessionState,
        workspaces: WorkspaceState,
    ) -> ApiClient {
        let config = AppConfig {
            backend_url: "https://api.test/".to_string(),
            ..AppConfig::default()
        };
        ApiClient::new(&config, session, workspaces, transport)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::models::{Workspace, WorkspaceKind};

    fn workspace(id: &str) -> Workspace {
        Workspace {
            id: id.into(),
            name: id.into(),
            kind: WorkspaceKind::Team,
            role: "owner".into(),
            created_at: String::new(),
        }
    }

    fn logged_in() -> (SessionState, WorkspaceState) {
        let session = SessionState::new();
        session.authenticate("tok-123".into(), identity());
        let workspaces = WorkspaceState::new();
        workspaces.set_items(vec![workspace("w 1")], None);
        (session, workspaces)
    }

    #[test]
    fn default_options_attach_token_and_active_workspace() {
        let (session, workspaces) = logged_in();
        let api = client(ScriptedTransport::new(), session, workspaces);

        let request = api.prepare(Method::Get, "/tasks?status=todo", None, &RequestOptions::default());

        assert_eq!(request.url, "https://api.test/tasks?status=todo&workspaceId=w%201");
        assert_eq!(request.header("authorization"), Some("Bearer tok-123"));
        assert_eq!(request.header("content-type"), None);
    }

    #[test]
    fn include_authorization_false_never_sends_the_token() {
        let (session, workspaces) = logged_in();
        let api = client(ScriptedTransport::new(), session, workspaces);

        let options = RequestOptions::default().without_authorization();
        let request = api.prepare(Method::Post, "auth/login", Some("{}".into()), &options);

        assert_eq!(request.header("Authorization"), None);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.url, "https://api.test/auth/login?workspaceId=w%201");
    }

    #[test]
    fn workspace_override_and_suppression() {
        let (session, workspaces) = logged_in();
        let api = client(ScriptedTransport::new(), session, workspaces);

        let explicit = api.prepare(Method::Get, "/projects", None, &RequestOptions::default().with_workspace("w2"));
        assert_eq!(explicit.url, "https://api.test/projects?workspaceId=w2");

        let omitted = RequestOptions { workspace: WorkspaceOverride::Omit, ..RequestOptions::default() };
        assert_eq!(api.prepare(Method::Get, "/projects", None, &omitted).url, "https://api.test/projects");

        let suppressed = RequestOptions::default().without_workspace().with_workspace("w2");
        assert_eq!(api.prepare(Method::Get, "/projects", None, &suppressed).url, "https://api.test/projects");
    }

    #[test]
    fn header_scope_moves_workspace_into_a_header() {
        let (session, workspaces) = logged_in();
        let config = AppConfig {
            backend_url: "https://api.test".into(),
            workspace_scope: WorkspaceScope::Header,
            ..AppConfig::default()
        };
        let api = ApiClient::new(&config, session, workspaces, ScriptedTransport::new());

        let request = api.prepare(Method::Get, "/tasks", None, &RequestOptions::default());
        assert_eq!(request.url, "https://api.test/tasks");
        assert_eq!(request.header("x-workspace-id"), Some("w 1"));
    }

    #[tokio::test]
    async fn non_2xx_becomes_http_error_with_message() {
        let (session, workspaces) = logged_in();
        let transport = ScriptedTransport::new();
        transport.reply(500, r#"{"message":"db down"}"#);
        let api = client(transport.clone(), session, workspaces);

        let err = api.get_json::<serde_json::Value>("/tasks", RequestOptions::default()).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                status_text: "Internal Server Error".into(),
                message: Some("db down".into())
            }
        );
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn aborted_before_response_is_reported_as_abort() {
        let (session, workspaces) = logged_in();
        let transport = ScriptedTransport::new();
        transport.reply(200, "[]");
        let api = client(transport, session, workspaces);

        let handle = AbortHandle::new();
        handle.abort();
        let err = api
            .get_json::<Vec<serde_json::Value>>("/tasks", RequestOptions::default().with_abort(handle))
            .await
            .unwrap_err();
        assert!(err.is_abort());
    }
}
