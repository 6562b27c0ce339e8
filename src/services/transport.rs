// ============================================================================
// HTTP TRANSPORT - Envío real de requests (gloo-net en el navegador)
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::services::error::ApiError;
use crate::utils::AbortHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Request ya construida por el gateway
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl PreparedRequest {
    /// Header por nombre (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: PreparedRequest, abort: Option<AbortHandle>) -> Result<HttpResponse, ApiError>;
}

/// Transporte del navegador (fetch vía gloo-net)
#[derive(Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: PreparedRequest, abort: Option<AbortHandle>) -> Result<HttpResponse, ApiError> {
        let aborted = || abort.as_ref().is_some_and(AbortHandle::is_aborted);
        if aborted() {
            return Err(ApiError::Aborted);
        }

        // El AbortController del navegador sigue al AbortHandle del caller
        let controller = match &abort {
            Some(handle) => {
                let controller = web_sys::AbortController::new()
                    .map_err(|e| ApiError::Network(format!("AbortController: {:?}", e)))?;
                let on_abort = controller.clone();
                handle.on_abort(move || on_abort.abort());
                Some(controller)
            }
            None => None,
        };
        let signal = controller.as_ref().map(|c| c.signal());

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = builder.abort_signal(signal.as_ref());

        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?;

        let response = match built.send().await {
            Ok(response) => response,
            Err(_) if aborted() => return Err(ApiError::Aborted),
            Err(e) => return Err(ApiError::Network(e.to_string())),
        };

        let status = response.status();
        let status_text = response.status_text();
        let body = match response.text().await {
            Ok(body) => body,
            Err(_) if aborted() => return Err(ApiError::Aborted),
            Err(e) => return Err(ApiError::Network(format!("Error leyendo respuesta: {}", e))),
        };

        Ok(HttpResponse { status, status_text, body })
    }
}
