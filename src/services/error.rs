use serde::Deserialize;
use thiserror::Error;

use crate::services::transport::HttpResponse;

/// Errores de la capa HTTP
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        message: Option<String>,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    /// Cancelación; nunca se muestra al usuario
    #[error("Request aborted")]
    Aborted,

    #[error("{0}")]
    Validation(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Construye el error a partir de una respuesta no-2xx. El campo
    /// `message` del cuerpo es best-effort: puede faltar o no ser JSON.
    pub fn from_response(response: &HttpResponse) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        ApiError::Http {
            status: response.status,
            status_text: response.status_text.clone(),
            message,
        }
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, ApiError::Aborted)
    }

    /// Texto para los banners: `message` del cuerpo, luego el status text,
    /// luego `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http { message: Some(message), .. } => message.clone(),
            ApiError::Http { status_text, .. } if !status_text.trim().is_empty() => status_text.clone(),
            ApiError::Network(detail) | ApiError::Parse(detail) | ApiError::Validation(detail)
                if !detail.trim().is_empty() =>
            {
                detail.clone()
            }
            _ => fallback.to_string(),
        }
    }
}
