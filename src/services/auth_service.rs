use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services::api_client::{ApiClient, RequestOptions};
use crate::services::error::ApiError;

/// Login con email y contraseña
pub async fn perform_login(api: &ApiClient, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    api.post_json("/auth/login", request, RequestOptions::public()).await
}

/// Registrar una cuenta nueva
pub async fn register_account(api: &ApiClient, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    api.post_json("/auth/register", request, RequestOptions::public()).await
}
