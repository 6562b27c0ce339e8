// ============================================================================
// SESSION VIEWMODEL - Login, registro, logout y restauración
// ============================================================================

use std::rc::Rc;

use crate::models::{AuthResponse, Identity, LoginRequest, RegisterRequest};
use crate::services::{auth_service, ApiClient};
use crate::state::AppState;
use crate::utils::storage::{self, CURRENT_WORKSPACE_KEY, TOKEN_KEY, USER_KEY};
use crate::utils::KeyValueStore;

pub struct SessionViewModel {
    api: ApiClient,
    state: AppState,
    storage: Rc<dyn KeyValueStore>,
}

impl SessionViewModel {
    pub fn new(api: ApiClient, state: AppState, storage: Rc<dyn KeyValueStore>) -> Self {
        Self { api, state, storage }
    }

    /// Relee token y usuario persistidos. Sin red: el guard espera a que
    /// `is_loading` vuelva a false antes de decidir.
    pub fn restore(&self) {
        let session = &self.state.session;
        session.set_loading(true);

        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = storage::load_json::<Identity>(self.storage.as_ref(), USER_KEY);
        match (token, user) {
            (Some(token), Some(user)) => {
                log::info!("💾 [SESSION] Sesión restaurada para {}", user.email);
                session.authenticate(token, user);
            }
            (Some(_), None) => {
                // Token huérfano: no se puede cumplir la invariante sin usuario
                log::warn!("⚠️ [SESSION] Token sin usuario persistido, descartando");
                storage::remove_keys(self.storage.as_ref(), &[TOKEN_KEY]);
            }
            _ => {}
        }

        session.set_loading(false);
        self.state.notify_changes();
    }

    pub async fn login(&self, email: String, password: String) -> Result<(), String> {
        let request = LoginRequest { email: email.trim().to_string(), password };
        self.begin();
        let result = auth_service::perform_login(&self.api, &request).await;
        self.complete(result, "Login failed")
    }

    pub async fn register(&self, name: String, email: String, password: String) -> Result<(), String> {
        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password,
        };
        self.begin();
        let result = auth_service::register_account(&self.api, &request).await;
        self.complete(result, "Registration failed")
    }

    /// Limpia stores y storage. El cierre del socket y la cancelación del
    /// bootstrap los hace `AppViewModel::logout`.
    pub fn logout(&self) {
        log::info!("👋 [SESSION] Logout");
        storage::remove_keys(self.storage.as_ref(), &[TOKEN_KEY, USER_KEY, CURRENT_WORKSPACE_KEY]);
        self.state.reset_for_logout();
        self.state.notify_changes();
    }

    fn begin(&self) {
        self.state.session.set_loading(true);
        self.state.session.set_error(None);
        self.state.notify_changes();
    }

    fn complete(&self, result: Result<AuthResponse, crate::services::ApiError>, fallback: &str) -> Result<(), String> {
        let session = &self.state.session;
        let outcome = match result {
            Ok(auth) => {
                if let Err(e) = self.storage.set(TOKEN_KEY, &auth.token) {
                    log::error!("❌ [SESSION] {}", e);
                }
                if let Err(e) = storage::save_json(self.storage.as_ref(), USER_KEY, &auth.user) {
                    log::error!("❌ [SESSION] {}", e);
                }
                log::info!("✅ [SESSION] Autenticado como {}", auth.user.email);
                session.authenticate(auth.token, auth.user);
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(fallback);
                log::warn!("⚠️ [SESSION] {}", message);
                session.set_error(Some(message.clone()));
                Err(message)
            }
        };
        session.set_loading(false);
        self.state.notify_changes();
        outcome
    }
}
