// ============================================================================
// WORKSPACE BOOTSTRAP - Carga única de workspaces por sesión
// ============================================================================
// Dispara como mucho un fetch en vuelo por (sesión, inicialización). Cada
// fetch captura su AbortHandle; si se cancela antes de terminar, el resultado
// se descarta sin tocar el estado.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::{workspace_service, ApiClient};
use crate::state::AppState;
use crate::utils::storage::CURRENT_WORKSPACE_KEY;
use crate::utils::{AbortHandle, KeyValueStore};

pub const WORKSPACE_FETCH_FALLBACK: &str = "Failed to load workspaces";

/// Condiciones que pueden disparar el bootstrap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootstrapTrigger {
    /// La sesión pasó a autenticada (login, registro o restauración)
    SessionChanged,
    /// Se montó el shell del dashboard
    Mounted,
    /// El usuario pidió recargar la lista
    ManualRefresh,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// No se cumplían las precondiciones; no hubo red
    Skipped,
    Loaded,
    Failed,
    /// Cancelado en vuelo; el estado no se tocó
    Discarded,
}

pub struct WorkspaceBootstrap {
    api: ApiClient,
    state: AppState,
    storage: Rc<dyn KeyValueStore>,
    in_flight: RefCell<Option<AbortHandle>>,
}

impl WorkspaceBootstrap {
    pub fn new(api: ApiClient, state: AppState, storage: Rc<dyn KeyValueStore>) -> Self {
        Self {
            api,
            state,
            storage,
            in_flight: RefCell::new(None),
        }
    }

    pub fn should_fetch(&self) -> bool {
        let session = &self.state.session;
        session.is_authenticated()
            && session.get_token().is_some()
            && !self.state.workspaces.has_initialized()
            && self.in_flight.borrow().is_none()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.borrow().is_some()
    }

    pub async fn handle(&self, trigger: BootstrapTrigger) -> BootstrapOutcome {
        if trigger == BootstrapTrigger::ManualRefresh && self.state.session.is_authenticated() {
            self.cancel();
            self.state.workspaces.reset_initialization();
        }
        if !self.should_fetch() {
            return BootstrapOutcome::Skipped;
        }

        log::info!("🏢 [BOOTSTRAP] Cargando workspaces ({:?})", trigger);
        let handle = AbortHandle::new();
        *self.in_flight.borrow_mut() = Some(handle.clone());

        let workspaces = &self.state.workspaces;
        workspaces.set_loading(true);
        workspaces.set_error(None);
        self.state.notify_changes();

        let result = workspace_service::fetch_workspaces(&self.api, handle.clone()).await;

        if handle.is_aborted() {
            log::info!("🚫 [BOOTSTRAP] Resultado descartado (cancelado)");
            return BootstrapOutcome::Discarded;
        }
        self.in_flight.borrow_mut().take();

        let outcome = match result {
            Ok(list) => {
                log::info!("✅ [BOOTSTRAP] {} workspaces", list.len());
                let preferred = self.storage.get(CURRENT_WORKSPACE_KEY);
                workspaces.set_items(list, preferred.as_deref());
                BootstrapOutcome::Loaded
            }
            Err(e) if e.is_abort() => {
                workspaces.set_loading(false);
                self.state.notify_changes();
                return BootstrapOutcome::Discarded;
            }
            Err(e) => {
                let message = e.user_message(WORKSPACE_FETCH_FALLBACK);
                log::error!("❌ [BOOTSTRAP] {}", message);
                workspaces.set_error(Some(message));
                BootstrapOutcome::Failed
            }
        };

        // También en error: la UI no reintenta en bucle
        workspaces.mark_initialized();
        workspaces.set_loading(false);
        self.state.notify_changes();
        outcome
    }

    /// Desmontaje, re-entrada o logout: el fetch en vuelo no aplicará nada
    pub fn cancel(&self) {
        if let Some(handle) = self.in_flight.borrow_mut().take() {
            log::info!("🚫 [BOOTSTRAP] Cancelando fetch en vuelo");
            handle.abort();
            self.state.workspaces.set_loading(false);
        }
    }
}
