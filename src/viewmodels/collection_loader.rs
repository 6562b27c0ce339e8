// ============================================================================
// COLLECTION LOADER - Listas por workspace con cancelación
// ============================================================================
// Cada carga nueva aborta la anterior. Un resultado cuyo handle fue abortado
// nunca se aplica, aunque llegue después que el de la carga nueva.
// ============================================================================

use std::cell::RefCell;
use std::future::Future;

use crate::services::ApiError;
use crate::state::CollectionState;
use crate::utils::AbortHandle;

pub struct CollectionLoader<T> {
    label: &'static str,
    state: CollectionState<T>,
    current: RefCell<Option<AbortHandle>>,
}

impl<T: Clone> CollectionLoader<T> {
    pub fn new(label: &'static str, state: CollectionState<T>) -> Self {
        Self {
            label,
            state,
            current: RefCell::new(None),
        }
    }

    pub fn state(&self) -> &CollectionState<T> {
        &self.state
    }

    /// Carga la lista de `workspace_id`. Devuelve true si el resultado se aplicó.
    pub async fn load<F, Fut>(&self, workspace_id: &str, fetch: F) -> bool
    where
        F: FnOnce(AbortHandle) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let handle = AbortHandle::new();
        if let Some(previous) = self.current.borrow_mut().replace(handle.clone()) {
            previous.abort();
        }
        self.state.begin(workspace_id);

        let result = fetch(handle.clone()).await;

        if handle.is_aborted() {
            log::debug!("🚫 [{}] Resultado obsoleto descartado ({})", self.label, workspace_id);
            return false;
        }
        self.current.borrow_mut().take();

        match result {
            Ok(items) => {
                log::info!("✅ [{}] {} elementos ({})", self.label, items.len(), workspace_id);
                self.state.finish(items);
                true
            }
            Err(e) if e.is_abort() => {
                self.state.settle();
                false
            }
            Err(e) => {
                let message = e.user_message(&format!("Failed to load {}", self.label.to_lowercase()));
                log::error!("❌ [{}] {}", self.label, message);
                self.state.fail(message);
                true
            }
        }
    }

    /// Desmontaje: la carga en vuelo se descarta
    pub fn abort(&self) {
        if let Some(handle) = self.current.borrow_mut().take() {
            handle.abort();
            self.state.settle();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.current.borrow().is_some()
    }
}
