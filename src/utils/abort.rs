// ============================================================================
// ABORT HANDLE - Cancelación cooperativa de requests
// ============================================================================
// Flag compartido capturado al lanzar una operación. Quien aplica el resultado
// debe consultar `is_aborted()` antes de tocar el estado. El transporte puede
// además engancharse con `on_abort` para cortar la request real.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct AbortHandle {
    inner: Rc<AbortInner>,
}

#[derive(Default)]
struct AbortInner {
    aborted: Cell<bool>,
    listeners: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marca como abortado y dispara los listeners (solo la primera vez)
    pub fn abort(&self) {
        if self.inner.aborted.replace(true) {
            return;
        }
        let listeners = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        for listener in listeners {
            listener();
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.inner.aborted.get()
    }

    /// Registrar callback de aborto; si ya está abortado se ejecuta en el acto
    pub fn on_abort<F>(&self, listener: F)
    where
        F: FnOnce() + 'static,
    {
        if self.is_aborted() {
            listener();
            return;
        }
        self.inner.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn same_as(&self, other: &AbortHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for AbortHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbortHandle")
            .field("aborted", &self.is_aborted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_fire_once() {
        let handle = AbortHandle::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        handle.on_abort(move || h.set(h.get() + 1));

        let clone = handle.clone();
        clone.abort();
        handle.abort();

        assert!(handle.is_aborted());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn late_listener_runs_immediately() {
        let handle = AbortHandle::new();
        handle.abort();
        let hit = Rc::new(Cell::new(false));
        let h = hit.clone();
        handle.on_abort(move || h.set(true));
        assert!(hit.get());
    }
}
