// ============================================================================
// WORKSPACE STATE - Lista de workspaces + workspace activo
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::Workspace;

#[derive(Clone)]
pub struct WorkspaceState {
    items: Rc<RefCell<Vec<Workspace>>>,
    current: Rc<RefCell<Option<Workspace>>>,
    has_initialized: Rc<RefCell<bool>>,
    is_loading: Rc<RefCell<bool>>,
    error: Rc<RefCell<Option<String>>>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self {
            items: Rc::new(RefCell::new(Vec::new())),
            current: Rc::new(RefCell::new(None)),
            has_initialized: Rc::new(RefCell::new(false)),
            is_loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    /// Reemplaza la lista; si el workspace activo ya no existe se elige
    /// `preferred_id` o el primero.
    pub fn set_items(&self, items: Vec<Workspace>, preferred_id: Option<&str>) {
        let keep_id = self
            .current_id()
            .or_else(|| preferred_id.map(str::to_string));
        let next = keep_id
            .and_then(|id| items.iter().find(|w| w.id == id).cloned())
            .or_else(|| items.first().cloned());
        *self.items.borrow_mut() = items;
        *self.current.borrow_mut() = next;
    }

    pub fn get_items(&self) -> Vec<Workspace> {
        self.items.borrow().clone()
    }

    pub fn get_current(&self) -> Option<Workspace> {
        self.current.borrow().clone()
    }

    pub fn current_id(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|w| w.id.clone())
    }

    /// Seleccionar workspace por id; false si no pertenece a la lista
    pub fn select(&self, id: &str) -> bool {
        let found = self.items.borrow().iter().find(|w| w.id == id).cloned();
        match found {
            Some(workspace) => {
                *self.current.borrow_mut() = Some(workspace);
                true
            }
            None => false,
        }
    }

    pub fn has_initialized(&self) -> bool {
        *self.has_initialized.borrow()
    }

    /// false→true una sola vez; devuelve si hubo transición
    pub fn mark_initialized(&self) -> bool {
        let mut flag = self.has_initialized.borrow_mut();
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    /// Refresco manual explícito del usuario
    pub fn reset_initialization(&self) {
        *self.has_initialized.borrow_mut() = false;
    }

    pub fn set_loading(&self, loading: bool) {
        *self.is_loading.borrow_mut() = loading;
    }

    pub fn get_loading(&self) -> bool {
        *self.is_loading.borrow()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    /// Logout: vuelve al estado inicial
    pub fn reset(&self) {
        self.items.borrow_mut().clear();
        *self.current.borrow_mut() = None;
        *self.has_initialized.borrow_mut() = false;
        *self.is_loading.borrow_mut() = false;
        *self.error.borrow_mut() = None;
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}
