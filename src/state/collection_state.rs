// ============================================================================
// COLLECTION STATE - Cache transitoria de listas por workspace
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Lista cacheada (tareas, proyectos) del workspace `workspace_id`
pub struct CollectionState<T> {
    items: Rc<RefCell<Vec<T>>>,
    workspace_id: Rc<RefCell<Option<String>>>,
    // Workspace cuya carga terminó (con datos o con error)
    loaded_for: Rc<RefCell<Option<String>>>,
    is_loading: Rc<RefCell<bool>>,
    error: Rc<RefCell<Option<String>>>,
}

// derive(Clone) exigiría T: Clone
impl<T> Clone for CollectionState<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            workspace_id: self.workspace_id.clone(),
            loaded_for: self.loaded_for.clone(),
            is_loading: self.is_loading.clone(),
            error: self.error.clone(),
        }
    }
}

impl<T: Clone> CollectionState<T> {
    pub fn new() -> Self {
        Self {
            items: Rc::new(RefCell::new(Vec::new())),
            workspace_id: Rc::new(RefCell::new(None)),
            loaded_for: Rc::new(RefCell::new(None)),
            is_loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    /// Inicio de carga para un workspace; vacía la lista si cambió de workspace
    pub fn begin(&self, workspace_id: &str) {
        let changed = self.workspace_id.borrow().as_deref() != Some(workspace_id);
        if changed {
            self.items.borrow_mut().clear();
            *self.workspace_id.borrow_mut() = Some(workspace_id.to_string());
            *self.loaded_for.borrow_mut() = None;
        }
        *self.is_loading.borrow_mut() = true;
        *self.error.borrow_mut() = None;
    }

    pub fn finish(&self, items: Vec<T>) {
        *self.items.borrow_mut() = items;
        *self.loaded_for.borrow_mut() = self.workspace_id.borrow().clone();
        *self.is_loading.borrow_mut() = false;
    }

    pub fn fail(&self, error: String) {
        *self.error.borrow_mut() = Some(error);
        *self.loaded_for.borrow_mut() = self.workspace_id.borrow().clone();
        *self.is_loading.borrow_mut() = false;
    }

    /// Carga cancelada: solo se apaga el indicador; `loaded_for` no cambia
    pub fn settle(&self) {
        *self.is_loading.borrow_mut() = false;
    }

    pub fn push(&self, item: T) {
        self.items.borrow_mut().push(item);
    }

    /// Reemplaza el primer elemento que cumpla `matches`
    pub fn replace_where<F>(&self, matches: F, item: T) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut items = self.items.borrow_mut();
        match items.iter_mut().find(|existing| matches(existing)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn get_items(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    pub fn workspace_id(&self) -> Option<String> {
        self.workspace_id.borrow().clone()
    }

    /// true si la lista ya es de `workspace_id` o hay una carga en vuelo para él
    pub fn covers(&self, workspace_id: &str) -> bool {
        let target = Some(workspace_id);
        self.loaded_for.borrow().as_deref() == target
            || (*self.is_loading.borrow() && self.workspace_id.borrow().as_deref() == target)
    }

    pub fn get_loading(&self) -> bool {
        *self.is_loading.borrow()
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        *self.workspace_id.borrow_mut() = None;
        *self.loaded_for.borrow_mut() = None;
        *self.is_loading.borrow_mut() = false;
        *self.error.borrow_mut() = None;
    }
}

impl<T: Clone> Default for CollectionState<T> {
    fn default() -> Self {
        Self::new()
    }
}
