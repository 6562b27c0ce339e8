// ============================================================================
// APP STATE - Contenedor explícito del estado de la aplicación
// ============================================================================
// Se pasa por referencia (o clonado: los clones comparten los Rc) a cada
// viewmodel y vista. No hay singletons de stores.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Project, Route, Task};
use crate::state::{CollectionState, NotificationState, SessionState, WorkspaceState};

#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub workspaces: WorkspaceState,
    pub notifications: NotificationState,
    pub tasks: CollectionState<Task>,
    pub projects: CollectionState<Project>,

    // UI State
    route: Rc<RefCell<Route>>,
    show_notifications: Rc<RefCell<bool>>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new(initial_route: Route) -> Self {
        Self {
            session: SessionState::new(),
            workspaces: WorkspaceState::new(),
            notifications: NotificationState::new(),
            tasks: CollectionState::new(),
            projects: CollectionState::new(),
            route: Rc::new(RefCell::new(initial_route)),
            show_notifications: Rc::new(RefCell::new(false)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn current_route(&self) -> Route {
        *self.route.borrow()
    }

    pub fn set_route(&self, route: Route) {
        *self.route.borrow_mut() = route;
        self.notify_changes();
    }

    pub fn notifications_panel_open(&self) -> bool {
        *self.show_notifications.borrow()
    }

    pub fn toggle_notifications_panel(&self) {
        {
            let mut open = self.show_notifications.borrow_mut();
            *open = !*open;
        }
        self.notify_changes();
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a los subscribers. Se copia la lista antes de llamar para
    /// que un callback pueda suscribir otro sin re-entrar en el borrow.
    pub fn notify_changes(&self) {
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }

    /// Limpieza completa al cerrar sesión
    pub fn reset_for_logout(&self) {
        self.session.clear();
        self.workspaces.reset();
        self.notifications.clear();
        self.tasks.clear();
        self.projects.clear();
        *self.show_notifications.borrow_mut() = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn route_changes_notify_subscribers() {
        let state = AppState::new(Route::Login);
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        state.subscribe_to_changes(move || h.set(h.get() + 1));

        state.clone().set_route(Route::Tasks);
        assert_eq!(state.current_route(), Route::Tasks);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn notifications_panel_toggles_and_closes_on_logout() {
        let state = AppState::new(Route::Dashboard);
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        state.subscribe_to_changes(move || h.set(h.get() + 1));

        assert!(!state.notifications_panel_open());
        state.toggle_notifications_panel();
        assert!(state.notifications_panel_open());
        assert_eq!(hits.get(), 1);

        state.reset_for_logout();
        assert!(!state.notifications_panel_open());
    }

    #[test]
    fn logout_reset_clears_workspace_initialization() {
        let state = AppState::new(Route::Dashboard);
        state.workspaces.mark_initialized();
        state.tasks.begin("w1");
        state.reset_for_logout();
        assert!(!state.workspaces.has_initialized());
        assert!(state.tasks.workspace_id().is_none());
    }
}
