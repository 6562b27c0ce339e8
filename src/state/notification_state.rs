// ============================================================================
// NOTIFICATION STATE - Lista de notificaciones, preferencias y conexión
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Notification, NotificationEvent, NotificationPreferences};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// Permiso de notificaciones de escritorio del navegador
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DesktopPermission {
    Default,
    Granted,
    Denied,
    Unsupported,
}

#[derive(Clone)]
pub struct NotificationState {
    items: Rc<RefCell<Vec<Notification>>>,
    preferences: Rc<RefCell<NotificationPreferences>>,
    permission: Rc<RefCell<DesktopPermission>>,
    connection: Rc<RefCell<ConnectionStatus>>,
    is_loading: Rc<RefCell<bool>>,
    error: Rc<RefCell<Option<String>>>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self {
            items: Rc::new(RefCell::new(Vec::new())),
            preferences: Rc::new(RefCell::new(NotificationPreferences::default())),
            permission: Rc::new(RefCell::new(DesktopPermission::Default)),
            connection: Rc::new(RefCell::new(ConnectionStatus::Disconnected)),
            is_loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    /// Aplica un evento del socket. Devuelve la notificación si es nueva.
    pub fn apply(&self, event: NotificationEvent) -> Option<Notification> {
        let mut items = self.items.borrow_mut();
        match event {
            NotificationEvent::Created { notification } => {
                if items.iter().any(|n| n.id == notification.id) {
                    return None;
                }
                items.insert(0, notification.clone());
                Some(notification)
            }
            NotificationEvent::Updated { notification } => {
                if let Some(slot) = items.iter_mut().find(|n| n.id == notification.id) {
                    *slot = notification;
                }
                None
            }
            NotificationEvent::Read { id } => {
                set_read(&mut items, &id, true);
                None
            }
            NotificationEvent::Unread { id } => {
                set_read(&mut items, &id, false);
                None
            }
            NotificationEvent::Deleted { id } => {
                items.retain(|n| n.id != id);
                None
            }
            NotificationEvent::AllRead => {
                for n in items.iter_mut() {
                    n.read = true;
                }
                None
            }
        }
    }

    pub fn set_items(&self, items: Vec<Notification>) {
        *self.items.borrow_mut() = items;
    }

    pub fn get_items(&self) -> Vec<Notification> {
        self.items.borrow().clone()
    }

    pub fn find(&self, id: &str) -> Option<Notification> {
        self.items.borrow().iter().find(|n| n.id == id).cloned()
    }

    /// Reinsertar una notificación (rollback de un borrado optimista)
    pub fn restore(&self, notification: Notification, index: usize) {
        let mut items = self.items.borrow_mut();
        let index = index.min(items.len());
        items.insert(index, notification);
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.borrow().iter().position(|n| n.id == id)
    }

    /// Lo que muestra el panel: categorías con in_app desactivado se ocultan
    pub fn visible(&self) -> Vec<Notification> {
        let prefs = self.preferences.borrow();
        self.items
            .borrow()
            .iter()
            .filter(|n| prefs.for_category(n.category).in_app)
            .cloned()
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.visible().iter().filter(|n| !n.read).count()
    }

    pub fn set_preferences(&self, preferences: NotificationPreferences) {
        *self.preferences.borrow_mut() = preferences;
    }

    pub fn get_preferences(&self) -> NotificationPreferences {
        self.preferences.borrow().clone()
    }

    pub fn set_permission(&self, permission: DesktopPermission) {
        *self.permission.borrow_mut() = permission;
    }

    pub fn get_permission(&self) -> DesktopPermission {
        *self.permission.borrow()
    }

    pub fn set_connection(&self, status: ConnectionStatus) {
        *self.connection.borrow_mut() = status;
    }

    pub fn get_connection(&self) -> ConnectionStatus {
        *self.connection.borrow()
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

    /// Logout. El permiso de escritorio es del navegador, se conserva.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        *self.preferences.borrow_mut() = NotificationPreferences::default();
        *self.connection.borrow_mut() = ConnectionStatus::Disconnected;
        *self.is_loading.borrow_mut() = false;
        *self.error.borrow_mut() = None;
    }
}

fn set_read(items: &mut [Notification], id: &str, read: bool) {
    if let Some(n) = items.iter_mut().find(|n| n.id == id) {
        n.read = read;
    }
}

impl Default for NotificationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelPreference, NotificationCategory};

    fn note(id: &str, category: NotificationCategory) -> Notification {
        Notification {
            id: id.into(),
            title: format!("title {}", id),
            message: String::new(),
            category,
            read: false,
            created_at: None,
            link: None,
        }
    }

    #[test]
    fn created_events_prepend_and_ignore_duplicates() {
        let state = NotificationState::new();
        let first = state.apply(NotificationEvent::Created { notification: note("1", NotificationCategory::Mention) });
        let second = state.apply(NotificationEvent::Created { notification: note("2", NotificationCategory::Mention) });
        let dup = state.apply(NotificationEvent::Created { notification: note("1", NotificationCategory::Mention) });

        assert!(first.is_some() && second.is_some());
        assert!(dup.is_none());
        let ids: Vec<String> = state.get_items().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn read_unread_delete_and_all_read() {
        let state = NotificationState::new();
        state.set_items(vec![note("1", NotificationCategory::System), note("2", NotificationCategory::System)]);

        state.apply(NotificationEvent::Read { id: "1".into() });
        assert_eq!(state.unread_count(), 1);
        state.apply(NotificationEvent::Unread { id: "1".into() });
        assert_eq!(state.unread_count(), 2);
        state.apply(NotificationEvent::Deleted { id: "2".into() });
        state.apply(NotificationEvent::AllRead);
        assert_eq!(state.get_items().len(), 1);
        assert_eq!(state.unread_count(), 0);
    }

    #[test]
    fn in_app_preference_hides_but_keeps_items() {
        let state = NotificationState::new();
        state.set_items(vec![note("1", NotificationCategory::DueSoon), note("2", NotificationCategory::Mention)]);

        let mut prefs = NotificationPreferences::default();
        prefs.set(
            NotificationCategory::DueSoon,
            ChannelPreference { in_app: false, desktop: true, sound: false },
        );
        state.set_preferences(prefs);

        assert_eq!(state.visible().len(), 1);
        assert_eq!(state.unread_count(), 1);
        assert_eq!(state.get_items().len(), 2);
    }
}
