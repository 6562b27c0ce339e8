// ============================================================================
// SESSION STATE - Token, identidad y flags de carga
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::Identity;

/// Estado de sesión. Los campos son privados: `authenticate` es la única
/// forma de marcar la sesión como autenticada, así token y usuario existen
/// siempre que `is_authenticated()` sea true.
#[derive(Clone)]
pub struct SessionState {
    token: Rc<RefCell<Option<String>>>,
    user: Rc<RefCell<Option<Identity>>>,
    is_authenticated: Rc<RefCell<bool>>,
    is_loading: Rc<RefCell<bool>>,
    error: Rc<RefCell<Option<String>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            token: Rc::new(RefCell::new(None)),
            user: Rc::new(RefCell::new(None)),
            is_authenticated: Rc::new(RefCell::new(false)),
            is_loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    /// Establecer sesión autenticada
    pub fn authenticate(&self, token: String, user: Identity) {
        *self.token.borrow_mut() = Some(token);
        *self.user.borrow_mut() = Some(user);
        *self.is_authenticated.borrow_mut() = true;
        *self.error.borrow_mut() = None;
    }

    /// Logout - limpiar todo
    pub fn clear(&self) {
        *self.token.borrow_mut() = None;
        *self.user.borrow_mut() = None;
        *self.is_authenticated.borrow_mut() = false;
        *self.is_loading.borrow_mut() = false;
        *self.error.borrow_mut() = None;
    }

    pub fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn get_user(&self) -> Option<Identity> {
        self.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        *self.is_authenticated.borrow()
    }

    /// Hay sesión si hay token o el flag de autenticación está activo
    pub fn has_session(&self) -> bool {
        self.token.borrow().is_some() || self.is_authenticated()
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
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Identity {
        Identity {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@taskflux.dev".into(),
            avatar_url: None,
        }
    }

    #[test]
    fn authenticated_implies_token_and_user() {
        let session = SessionState::new();
        assert!(!session.has_session());

        session.set_error(Some("bad password".into()));
        session.authenticate("tok".into(), ana());

        assert!(session.is_authenticated());
        assert_eq!(session.get_token().as_deref(), Some("tok"));
        assert_eq!(session.get_user().map(|u| u.id), Some("u1".to_string()));
        assert_eq!(session.get_error(), None);
    }

    #[test]
    fn clones_share_state_and_clear_resets_everything() {
        let session = SessionState::new();
        let consumer = session.clone();
        session.authenticate("tok".into(), ana());
        session.set_loading(true);
        assert!(consumer.has_session());

        consumer.clear();
        assert!(!session.has_session());
        assert!(!session.get_loading());
        assert!(session.get_user().is_none());
    }
}
