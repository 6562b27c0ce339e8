// ============================================================================
// ROUTE GUARD - Acceso a las rutas del dashboard
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::Route;
use crate::state::AppState;
use crate::utils::Navigator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardInputs {
    pub has_session: bool,
    pub is_loading: bool,
    pub is_protected: bool,
}

impl GuardInputs {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            has_session: state.session.has_session(),
            is_loading: state.session.get_loading(),
            is_protected: state.current_route().is_protected(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// Sesión indeterminada en ruta protegida: vista de carga bloqueante
    Indeterminate,
    Authorized,
    /// Sin sesión en ruta protegida: redirección a /login, no se renderiza nada
    Unauthorized,
    /// Ruta pública: siempre se renderiza
    Public,
}

impl GuardState {
    pub fn renders_children(self) -> bool {
        matches!(self, GuardState::Authorized | GuardState::Public)
    }
}

pub fn evaluate(inputs: GuardInputs) -> GuardState {
    if !inputs.is_protected {
        GuardState::Public
    } else if inputs.has_session {
        GuardState::Authorized
    } else if inputs.is_loading {
        GuardState::Indeterminate
    } else {
        GuardState::Unauthorized
    }
}

/// Guard con memoria: redirige una sola vez por visita no autorizada
pub struct RouteGuard {
    navigator: Rc<dyn Navigator>,
    redirected_from: RefCell<Option<Route>>,
}

impl RouteGuard {
    pub fn new(navigator: Rc<dyn Navigator>) -> Self {
        Self {
            navigator,
            redirected_from: RefCell::new(None),
        }
    }

    pub fn check(&self, state: &AppState) -> GuardState {
        let route = state.current_route();
        let decision = evaluate(GuardInputs::from_state(state));

        if decision != GuardState::Unauthorized {
            self.redirected_from.borrow_mut().take();
            return decision;
        }

        let already = *self.redirected_from.borrow() == Some(route);
        if !already {
            *self.redirected_from.borrow_mut() = Some(route);
            log::info!("🔒 [GUARD] {} requiere sesión, redirigiendo a /login", route.path());
            self.navigator.replace(Route::Login);
        }
        decision
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Navigator que solo registra (no cambia la ruta del estado)
    #[derive(Default)]
    pub struct RecordingNavigator {
        pub calls: RefCell<Vec<(&'static str, Route)>>,
    }

    impl RecordingNavigator {
        pub fn replaced(&self) -> Vec<Route> {
            self.calls
                .borrow()
                .iter()
                .filter(|(kind, _)| *kind == "replace")
                .map(|(_, route)| *route)
                .collect()
        }
    }

    impl Navigator for RecordingNavigator {
        fn push(&self, route: Route) {
            self.calls.borrow_mut().push(("push", route));
        }

        fn replace(&self, route: Route) {
            self.calls.borrow_mut().push(("replace", route));
        }
    }

    /// Navigator que además actualiza la ruta, como el del navegador
    pub struct StateNavigator {
        pub state: AppState,
        pub log: RecordingNavigator,
    }

    impl Navigator for StateNavigator {
        fn push(&self, route: Route) {
            self.log.push(route);
            self.state.set_route(route);
        }

        fn replace(&self, route: Route) {
            self.log.replace(route);
            self.state.set_route(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::services::api_client::test_support::identity;

    #[test]
    fn evaluation_table() {
        let cases = [
            // (session, loading, protected) → state
            ((false, true, true), GuardState::Indeterminate),
            ((false, false, true), GuardState::Unauthorized),
            ((true, true, true), GuardState::Authorized),
            ((true, false, true), GuardState::Authorized),
            ((false, true, false), GuardState::Public),
            ((false, false, false), GuardState::Public),
            ((true, false, false), GuardState::Public),
        ];
        for ((has_session, is_loading, is_protected), expected) in cases {
            let inputs = GuardInputs { has_session, is_loading, is_protected };
            assert_eq!(evaluate(inputs), expected, "{:?}", inputs);
        }
    }

    #[test]
    fn waits_for_loading_then_redirects_exactly_once() {
        let navigator = Rc::new(RecordingNavigator::default());
        let guard = RouteGuard::new(navigator.clone());
        let state = AppState::new(Route::Tasks);

        state.session.set_loading(true);
        assert_eq!(guard.check(&state), GuardState::Indeterminate);
        assert!(navigator.replaced().is_empty());

        state.session.set_loading(false);
        for _ in 0..5 {
            assert_eq!(guard.check(&state), GuardState::Unauthorized);
        }
        assert_eq!(navigator.replaced(), vec![Route::Login]);
    }

    #[test]
    fn redirect_lands_on_public_login_without_looping() {
        let state = AppState::new(Route::Dashboard);
        let navigator = Rc::new(StateNavigator { state: state.clone(), log: RecordingNavigator::default() });
        let guard = RouteGuard::new(navigator.clone());

        assert_eq!(guard.check(&state), GuardState::Unauthorized);
        assert_eq!(state.current_route(), Route::Login);
        assert_eq!(guard.check(&state), GuardState::Public);
        assert_eq!(guard.check(&state), GuardState::Public);
        assert_eq!(navigator.log.replaced(), vec![Route::Login]);
    }

    #[test]
    fn public_routes_never_redirect() {
        let navigator = Rc::new(RecordingNavigator::default());
        let guard = RouteGuard::new(navigator.clone());

        for route in [Route::Login, Route::Register] {
            let state = AppState::new(route);
            assert_eq!(guard.check(&state), GuardState::Public);
            state.session.set_loading(true);
            assert_eq!(guard.check(&state), GuardState::Public);
            state.session.authenticate("t".into(), identity());
            assert_eq!(guard.check(&state), GuardState::Public);
        }
        assert!(navigator.calls.borrow().is_empty());
    }

    #[test]
    fn a_new_unauthorized_visit_redirects_again() {
        let navigator = Rc::new(RecordingNavigator::default());
        let guard = RouteGuard::new(navigator.clone());
        let state = AppState::new(Route::Calendar);

        guard.check(&state);
        state.set_route(Route::Login);
        guard.check(&state);
        state.set_route(Route::Calendar);
        guard.check(&state);

        assert_eq!(navigator.replaced(), vec![Route::Login, Route::Login]);
    }
}
