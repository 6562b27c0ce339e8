use wasm_bindgen::JsValue;

use crate::models::Route;
use crate::state::AppState;

/// Navegación entre rutas del cliente
pub trait Navigator {
    fn push(&self, route: Route);
    fn replace(&self, route: Route);
}

/// History API del navegador + ruta en el estado global
pub struct BrowserNavigator {
    state: AppState,
}

impl BrowserNavigator {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Path actual de `window.location`
    pub fn current_path() -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn write_history(&self, route: Route, replace: bool) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            log::warn!("⚠️ [NAV] History API no disponible");
            return;
        };
        let result = if replace {
            history.replace_state_with_url(&JsValue::NULL, "", Some(route.path()))
        } else {
            history.push_state_with_url(&JsValue::NULL, "", Some(route.path()))
        };
        if let Err(e) = result {
            log::error!("❌ [NAV] Error escribiendo history: {:?}", e);
        }
    }
}

impl Navigator for BrowserNavigator {
    fn push(&self, route: Route) {
        log::info!("🧭 [NAV] push {}", route.path());
        self.write_history(route, false);
        self.state.set_route(route);
    }

    fn replace(&self, route: Route) {
        log::info!("🧭 [NAV] replace {}", route.path());
        self.write_history(route, true);
        self.state.set_route(route);
    }
}
