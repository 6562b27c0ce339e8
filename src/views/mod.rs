// ============================================================================
// VIEWS - Funciones que construyen DOM a partir del estado (sin lógica)
// ============================================================================

use std::rc::Rc;

use crate::state::AppState;
use crate::viewmodels::AppViewModel;

pub mod forms;
pub mod app;
pub mod loading;
pub mod auth;
pub mod shared;
pub mod dashboard;

pub use app::render_app;
pub use forms::FormDrafts;

/// Lo que recibe cada vista: el viewmodel raíz y los borradores de formularios
#[derive(Clone)]
pub struct ViewContext {
    pub vm: Rc<AppViewModel>,
    pub drafts: FormDrafts,
}

impl ViewContext {
    pub fn state(&self) -> &AppState {
        self.vm.state()
    }
}

/// Fecha local de hoy (el reloj de chrono no está disponible en wasm32 sin JS)
pub fn today() -> chrono::NaiveDate {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}
