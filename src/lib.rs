// ============================================================================
// TASKFLUX WEB - FRONTEND MVVM (RUST PURO + WASM)
// ============================================================================
// - Views: funciones que construyen DOM (sin lógica)
// - ViewModels: orquestación y efectos async
// - Services: comunicación con el backend (HTTP + WebSocket)
// - State: stores con Rc<RefCell> y setters controlados
// - Models: estructuras compartidas con el backend
// ============================================================================

pub mod config;
pub mod models;
pub mod state;
pub mod services;
pub mod viewmodels;
pub mod views;
pub mod dom;
pub mod utils;
pub mod app;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::app::App;
use crate::config::CONFIG;
use crate::models::Route;
use crate::services::{BrowserPresenter, BrowserSocketConnector, GlooTransport};
use crate::state::AppState;
use crate::utils::{BrowserNavigator, LocalStore, Navigator};
use crate::viewmodels::{AppServices, AppViewModel};
use crate::views::{FormDrafts, ViewContext};

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static RENDER_PENDING: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 TaskFlux - Rust Puro + MVVM (API {})", CONFIG.backend_url());

    let path = BrowserNavigator::current_path();
    let route = Route::from_path(&path);
    let state = AppState::new(route);
    let navigator = Rc::new(BrowserNavigator::new(state.clone()));
    if route.path() != path {
        // `/` y rutas desconocidas: la barra de direcciones refleja el fallback
        navigator.replace(route);
    }

    let services = AppServices {
        transport: Rc::new(GlooTransport),
        storage: Rc::new(LocalStore),
        navigator,
        connector: Rc::new(BrowserSocketConnector),
        presenter: Rc::new(BrowserPresenter),
        spawner: Rc::new(|future: LocalBoxFuture<'static, ()>| spawn_local(future)),
    };
    let vm = AppViewModel::new(&CONFIG, state.clone(), services);

    let app = App::new(ViewContext {
        vm: vm.clone(),
        drafts: FormDrafts::default(),
    })?;
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    state.subscribe_to_changes(schedule_render);

    // Back/forward: una sola vez al arrancar
    if let Some(win) = web_sys::window() {
        let vm = vm.clone();
        let closure = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_e: web_sys::PopStateEvent| {
            vm.location_changed(&BrowserNavigator::current_path());
        });
        win.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    vm.start();
    rerender_app();
    Ok(())
}

/// Agrupa los cambios del mismo tick en un único render
fn schedule_render() {
    if RENDER_PENDING.with(|pending| pending.replace(true)) {
        return;
    }
    Timeout::new(0, || {
        RENDER_PENDING.with(|pending| pending.set(false));
        rerender_app();
    })
    .forget();
}

pub fn rerender_app() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow().as_ref() {
            if let Err(e) = app.render() {
                log::error!("❌ [RENDER] {:?}", e);
            }
        } else {
            log::warn!("⚠️ [RENDER] App no está inicializada");
        }
    });
}
