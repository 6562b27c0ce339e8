// ============================================================================
// APP VIEW - Raíz: decide qué se pinta según el guard
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{set_document_title, ElementBuilder};
use crate::models::Route;
use crate::viewmodels::GuardState;
use crate::views::auth::{render_login, render_register};
use crate::views::dashboard::render_dashboard_shell;
use crate::views::loading::render_loading;
use crate::views::ViewContext;

pub fn render_app(ctx: &ViewContext, guard: GuardState) -> Result<Element, JsValue> {
    let route = ctx.state().current_route();
    set_document_title(&format!("{} · TaskFlux", route.title()));

    match guard {
        GuardState::Indeterminate => render_loading("Loading your session..."),
        // La redirección a /login ya está en curso: no se pinta nada protegido
        GuardState::Unauthorized => Ok(ElementBuilder::new("div")?.class("redirecting").build()),
        GuardState::Public => match route {
            Route::Register => render_register(ctx),
            _ => render_login(ctx),
        },
        GuardState::Authorized => render_dashboard_shell(ctx),
    }
}
