// ============================================================================
// DASHBOARD SHELL - Header + navegación + página de la ruta actual
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::Route;
use crate::views::shared::{render_header, render_notifications_panel, render_sidebar};
use crate::views::ViewContext;

pub mod overview;
pub mod tasks;
pub mod projects;
pub mod calendar;
pub mod team;
pub mod settings;

pub fn render_dashboard_shell(ctx: &ViewContext) -> Result<Element, JsValue> {
    let route = ctx.state().current_route();

    let page = match route {
        Route::Tasks => tasks::render_tasks(ctx)?,
        Route::Projects => projects::render_projects(ctx)?,
        Route::Calendar => calendar::render_calendar(ctx)?,
        Route::Team => team::render_team(ctx)?,
        Route::Settings => settings::render_settings(ctx)?,
        _ => overview::render_overview(ctx)?,
    };

    let main = ElementBuilder::new("main")?
        .class("page")
        .child(ElementBuilder::new("h2")?.class("page-title").text(route.title()).build())?
        .child(page)?
        .build();

    let mut body = ElementBuilder::new("div")?
        .class("dashboard-body")
        .child(render_sidebar(ctx)?)?
        .child(main)?;
    if ctx.state().notifications_panel_open() {
        body = body.child(render_notifications_panel(ctx)?)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("dashboard")
        .child(render_header(ctx)?)?
        .child(body.build())?
        .build())
}

/// Estado común de una lista: cargando / error / vacía
pub(crate) fn list_placeholder(
    loading: bool,
    error: Option<String>,
    empty: bool,
    empty_text: &str,
) -> Result<Option<Element>, JsValue> {
    if let Some(error) = error {
        return crate::views::forms::error_banner(Some(error));
    }
    let text = if loading && empty {
        "Loading..."
    } else if empty {
        empty_text
    } else {
        return Ok(None);
    };
    Ok(Some(ElementBuilder::new("p")?.class("muted").text(text).build()))
}
