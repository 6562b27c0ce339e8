use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::models::Route;
use crate::views::ViewContext;

/// Navegación lateral del dashboard
pub fn render_sidebar(ctx: &ViewContext) -> Result<Element, JsValue> {
    let current = ctx.state().current_route();
    let mut nav = ElementBuilder::new("nav")?.class("sidebar");

    for route in Route::DASHBOARD_NAV {
        let link = ElementBuilder::new("a")?
            .attr("href", route.path())?
            .class("nav-link")
            .class_if("active", route == current)?
            .text(route.title())
            .build();
        let ctx = ctx.clone();
        on_click(&link, move |e| {
            // Navegación en cliente, sin recargar la página
            e.prevent_default();
            ctx.vm.navigate(route);
        })?;
        nav = nav.child(link)?;
    }

    Ok(nav.build())
}
