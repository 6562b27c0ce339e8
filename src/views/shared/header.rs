// ============================================================================
// HEADER - Selector de workspace, campana y usuario
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::views::forms::select_field;
use crate::views::ViewContext;

pub fn render_header(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = ctx.state();
    let unread = state.notifications.unread_count();

    let bell = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-bell")
        .attr("aria-label", "Notifications")?
        .text(&if unread > 0 { format!("🔔 {}", unread) } else { "🔔".to_string() })
        .build();
    {
        let ctx = ctx.clone();
        on_click(&bell, move |_| ctx.vm.toggle_notifications())?;
    }

    let logout = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-logout")
        .text("Log out")
        .build();
    {
        let ctx = ctx.clone();
        on_click(&logout, move |_| {
            ctx.drafts.clear_form("");
            ctx.vm.logout();
        })?;
    }

    let user_name = state.session.get_user().map(|u| u.name).unwrap_or_default();

    Ok(ElementBuilder::new("header")?
        .class("app-header")
        .child(ElementBuilder::new("h1")?.class("brand").text("TaskFlux").build())?
        .child(render_workspace_selector(ctx)?)?
        .child(
            ElementBuilder::new("div")?
                .class("header-actions")
                .child(bell)?
                .child(ElementBuilder::new("span")?.class("user-name").text(&user_name).build())?
                .child(logout)?
                .build(),
        )?
        .build())
}

fn render_workspace_selector(ctx: &ViewContext) -> Result<Element, JsValue> {
    let workspaces = &ctx.state().workspaces;
    let container = ElementBuilder::new("div")?.class("workspace-selector");
    let items = workspaces.get_items();

    if items.is_empty() {
        if workspaces.get_loading() || !workspaces.has_initialized() {
            return Ok(container.text("Loading workspaces...").build());
        }
        if let Some(error) = workspaces.get_error() {
            let retry = ElementBuilder::new("button")?
                .attr("type", "button")?
                .class("btn-link")
                .text("Retry")
                .build();
            {
                let ctx = ctx.clone();
                on_click(&retry, move |_| ctx.vm.refresh_workspaces())?;
            }
            return Ok(container
                .child(ElementBuilder::new("span")?.class("error-text").text(&error).build())?
                .child(retry)?
                .build());
        }
        return Ok(container.text("No workspaces").build());
    }

    let options: Vec<(String, String)> = items
        .iter()
        .map(|w| (w.id.clone(), format!("{} ({})", w.name, w.kind.label())))
        .collect();
    let current = workspaces.current_id().unwrap_or_default();
    let select = {
        let ctx = ctx.clone();
        select_field(&options, &current, move |id| ctx.vm.select_workspace(&id))?
    };

    let refresh = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-icon")
        .attr("title", "Reload workspaces")?
        .text("⟳")
        .build();
    {
        let ctx = ctx.clone();
        on_click(&refresh, move |_| ctx.vm.refresh_workspaces())?;
    }

    Ok(container.child(select)?.child(refresh)?.build())
}
