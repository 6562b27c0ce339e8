// ============================================================================
// NOTIFICATIONS PANEL - Lista + acciones (leer, no leer, borrar)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::models::Notification;
use crate::state::ConnectionStatus;
use crate::views::forms::error_banner;
use crate::views::ViewContext;

pub fn render_notifications_panel(ctx: &ViewContext) -> Result<Element, JsValue> {
    let notifications = &ctx.state().notifications;

    let status = match notifications.get_connection() {
        ConnectionStatus::Connected => "Live",
        ConnectionStatus::Connecting => "Connecting...",
        ConnectionStatus::Disconnected => "Offline",
    };

    let mark_all = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .flag("disabled", notifications.unread_count() == 0)?
        .text("Mark all as read")
        .build();
    {
        let ctx = ctx.clone();
        on_click(&mark_all, move |_| {
            let ctx = ctx.clone();
            spawn_local(async move {
                let _ = ctx.vm.notifications.mark_all_read().await;
            });
        })?;
    }

    let mut panel = ElementBuilder::new("aside")?
        .class("notifications-panel")
        .child(
            ElementBuilder::new("div")?
                .class("panel-header")
                .child(ElementBuilder::new("h2")?.text("Notifications").build())?
                .child(ElementBuilder::new("span")?.class("connection-status").text(status).build())?
                .child(mark_all)?
                .build(),
        )?;

    if let Some(banner) = error_banner(notifications.get_error())? {
        panel = panel.child(banner)?;
    }

    let visible = notifications.visible();
    if notifications.get_loading() && visible.is_empty() {
        panel = panel.child(ElementBuilder::new("p")?.class("muted").text("Loading...").build())?;
    } else if visible.is_empty() {
        panel = panel.child(ElementBuilder::new("p")?.class("muted").text("You're all caught up").build())?;
    } else {
        let mut list = ElementBuilder::new("ul")?.class("notification-list");
        for notification in &visible {
            list = list.child(render_item(ctx, notification)?)?;
        }
        panel = panel.child(list.build())?;
    }

    Ok(panel.build())
}

fn render_item(ctx: &ViewContext, notification: &Notification) -> Result<Element, JsValue> {
    let toggle = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text(if notification.read { "Mark unread" } else { "Mark read" })
        .build();
    {
        let ctx = ctx.clone();
        let id = notification.id.clone();
        let read = notification.read;
        on_click(&toggle, move |_| {
            let ctx = ctx.clone();
            let id = id.clone();
            spawn_local(async move {
                let channel = &ctx.vm.notifications;
                let _ = if read { channel.mark_unread(&id).await } else { channel.mark_read(&id).await };
            });
        })?;
    }

    let delete = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-icon")
        .attr("aria-label", "Delete")?
        .text("✕")
        .build();
    {
        let ctx = ctx.clone();
        let id = notification.id.clone();
        on_click(&delete, move |_| {
            let ctx = ctx.clone();
            let id = id.clone();
            spawn_local(async move {
                let _ = ctx.vm.notifications.delete(&id).await;
            });
        })?;
    }

    let mut body = ElementBuilder::new("div")?
        .class("notification-body")
        .child(ElementBuilder::new("strong")?.text(&notification.title).build())?
        .child(ElementBuilder::new("p")?.text(&notification.message).build())?;
    if let Some(created_at) = &notification.created_at {
        body = body.child(ElementBuilder::new("time")?.text(created_at).build())?;
    }

    Ok(ElementBuilder::new("li")?
        .class("notification")
        .class_if("unread", !notification.read)?
        .attr("data-category", notification.category.label())?
        .child(body.build())?
        .child(toggle)?
        .child(delete)?
        .build())
}
