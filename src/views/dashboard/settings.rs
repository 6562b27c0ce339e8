// ============================================================================
// SETTINGS PAGE - Perfil + preferencias de notificación
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{event_checked, on_change, on_click, ElementBuilder};
use crate::models::{ChannelPreference, NotificationCategory};
use crate::state::DesktopPermission;
use crate::views::ViewContext;

pub fn render_settings(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = ctx.state();
    let mut section = ElementBuilder::new("section")?.class("settings");

    if let Some(user) = state.session.get_user() {
        section = section.child(
            ElementBuilder::new("div")?
                .class("profile")
                .child(ElementBuilder::new("h3")?.text("Profile").build())?
                .child(ElementBuilder::new("p")?.text(&user.name).build())?
                .child(ElementBuilder::new("p")?.class("muted").text(&user.email).build())?
                .build(),
        )?;
    }

    Ok(section
        .child(render_desktop_permission(ctx)?)?
        .child(render_preferences(ctx)?)?
        .build())
}

fn render_desktop_permission(ctx: &ViewContext) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("desktop-permission")
        .child(ElementBuilder::new("h3")?.text("Desktop notifications").build())?;

    let status = match ctx.state().notifications.get_permission() {
        DesktopPermission::Granted => "Enabled",
        DesktopPermission::Denied => "Blocked in browser settings",
        DesktopPermission::Unsupported => "Not supported by this browser",
        DesktopPermission::Default => {
            // El permiso solo se pide desde este click
            let enable = ElementBuilder::new("button")?
                .attr("type", "button")?
                .class("btn-primary")
                .text("Enable desktop notifications")
                .build();
            let ctx = ctx.clone();
            on_click(&enable, move |_| ctx.vm.request_desktop_permission())?;
            return Ok(container.child(enable)?.build());
        }
    };

    Ok(container.child(ElementBuilder::new("p")?.class("muted").text(status).build())?.build())
}

#[derive(Clone, Copy)]
enum Channel {
    InApp,
    Desktop,
    Sound,
}

impl Channel {
    fn get(self, preference: &ChannelPreference) -> bool {
        match self {
            Channel::InApp => preference.in_app,
            Channel::Desktop => preference.desktop,
            Channel::Sound => preference.sound,
        }
    }

    fn set(self, preference: &mut ChannelPreference, enabled: bool) {
        match self {
            Channel::InApp => preference.in_app = enabled,
            Channel::Desktop => preference.desktop = enabled,
            Channel::Sound => preference.sound = enabled,
        }
    }
}

fn render_preferences(ctx: &ViewContext) -> Result<Element, JsValue> {
    let preferences = ctx.state().notifications.get_preferences();
    let channels = [(Channel::InApp, "In app"), (Channel::Desktop, "Desktop"), (Channel::Sound, "Sound")];

    let mut head = ElementBuilder::new("tr")?.child(ElementBuilder::new("th")?.text("Category").build())?;
    for (_, label) in channels {
        head = head.child(ElementBuilder::new("th")?.text(label).build())?;
    }
    let mut table = ElementBuilder::new("table")?
        .class("preferences")
        .child(ElementBuilder::new("thead")?.child(head.build())?.build())?;

    let mut body = ElementBuilder::new("tbody")?;
    for category in NotificationCategory::ALL {
        let current = preferences.for_category(category);
        let mut row = ElementBuilder::new("tr")?.child(ElementBuilder::new("td")?.text(category.label()).build())?;
        for (channel, label) in channels {
            let checkbox = ElementBuilder::new("input")?
                .attr("type", "checkbox")?
                .attr("aria-label", &format!("{} {}", category.label(), label))?
                .flag("checked", channel.get(&current))?
                .build();
            let ctx = ctx.clone();
            on_change(&checkbox, move |e| {
                let mut updated = ctx.state().notifications.get_preferences();
                let mut preference = updated.for_category(category);
                channel.set(&mut preference, event_checked(&e));
                updated.set(category, preference);
                let ctx = ctx.clone();
                spawn_local(async move {
                    let _ = ctx.vm.notifications.save_preferences(updated).await;
                });
            })?;
            row = row.child(ElementBuilder::new("td")?.child(checkbox)?.build())?;
        }
        body = body.child(row.build())?;
    }
    table = table.child(body.build())?;

    Ok(ElementBuilder::new("div")?
        .class("notification-preferences")
        .child(ElementBuilder::new("h3")?.text("Notification preferences").build())?
        .child(table.build())?
        .build())
}
