use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::TaskStatus;
use crate::views::{today, ViewContext};

/// Resumen del workspace activo
pub fn render_overview(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = ctx.state();
    let tasks = state.tasks.get_items();
    let today = today();

    let mut cards = ElementBuilder::new("div")?.class("stat-grid");
    for status in TaskStatus::ALL {
        let count = tasks.iter().filter(|t| t.status == status).count();
        cards = cards.child(stat_card(status.label(), count)?)?;
    }
    let overdue = tasks.iter().filter(|t| t.is_overdue(today)).count();
    cards = cards
        .child(stat_card("Overdue", overdue)?)?
        .child(stat_card("Projects", state.projects.get_items().len())?)?;

    let greeting = state
        .session
        .get_user()
        .map(|u| format!("Welcome back, {}", u.name))
        .unwrap_or_else(|| "Welcome".to_string());
    let workspace = state
        .workspaces
        .get_current()
        .map(|w| w.name)
        .unwrap_or_else(|| "No workspace selected".to_string());

    Ok(ElementBuilder::new("section")?
        .class("overview")
        .child(ElementBuilder::new("p")?.class("greeting").text(&greeting).build())?
        .child(ElementBuilder::new("p")?.class("muted").text(&workspace).build())?
        .child(cards.build())?
        .build())
}

fn stat_card(label: &str, value: usize) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("stat-card")
        .child(ElementBuilder::new("span")?.class("stat-value").text(&value.to_string()).build())?
        .child(ElementBuilder::new("span")?.class("stat-label").text(label).build())?
        .build())
}
