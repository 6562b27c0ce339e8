// ============================================================================
// PROJECTS PAGE - Alta + lista con cambio de estado
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_click, on_submit, ElementBuilder};
use crate::models::{Project, ProjectDraft, ProjectStatus};
use crate::views::dashboard::list_placeholder;
use crate::views::forms::{error_banner, select_field, submit_button, text_field};
use crate::views::ViewContext;

fn status_options() -> Vec<(String, String)> {
    ProjectStatus::ALL
        .iter()
        .map(|s| (s.key().to_string(), s.label().to_string()))
        .collect()
}

pub fn render_projects(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = ctx.state();
    let projects = state.projects.get_items();

    let reload = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text("Reload")
        .build();
    {
        let ctx = ctx.clone();
        on_click(&reload, move |_| ctx.vm.reload_projects())?;
    }

    let mut section = ElementBuilder::new("section")?
        .class("projects")
        .child(render_project_form(ctx)?)?
        .child(reload)?;

    if let Some(placeholder) = list_placeholder(
        state.projects.get_loading(),
        state.projects.get_error(),
        projects.is_empty(),
        "No projects yet",
    )? {
        section = section.child(placeholder)?;
    }
    if !projects.is_empty() {
        let mut grid = ElementBuilder::new("div")?.class("project-grid");
        for project in &projects {
            grid = grid.child(render_project_card(ctx, project)?)?;
        }
        section = section.child(grid.build())?;
    }

    Ok(section.build())
}

fn render_project_form(ctx: &ViewContext) -> Result<Element, JsValue> {
    let drafts = &ctx.drafts;
    let current = ProjectStatus::from_key(&drafts.get("project.status")).unwrap_or_default();
    let status_select = {
        let drafts = drafts.clone();
        select_field(&status_options(), current.key(), move |v| drafts.set("project.status", v))?
    };

    let mut form = ElementBuilder::new("form")?
        .class("inline-form")
        .child(text_field(drafts, "project.name", "Name", "text")?)?
        .child(text_field(drafts, "project.description", "Description", "text")?)?
        .child(text_field(drafts, "project.start", "Start", "date")?)?
        .child(text_field(drafts, "project.end", "End", "date")?)?
        .child(status_select)?;
    if let Some(banner) = error_banner(drafts.optional("project.error"))? {
        form = form.child(banner)?;
    }
    let form = form.child(submit_button("Add project", false)?)?.build();

    {
        let ctx = ctx.clone();
        on_submit(&form, move || {
            let drafts = &ctx.drafts;
            let draft = ProjectDraft {
                name: drafts.get("project.name").trim().to_string(),
                description: drafts.optional("project.description"),
                status: ProjectStatus::from_key(&drafts.get("project.status")).unwrap_or_default(),
                start_date: drafts.optional("project.start"),
                end_date: drafts.optional("project.end"),
            };
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.vm.projects.create(draft).await {
                    Ok(_) => ctx.drafts.clear_form("project."),
                    Err(message) => ctx.drafts.set("project.error", message),
                }
                ctx.state().notify_changes();
            });
        })?;
    }

    Ok(form)
}

fn render_project_card(ctx: &ViewContext, project: &Project) -> Result<Element, JsValue> {
    let status_select = {
        let ctx = ctx.clone();
        let project = project.clone();
        select_field(&status_options(), project.status.key(), move |value| {
            let Some(status) = ProjectStatus::from_key(&value) else {
                return;
            };
            let draft = ProjectDraft {
                name: project.name.clone(),
                description: project.description.clone(),
                status,
                start_date: project.start_date.clone(),
                end_date: project.end_date.clone(),
            };
            let ctx = ctx.clone();
            let id = project.id.clone();
            spawn_local(async move {
                if let Err(message) = ctx.vm.projects.update(&id, draft).await {
                    ctx.state().projects.set_error(Some(message));
                    ctx.state().notify_changes();
                }
            });
        })?
    };

    let mut card = ElementBuilder::new("article")?
        .class("project-card")
        .child(ElementBuilder::new("h3")?.text(&project.name).build())?;
    if let Some(description) = &project.description {
        card = card.child(ElementBuilder::new("p")?.text(description).build())?;
    }
    let dates = match (&project.start_date, &project.end_date) {
        (Some(start), Some(end)) => Some(format!("{} → {}", short_date(start), short_date(end))),
        (Some(start), None) => Some(format!("From {}", short_date(start))),
        (None, Some(end)) => Some(format!("Until {}", short_date(end))),
        (None, None) => None,
    };
    if let Some(dates) = dates {
        card = card.child(ElementBuilder::new("p")?.class("muted").text(&dates).build())?;
    }

    Ok(card.child(status_select)?.build())
}

/// `2024-05-01T00:00:00.000Z` → `2024-05-01`
fn short_date(value: &str) -> &str {
    value.get(..10).unwrap_or(value)
}
