// ============================================================================
// TASKS PAGE - Alta + lista con cambio de estado
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_click, on_submit, ElementBuilder};
use crate::models::{Project, Task, TaskDraft, TaskPriority, TaskStatus};
use crate::views::dashboard::list_placeholder;
use crate::views::forms::{error_banner, select_field, submit_button, text_field};
use crate::views::{today, ViewContext};

pub fn render_tasks(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = ctx.state();
    let tasks = state.tasks.get_items();
    let projects = state.projects.get_items();

    let reload = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text("Reload")
        .build();
    {
        let ctx = ctx.clone();
        on_click(&reload, move |_| ctx.vm.reload_tasks())?;
    }

    let mut section = ElementBuilder::new("section")?
        .class("tasks")
        .child(render_task_form(ctx, &projects)?)?
        .child(reload)?;

    if let Some(placeholder) = list_placeholder(state.tasks.get_loading(), state.tasks.get_error(), tasks.is_empty(), "No tasks yet")? {
        section = section.child(placeholder)?;
    }
    if !tasks.is_empty() {
        let today = today();
        let mut list = ElementBuilder::new("ul")?.class("task-list");
        for task in &tasks {
            list = list.child(render_task_row(ctx, task, &projects, today)?)?;
        }
        section = section.child(list.build())?;
    }

    Ok(section.build())
}

fn draft_from_form(ctx: &ViewContext) -> TaskDraft {
    let drafts = &ctx.drafts;
    TaskDraft {
        title: drafts.get("task.title").trim().to_string(),
        description: drafts.optional("task.description"),
        status: TaskStatus::from_key(&drafts.get("task.status")).unwrap_or_default(),
        priority: TaskPriority::from_key(&drafts.get("task.priority")).unwrap_or_default(),
        project_id: drafts.optional("task.project"),
        assignee_id: None,
        due_date: drafts.optional("task.due"),
    }
}

fn render_task_form(ctx: &ViewContext, projects: &[Project]) -> Result<Element, JsValue> {
    let drafts = &ctx.drafts;

    let statuses: Vec<(String, String)> = TaskStatus::ALL
        .iter()
        .map(|s| (s.key().to_string(), s.label().to_string()))
        .collect();
    let priorities: Vec<(String, String)> = TaskPriority::ALL
        .iter()
        .map(|p| (p.key().to_string(), p.label().to_string()))
        .collect();
    let mut project_options = vec![(String::new(), "No project".to_string())];
    project_options.extend(projects.iter().map(|p| (p.id.clone(), p.name.clone())));

    let current_status = TaskStatus::from_key(&drafts.get("task.status")).unwrap_or_default();
    let current_priority = TaskPriority::from_key(&drafts.get("task.priority")).unwrap_or_default();

    let status_select = {
        let drafts = drafts.clone();
        select_field(&statuses, current_status.key(), move |v| drafts.set("task.status", v))?
    };
    let priority_select = {
        let drafts = drafts.clone();
        select_field(&priorities, current_priority.key(), move |v| drafts.set("task.priority", v))?
    };
    let project_select = {
        let drafts = drafts.clone();
        select_field(&project_options, &drafts.get("task.project"), move |v| drafts.set("task.project", v))?
    };

    let mut form = ElementBuilder::new("form")?
        .class("inline-form")
        .child(text_field(drafts, "task.title", "Title", "text")?)?
        .child(text_field(drafts, "task.description", "Description", "text")?)?
        .child(text_field(drafts, "task.due", "Due date", "date")?)?
        .child(status_select)?
        .child(priority_select)?
        .child(project_select)?;
    if let Some(banner) = error_banner(drafts.optional("task.error"))? {
        form = form.child(banner)?;
    }
    let form = form.child(submit_button("Add task", false)?)?.build();

    {
        let ctx = ctx.clone();
        on_submit(&form, move || {
            let draft = draft_from_form(&ctx);
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.vm.tasks.create(draft).await {
                    Ok(_) => ctx.drafts.clear_form("task."),
                    Err(message) => ctx.drafts.set("task.error", message),
                }
                ctx.state().notify_changes();
            });
        })?;
    }

    Ok(form)
}

fn render_task_row(ctx: &ViewContext, task: &Task, projects: &[Project], today: chrono::NaiveDate) -> Result<Element, JsValue> {
    let statuses: Vec<(String, String)> = TaskStatus::ALL
        .iter()
        .map(|s| (s.key().to_string(), s.label().to_string()))
        .collect();
    let status_select = {
        let ctx = ctx.clone();
        let task = task.clone();
        select_field(&statuses, task.status.key(), move |value| {
            let Some(status) = TaskStatus::from_key(&value) else {
                return;
            };
            let mut draft = TaskDraft::from(&task);
            draft.status = status;
            let ctx = ctx.clone();
            let id = task.id.clone();
            spawn_local(async move {
                if let Err(message) = ctx.vm.tasks.update(&id, draft).await {
                    ctx.state().tasks.set_error(Some(message));
                    ctx.state().notify_changes();
                }
            });
        })?
    };

    let project_name = task
        .project_id
        .as_ref()
        .and_then(|id| projects.iter().find(|p| &p.id == id))
        .map(|p| p.name.clone());

    let mut meta = ElementBuilder::new("div")?
        .class("task-meta")
        .child(
            ElementBuilder::new("span")?
                .class(&format!("priority priority-{}", task.priority.key()))
                .text(task.priority.label())
                .build(),
        )?;
    if let Some(name) = project_name {
        meta = meta.child(ElementBuilder::new("span")?.class("project-tag").text(&name).build())?;
    }
    if let Some(due) = task.due_day() {
        meta = meta.child(
            ElementBuilder::new("time")?
                .class_if("overdue", task.is_overdue(today))?
                .text(&due.format("%Y-%m-%d").to_string())
                .build(),
        )?;
    }

    Ok(ElementBuilder::new("li")?
        .class("task")
        .class_if("done", task.status == TaskStatus::Done)?
        .child(ElementBuilder::new("span")?.class("task-title").text(&task.title).build())?
        .child(meta.build())?
        .child(status_select)?
        .build())
}
