// ============================================================================
// CALENDAR PAGE - Tareas agrupadas por fecha de vencimiento
// ============================================================================

use std::collections::BTreeMap;

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::Task;
use crate::views::dashboard::list_placeholder;
use crate::views::{today, ViewContext};

/// Agrupa por día ascendente; las tareas sin fecha quedan fuera
pub fn group_by_due_day(tasks: &[Task]) -> BTreeMap<NaiveDate, Vec<Task>> {
    let mut days: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(day) = task.due_day() {
            days.entry(day).or_default().push(task.clone());
        }
    }
    days
}

pub fn render_calendar(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = ctx.state();
    let tasks = state.tasks.get_items();
    let days = group_by_due_day(&tasks);
    let today = today();

    let mut section = ElementBuilder::new("section")?.class("calendar");
    if let Some(placeholder) = list_placeholder(
        state.tasks.get_loading(),
        state.tasks.get_error(),
        days.is_empty(),
        "No scheduled tasks",
    )? {
        section = section.child(placeholder)?;
    }

    for (day, items) in &days {
        let mut list = ElementBuilder::new("ul")?;
        for task in items {
            list = list.child(
                ElementBuilder::new("li")?
                    .class_if("overdue", task.is_overdue(today))?
                    .text(&format!("{} · {}", task.title, task.status.label()))
                    .build(),
            )?;
        }
        section = section.child(
            ElementBuilder::new("div")?
                .class("calendar-day")
                .class_if("today", *day == today)?
                .child(ElementBuilder::new("h3")?.text(&day.format("%A %d %B %Y").to_string()).build())?
                .child(list.build())?
                .build(),
        )?;
    }

    Ok(section.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_ascending_and_skips_undated() {
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[
                {"_id":"a","title":"Late","dueDate":"2024-06-10T09:00:00.000Z"},
                {"_id":"b","title":"None"},
                {"_id":"c","title":"Early","dueDate":"2024-06-01"},
                {"_id":"d","title":"Same day","dueDate":"2024-06-10"}
            ]"#,
        )
        .unwrap();

        let days = group_by_due_day(&tasks);
        let keys: Vec<String> = days.keys().map(|d| d.to_string()).collect();
        assert_eq!(keys, vec!["2024-06-01", "2024-06-10"]);
        let titles: Vec<&str> = days.values().last().unwrap().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Late", "Same day"]);
    }
}
