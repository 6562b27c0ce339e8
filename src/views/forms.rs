// ============================================================================
// FORMS - Borradores de formularios + controles reutilizables
// ============================================================================
// Cada notify_changes re-renderiza la app entera; los valores tecleados viven
// aquí para que sobrevivan al re-render.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_change, on_input, ElementBuilder};

#[derive(Clone, Default)]
pub struct FormDrafts {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl FormDrafts {
    pub fn get(&self, key: &str) -> String {
        self.values.borrow().get(key).cloned().unwrap_or_default()
    }

    pub fn set(&self, key: &str, value: String) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }

    /// Valor recortado; None si está vacío
    pub fn optional(&self, key: &str) -> Option<String> {
        let value = self.get(key);
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Olvida todos los campos de un formulario (`"task."`, `"login."`...)
    pub fn clear_form(&self, prefix: &str) {
        self.values.borrow_mut().retain(|key, _| !key.starts_with(prefix));
    }
}

/// `<label>` + `<input>` enlazado a un borrador
pub fn text_field(drafts: &FormDrafts, key: &str, label: &str, input_type: &str) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .attr("type", input_type)?
        .attr("name", key)?
        .attr("value", &drafts.get(key))?
        .build();
    {
        let drafts = drafts.clone();
        let key = key.to_string();
        on_input(&input, move |value| drafts.set(&key, value))?;
    }

    Ok(ElementBuilder::new("label")?
        .class("form-group")
        .child(ElementBuilder::new("span")?.text(label).build())?
        .child(input)?
        .build())
}

/// `<select>` con opciones `(valor, etiqueta)`; el cambio llega como valor
pub fn select_field<F>(options: &[(String, String)], selected: &str, on_select: F) -> Result<Element, JsValue>
where
    F: Fn(String) + 'static,
{
    let mut builder = ElementBuilder::new("select")?;
    for (value, label) in options {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .flag("selected", value == selected)?
            .text(label)
            .build();
        builder = builder.child(option)?;
    }
    let select = builder.build();
    on_change(&select, move |e| on_select(crate::dom::event_value(&e)))?;
    Ok(select)
}

/// Mensaje de error inline
pub fn error_banner(message: Option<String>) -> Result<Option<Element>, JsValue> {
    match message {
        Some(message) => Ok(Some(
            ElementBuilder::new("div")?
                .class("error-banner")
                .attr("role", "alert")?
                .text(&message)
                .build(),
        )),
        None => Ok(None),
    }
}

pub fn submit_button(label: &str, busy: bool) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .flag("disabled", busy)?
        .text(if busy { "..." } else { label })
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drafts_survive_clones_and_clear_by_form() {
        let drafts = FormDrafts::default();
        let shared = drafts.clone();
        shared.set("task.title", "Write".into());
        shared.set("login.email", "a@b.c".into());

        assert_eq!(drafts.get("task.title"), "Write");
        drafts.clear_form("task.");
        assert_eq!(drafts.get("task.title"), "");
        assert_eq!(drafts.get("login.email"), "a@b.c");
    }

    #[test]
    fn optional_trims_blank_values() {
        let drafts = FormDrafts::default();
        drafts.set("task.due", "   ".into());
        assert_eq!(drafts.optional("task.due"), None);
        drafts.set("task.due", " 2024-05-01 ".into());
        assert_eq!(drafts.optional("task.due").as_deref(), Some("2024-05-01"));
    }
}
