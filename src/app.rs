// ============================================================================
// APP - Raíz montada en #app
// ============================================================================
// Re-render completo en cada cambio de estado. Los renders se agrupan: varios
// notify_changes seguidos producen un solo render en el siguiente tick.
// ============================================================================

use std::cell::Cell;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::viewmodels::GuardState;
use crate::views::{render_app, ViewContext};

pub struct App {
    ctx: ViewContext,
    root: Element,
    last_guard: Cell<Option<GuardState>>,
}

impl App {
    pub fn new(ctx: ViewContext) -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        Ok(Self {
            ctx,
            root,
            last_guard: Cell::new(None),
        })
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let guard = self.ctx.vm.guard();

        // Montaje del shell: solo en la transición hacia Authorized
        if guard == GuardState::Authorized && self.last_guard.get() != Some(GuardState::Authorized) {
            log::debug!("🧱 [APP] Dashboard montado");
            self.ctx.vm.mount_dashboard();
        }
        self.last_guard.set(Some(guard));

        let view = render_app(&self.ctx, guard)?;
        clear_children(&self.root);
        append_child(&self.root, &view)
    }
}
