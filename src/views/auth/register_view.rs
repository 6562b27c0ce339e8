// ============================================================================
// REGISTER VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_click, on_submit, ElementBuilder};
use crate::models::Route;
use crate::views::forms::{error_banner, submit_button, text_field};
use crate::views::ViewContext;

pub fn render_register(ctx: &ViewContext) -> Result<Element, JsValue> {
    let session = &ctx.state().session;
    let busy = session.get_loading();

    let mut form = ElementBuilder::new("form")?
        .class("auth-form")
        .child(text_field(&ctx.drafts, "register.name", "Name", "text")?)?
        .child(text_field(&ctx.drafts, "register.email", "Email", "email")?)?
        .child(text_field(&ctx.drafts, "register.password", "Password", "password")?)?;
    if let Some(banner) = error_banner(session.get_error())? {
        form = form.child(banner)?;
    }
    let form = form.child(submit_button("Create account", busy)?)?.build();

    {
        let ctx = ctx.clone();
        on_submit(&form, move || {
            if ctx.state().session.get_loading() {
                return;
            }
            let name = ctx.drafts.get("register.name");
            let email = ctx.drafts.get("register.email");
            let password = ctx.drafts.get("register.password");
            let ctx = ctx.clone();
            spawn_local(async move {
                if ctx.vm.register(name, email, password).await.is_ok() {
                    ctx.drafts.clear_form("register.");
                }
            });
        })?;
    }

    let to_login = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text("Already have an account? Sign in")
        .build();
    {
        let ctx = ctx.clone();
        on_click(&to_login, move |_| {
            ctx.state().session.set_error(None);
            ctx.vm.navigate(Route::Login);
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("auth-screen")
        .child(
            ElementBuilder::new("div")?
                .class("auth-card")
                .child(ElementBuilder::new("h1")?.text("Join TaskFlux").build())?
                .child(form)?
                .child(to_login)?
                .build(),
        )?
        .build())
}
