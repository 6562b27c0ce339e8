// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_click, on_submit, ElementBuilder};
use crate::models::Route;
use crate::views::forms::{error_banner, submit_button, text_field};
use crate::views::ViewContext;

pub fn render_login(ctx: &ViewContext) -> Result<Element, JsValue> {
    let session = &ctx.state().session;
    let busy = session.get_loading();

    let mut form = ElementBuilder::new("form")?
        .class("auth-form")
        .child(text_field(&ctx.drafts, "login.email", "Email", "email")?)?
        .child(text_field(&ctx.drafts, "login.password", "Password", "password")?)?;
    if let Some(banner) = error_banner(session.get_error())? {
        form = form.child(banner)?;
    }
    let form = form.child(submit_button("Sign in", busy)?)?.build();

    {
        let ctx = ctx.clone();
        on_submit(&form, move || {
            if ctx.state().session.get_loading() {
                return;
            }
            let email = ctx.drafts.get("login.email");
            let password = ctx.drafts.get("login.password");
            let ctx = ctx.clone();
            spawn_local(async move {
                if ctx.vm.login(email, password).await.is_ok() {
                    ctx.drafts.clear_form("login.");
                }
            });
        })?;
    }

    let to_register = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text("Create an account")
        .build();
    {
        let ctx = ctx.clone();
        on_click(&to_register, move |_| {
            ctx.state().session.set_error(None);
            ctx.vm.navigate(Route::Register);
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("auth-screen")
        .child(
            ElementBuilder::new("div")?
                .class("auth-card")
                .child(ElementBuilder::new("h1")?.text("TaskFlux").build())?
                .child(ElementBuilder::new("p")?.class("auth-subtitle").text("Sign in to your workspace").build())?
                .child(form)?
                .child(to_register)?
                .build(),
        )?
        .build())
}
