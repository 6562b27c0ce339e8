use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::views::ViewContext;

/// Workspace activo y rol del usuario en él
pub fn render_team(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = ctx.state();
    let section = ElementBuilder::new("section")?.class("team");

    let Some(workspace) = state.workspaces.get_current() else {
        return Ok(section
            .child(ElementBuilder::new("p")?.class("muted").text("Select a workspace to see its team").build())?
            .build());
    };

    let mut details = ElementBuilder::new("dl")?
        .child(ElementBuilder::new("dt")?.text("Workspace").build())?
        .child(ElementBuilder::new("dd")?.text(&workspace.name).build())?
        .child(ElementBuilder::new("dt")?.text("Type").build())?
        .child(ElementBuilder::new("dd")?.text(workspace.kind.label()).build())?
        .child(ElementBuilder::new("dt")?.text("Your role").build())?
        .child(ElementBuilder::new("dd")?.text(&workspace.role).build())?;
    if let Some(user) = state.session.get_user() {
        details = details
            .child(ElementBuilder::new("dt")?.text("Signed in as").build())?
            .child(ElementBuilder::new("dd")?.text(&format!("{} <{}>", user.name, user.email)).build())?;
    }

    Ok(section.child(details.build())?.build())
}
