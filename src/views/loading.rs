use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;

/// Vista bloqueante mientras la sesión es indeterminada
pub fn render_loading(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("loading-screen")
        .attr("aria-busy", "true")?
        .child(ElementBuilder::new("div")?.class("spinner").build())?
        .child(ElementBuilder::new("p")?.text(message).build())?
        .build())
}
