mod app;
mod commands;
mod hosted;
mod interaction;
mod panels;

use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let target = document
        .get_element_by_id("evsite-app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    if let Some(target) = target {
        leptos::mount::mount_to(target, app::App).forget();
    }
}
