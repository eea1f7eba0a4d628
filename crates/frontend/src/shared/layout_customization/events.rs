//! Process-wide "layout changed" signal carried by a DOM `CustomEvent` on
//! `window`. The event detail is the id of the store that committed, so a
//! store can ignore its own broadcasts.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CustomEvent, CustomEventInit};

pub fn dispatch_layout_changed(event_name: &str, origin: u64) {
    let Some(window) = window() else { return };
    let init = CustomEventInit::new();
    init.set_detail(&JsValue::from_f64(origin as f64));
    match CustomEvent::new_with_event_init_dict(event_name, &init) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(_) => log::debug!("Could not create '{}' event", event_name),
    }
}

/// Calls `on_change(origin)` for every broadcast. The listener lives as long
/// as the page.
pub fn listen_layout_changed(event_name: &str, on_change: impl Fn(u64) + 'static) {
    let Some(window) = window() else { return };
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let origin = event
            .dyn_ref::<CustomEvent>()
            .and_then(|e| e.detail().as_f64())
            .map(|v| v as u64)
            .unwrap_or(0);
        on_change(origin);
    }) as Box<dyn FnMut(_)>);

    let _ = window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
    closure.forget();
}
