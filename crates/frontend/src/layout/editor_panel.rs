//! Resizable right-hand drawer hosting the layout editors.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::layout_customization::{DashboardEditor, SidebarEditor};
use leptos::prelude::window_event_listener;
use leptos::prelude::*;

const DEFAULT_WIDTH: f64 = 420.0;
const MIN_WIDTH: f64 = 320.0;

#[component]
pub fn EditorPanel() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let is_open = move || ctx.sidebar_editor_open.get() || ctx.dashboard_editor_open.get();

    let width = RwSignal::new(DEFAULT_WIDTH);
    let is_resizing = RwSignal::new(false);
    let start_x = RwSignal::new(0.0f64);
    let start_width = RwSignal::new(DEFAULT_WIDTH);

    let on_resize_start = move |ev: leptos::ev::MouseEvent| {
        if !is_open() {
            return;
        }
        is_resizing.set(true);
        start_x.set(ev.client_x() as f64);
        start_width.set(width.get_untracked());
        ev.prevent_default();
    };

    let _ = window_event_listener(leptos::ev::mousemove, move |ev: leptos::ev::MouseEvent| {
        if !is_resizing.get_untracked() {
            return;
        }
        let window_width = window()
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(1280.0);
        // never cover more than 60% of the viewport
        let max_width = (window_width * 0.6).max(MIN_WIDTH);

        let dx = start_x.get_untracked() - ev.client_x() as f64;
        let new_width = (start_width.get_untracked() + dx).clamp(MIN_WIDTH, max_width);
        width.set(new_width);
    });

    let _ = window_event_listener(leptos::ev::mouseup, move |_ev: leptos::ev::MouseEvent| {
        if is_resizing.get_untracked() {
            is_resizing.set(false);
        }
    });

    Effect::new(move |_| {
        let resizing = is_resizing.get();
        if let Some(body) = window().document().and_then(|d| d.body()) {
            if resizing {
                let _ = body.style().set_property("cursor", "col-resize");
                let _ = body.style().set_property("user-select", "none");
            } else {
                let _ = body.style().set_property("cursor", "");
                let _ = body.style().set_property("user-select", "");
            }
        }
    });

    let on_close = Callback::new(move |_: ()| ctx.close_editors());

    view! {
        <div
            data-zone="right"
            class="editor-panel"
            class:editor-panel--hidden=move || !is_open()
            class:editor-panel--resizing=move || is_resizing.get()
            style:width=move || if is_open() { format!("{}px", width.get()) } else { "0px".to_string() }
        >
            <div class="editor-panel__resizer" on:mousedown=on_resize_start></div>
            <Show when=move || ctx.sidebar_editor_open.get()>
                <SidebarEditor on_close=on_close />
            </Show>
            <Show when=move || ctx.dashboard_editor_open.get()>
                <DashboardEditor on_close=on_close />
            </Show>
        </div>
    }
}
