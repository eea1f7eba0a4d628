//! Sidebar customization panel: drag to reorder, toggle, rename, add custom
//! links, delete them again, reset to defaults.

use super::context::use_layout;
use super::drag::DragState;
use contracts::shared::layout::sidebar::{
    delete, insert_custom, rename, reorder_submenu, reorder_top_level, toggle_visibility,
};
use contracts::shared::layout::{sort_by_order, NewSidebarItem, SidebarItem, SidebarSubmenuItem};
use leptos::ev::DragEvent;
use leptos::prelude::*;

fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

#[component]
pub fn SidebarEditor(
    /// Called when the user closes the panel.
    on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_layout();
    let top_drag = DragState::new();
    let child_drag = DragState::new();

    let rows = move || {
        sort_by_order(&ctx.resolved_sidebar())
            .into_iter()
            .map(|item| view! { <SidebarEditorRow item=item top_drag=top_drag child_drag=child_drag /> })
            .collect_view()
    };

    let on_reset = move |_| {
        if confirm("Restore the default sidebar? Custom links will be removed.") {
            ctx.reset_sidebar();
        }
    };

    view! {
        <div class="layout-editor">
            <div class="layout-editor__header">
                <h2>"Customize sidebar"</h2>
                <button class="button button--ghost" on:click=move |_| on_close.run(())>"Close"</button>
            </div>
            <p class="layout-editor__hint">
                "Drag rows to reorder. Submenu links can only move within their own group."
            </p>
            <ul class="layout-editor__list">{rows}</ul>
            <AddSidebarItemForm />
            <div class="layout-editor__footer">
                <button class="button button--secondary" on:click=on_reset>"Reset to defaults"</button>
            </div>
        </div>
    }
}

#[component]
fn SidebarEditorRow(item: SidebarItem, top_drag: DragState, child_drag: DragState) -> impl IntoView {
    let ctx = use_layout();
    let id = StoredValue::new(item.id.clone());
    let children = item.sorted_children();
    let parent_id = id;

    let on_drop = move |ev: DragEvent| {
        let pair = id.with_value(|target| top_drag.drop_on(target, &ev));
        if let Some((source, target)) = pair {
            ctx.mutate_sidebar(|items| reorder_top_level(items, &source, &target));
        }
    };

    view! {
        <li class="layout-editor__item">
            <div
                class="layout-editor__row"
                class:layout-editor__row--dragging=move || id.with_value(|id| top_drag.is_source(id))
                class:layout-editor__row--over=move || id.with_value(|id| top_drag.is_over(id))
                draggable="true"
                on:dragstart=move |ev: DragEvent| id.with_value(|id| top_drag.start(id, &ev))
                on:dragover=move |ev: DragEvent| id.with_value(|id| top_drag.enter(id, &ev))
                on:drop=on_drop
                on:dragend=move |_| top_drag.cancel()
            >
                <span class="layout-editor__handle">"⠿"</span>
                <EntryFields
                    id=id
                    name=item.name.clone()
                    href=item.href.clone()
                    visible=item.visible
                    is_custom=item.is_custom
                />
            </div>
            {(!children.is_empty()).then(|| view! {
                <ul class="layout-editor__children">
                    {children.into_iter().map(|child| view! {
                        <SubmenuEditorRow child=child parent_id=parent_id drag=child_drag />
                    }).collect_view()}
                </ul>
            })}
        </li>
    }
}

#[component]
fn SubmenuEditorRow(
    child: SidebarSubmenuItem,
    parent_id: StoredValue<String>,
    drag: DragState,
) -> impl IntoView {
    let ctx = use_layout();
    let id = StoredValue::new(child.id.clone());

    let on_drop = move |ev: DragEvent| {
        let pair = id.with_value(|target| drag.drop_on(target, &ev));
        if let Some((source, target)) = pair {
            let parent = parent_id.get_value();
            ctx.mutate_sidebar(|items| reorder_submenu(items, &parent, &source, &target));
        }
    };

    view! {
        <li
            class="layout-editor__row layout-editor__row--child"
            class:layout-editor__row--dragging=move || id.with_value(|id| drag.is_source(id))
            class:layout-editor__row--over=move || id.with_value(|id| drag.is_over(id))
            draggable="true"
            on:dragstart=move |ev: DragEvent| id.with_value(|id| drag.start(id, &ev))
            on:dragover=move |ev: DragEvent| id.with_value(|id| drag.enter(id, &ev))
            on:drop=on_drop
            on:dragend=move |_| drag.cancel()
        >
            <span class="layout-editor__handle">"⠿"</span>
            <EntryFields
                id=id
                name=child.name.clone()
                href=child.href.clone()
                visible=child.visible
                is_custom=child.is_custom
            />
        </li>
    }
}

/// Visibility, name and delete controls shared by both sidebar levels.
#[component]
fn EntryFields(
    id: StoredValue<String>,
    name: String,
    href: String,
    visible: bool,
    is_custom: bool,
) -> impl IntoView {
    let ctx = use_layout();

    let on_rename = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        id.with_value(|id| ctx.mutate_sidebar(|items| rename(items, id, &value)));
    };

    let on_delete = move |_| {
        if confirm("Delete this custom link?") {
            id.with_value(|id| ctx.mutate_sidebar(|items| delete(items, id)));
        }
    };

    view! {
        <input
            type="checkbox"
            title="Visible"
            prop:checked=visible
            on:change=move |_| id.with_value(|id| ctx.mutate_sidebar(|items| toggle_visibility(items, id)))
        />
        <input class="layout-editor__name" type="text" prop:value=name on:change=on_rename />
        <span class="layout-editor__href">{href}</span>
        {is_custom.then(|| view! {
            <button class="button button--danger button--small" on:click=on_delete>"Delete"</button>
        })}
    }
}

#[component]
fn AddSidebarItemForm() -> impl IntoView {
    let ctx = use_layout();

    let name = RwSignal::new(String::new());
    let href = RwSignal::new(String::new());
    let visible = RwSignal::new(true);
    let is_submenu = RwSignal::new(false);
    let parent_id = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let parents = move || {
        sort_by_order(&ctx.resolved_sidebar())
            .into_iter()
            .map(|item| view! { <option value=item.id.clone()>{item.name.clone()}</option> })
            .collect_view()
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = NewSidebarItem {
            name: name.get_untracked(),
            href: href.get_untracked(),
            visible: visible.get_untracked(),
            is_submenu: is_submenu.get_untracked(),
            parent_id: Some(parent_id.get_untracked()).filter(|p| !p.is_empty()),
        };
        match ctx.try_mutate_sidebar(|items| insert_custom(items, &draft)) {
            Ok(()) => {
                name.set(String::new());
                href.set(String::new());
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <form class="layout-editor__form" on:submit=on_submit>
            <h3>"Add custom link"</h3>
            <label>
                "Name"
                <input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Link"
                <input
                    type="text"
                    placeholder="/admin/... or https://..."
                    prop:value=move || href.get()
                    on:input=move |ev| href.set(event_target_value(&ev))
                />
            </label>
            <label class="layout-editor__check">
                <input
                    type="checkbox"
                    prop:checked=move || visible.get()
                    on:change=move |ev| visible.set(event_target_checked(&ev))
                />
                "Visible"
            </label>
            <label class="layout-editor__check">
                <input
                    type="checkbox"
                    prop:checked=move || is_submenu.get()
                    on:change=move |ev| is_submenu.set(event_target_checked(&ev))
                />
                "Add to a submenu"
            </label>
            <Show when=move || is_submenu.get()>
                <label>
                    "Parent"
                    <select
                        prop:value=move || parent_id.get()
                        on:change=move |ev| parent_id.set(event_target_value(&ev))
                    >
                        <option value="">"Select a parent"</option>
                        {parents}
                    </select>
                </label>
            </Show>
            {move || error.get().map(|msg| view! { <div class="layout-editor__error">{msg}</div> })}
            <button class="button button--primary" type="submit">"Add"</button>
        </form>
    }
}
