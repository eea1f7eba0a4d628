//! Dashboard customization panel.

use super::context::use_layout;
use super::drag::DragState;
use contracts::shared::layout::dashboard::{
    delete, insert_custom_block, rename, reorder_blocks, toggle_visibility, update_config,
    update_width,
};
use contracts::shared::layout::{sort_by_order, BlockWidth, ButtonDraft, DashboardElement, NewDashboardBlock};
use leptos::ev::DragEvent;
use leptos::prelude::*;

fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

fn config_label(key: &str) -> &str {
    match key {
        "primaryColor" => "Primary color",
        "height" => "Height (px)",
        "highColor" => "High color",
        "mediumColor" => "Medium color",
        "lowColor" => "Low color",
        "customClasses" => "CSS classes",
        other => other,
    }
}

#[component]
fn WidthSelect(value: BlockWidth, on_change: Callback<BlockWidth>) -> impl IntoView {
    view! {
        <select on:change=move |ev| {
            if let Some(width) = BlockWidth::parse(&event_target_value(&ev)) {
                on_change.run(width);
            }
        }>
            {BlockWidth::all().into_iter().map(|w| view! {
                <option value=w.as_str() selected=w == value>{w.as_str()}</option>
            }).collect_view()}
        </select>
    }
}

#[component]
pub fn DashboardEditor(
    /// Called when the user closes the panel.
    on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_layout();
    let drag = DragState::new();

    let rows = move || {
        sort_by_order(&ctx.resolved_dashboard())
            .into_iter()
            .map(|block| view! { <BlockEditorRow block=block drag=drag /> })
            .collect_view()
    };

    let on_reset = move |_| {
        if confirm("Restore the default dashboard? Custom blocks will be removed.") {
            ctx.reset_dashboard();
        }
    };

    view! {
        <div class="layout-editor layout-editor--dashboard">
            <div class="layout-editor__header">
                <h2>"Customize dashboard"</h2>
                <button class="button button--ghost" on:click=move |_| on_close.run(())>"Close"</button>
            </div>
            <p class="layout-editor__hint">"Drag blocks to reorder. Built-in blocks can be hidden but not deleted."</p>
            <ul class="layout-editor__list">{rows}</ul>
            <AddBlockForm />
            <div class="layout-editor__footer">
                <button class="button button--secondary" on:click=on_reset>"Reset to defaults"</button>
            </div>
        </div>
    }
}

#[component]
fn BlockEditorRow(block: DashboardElement, drag: DragState) -> impl IntoView {
    let ctx = use_layout();
    let id = StoredValue::new(block.id.clone());

    let on_drop = move |ev: DragEvent| {
        let pair = id.with_value(|target| drag.drop_on(target, &ev));
        if let Some((source, target)) = pair {
            ctx.mutate_dashboard(|blocks| reorder_blocks(blocks, &source, &target));
        }
    };

    let on_rename = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        id.with_value(|id| ctx.mutate_dashboard(|blocks| rename(blocks, id, &value)));
    };

    let on_width = Callback::new(move |width: BlockWidth| {
        id.with_value(|id| ctx.mutate_dashboard(|blocks| update_width(blocks, id, width)));
    });

    let on_delete = move |_| {
        if confirm("Delete this custom block?") {
            id.with_value(|id| ctx.mutate_dashboard(|blocks| delete(blocks, id)));
        }
    };

    let config_fields = block
        .block_type
        .config_keys()
        .iter()
        .map(|&key| {
            let current = block.config_str(key).unwrap_or_default().to_string();
            view! {
                <label class="layout-editor__config">
                    {config_label(key)}
                    <input
                        type="text"
                        prop:value=current
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            id.with_value(|id| ctx.mutate_dashboard(|blocks| update_config(blocks, id, key, &value)));
                        }
                    />
                </label>
            }
        })
        .collect_view();

    view! {
        <li
            class="layout-editor__row layout-editor__row--block"
            class:layout-editor__row--dragging=move || id.with_value(|id| drag.is_source(id))
            class:layout-editor__row--over=move || id.with_value(|id| drag.is_over(id))
            draggable="true"
            on:dragstart=move |ev: DragEvent| id.with_value(|id| drag.start(id, &ev))
            on:dragover=move |ev: DragEvent| id.with_value(|id| drag.enter(id, &ev))
            on:drop=on_drop
            on:dragend=move |_| drag.cancel()
        >
            <span class="layout-editor__handle">"⠿"</span>
            <input
                type="checkbox"
                title="Visible"
                prop:checked=block.visible
                on:change=move |_| id.with_value(|id| ctx.mutate_dashboard(|blocks| toggle_visibility(blocks, id)))
            />
            <input class="layout-editor__name" type="text" prop:value=block.name.clone() on:change=on_rename />
            <span class="layout-editor__type">{block.block_type.display_name()}</span>
            <WidthSelect value=block.width on_change=on_width />
            <details class="layout-editor__settings">
                <summary>"Settings"</summary>
                {config_fields}
            </details>
            {block.is_custom.then(|| view! {
                <button class="button button--danger button--small" on:click=on_delete>"Delete"</button>
            })}
        </li>
    }
}

/// One editable button row of the add-block form.
#[derive(Clone, Copy)]
struct ButtonRow {
    key: usize,
    label: RwSignal<String>,
    icon: RwSignal<String>,
    link: RwSignal<String>,
}

impl ButtonRow {
    fn new(key: usize) -> Self {
        Self {
            key,
            label: RwSignal::new(String::new()),
            icon: RwSignal::new(String::new()),
            link: RwSignal::new(String::new()),
        }
    }

    fn draft(&self) -> ButtonDraft {
        ButtonDraft {
            label: self.label.get_untracked(),
            icon: self.icon.get_untracked(),
            link: self.link.get_untracked(),
        }
    }
}

#[component]
fn AddBlockForm() -> impl IntoView {
    let ctx = use_layout();

    let name = RwSignal::new(String::new());
    let width = RwSignal::new(BlockWidth::Full);
    let next_key = StoredValue::new(1usize);
    let rows = RwSignal::new(vec![ButtonRow::new(0)]);
    let error = RwSignal::new(None::<String>);

    let add_row = move |_| {
        let key = next_key.get_value();
        next_key.set_value(key + 1);
        rows.update(|rows| rows.push(ButtonRow::new(key)));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = NewDashboardBlock {
            name: name.get_untracked(),
            width: width.get_untracked(),
            buttons: rows.with_untracked(|rows| rows.iter().map(ButtonRow::draft).collect()),
        };
        match ctx.try_mutate_dashboard(|blocks| insert_custom_block(blocks, &draft)) {
            Ok(()) => {
                name.set(String::new());
                width.set(BlockWidth::Full);
                let key = next_key.get_value();
                next_key.set_value(key + 1);
                rows.set(vec![ButtonRow::new(key)]);
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <form class="layout-editor__form" on:submit=on_submit>
            <h3>"Add button block"</h3>
            <label>
                "Name"
                <input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Width"
                {move || view! { <WidthSelect value=width.get() on_change=Callback::new(move |w| width.set(w)) /> }}
            </label>
            <div class="layout-editor__buttons">
                <For
                    each=move || rows.get()
                    key=|row| row.key
                    children=move |row: ButtonRow| {
                        view! {
                            <div class="layout-editor__button-row">
                                <input
                                    type="text"
                                    placeholder="Label"
                                    prop:value=move || row.label.get()
                                    on:input=move |ev| row.label.set(event_target_value(&ev))
                                />
                                <input
                                    type="text"
                                    placeholder="Icon (optional)"
                                    prop:value=move || row.icon.get()
                                    on:input=move |ev| row.icon.set(event_target_value(&ev))
                                />
                                <input
                                    type="text"
                                    placeholder="Link"
                                    prop:value=move || row.link.get()
                                    on:input=move |ev| row.link.set(event_target_value(&ev))
                                />
                                <button
                                    type="button"
                                    class="button button--ghost button--small"
                                    on:click=move |_| rows.update(|rows| rows.retain(|r| r.key != row.key))
                                >
                                    "Remove"
                                </button>
                            </div>
                        }
                    }
                />
                <button type="button" class="button button--ghost" on:click=add_row>"Add button"</button>
            </div>
            {move || error.get().map(|msg| view! { <div class="layout-editor__error">{msg}</div> })}
            <button class="button button--primary" type="submit">"Add block"</button>
        </form>
    }
}
