//! Rendering of a single dashboard block.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::layout_customization::use_layout;
use contracts::shared::layout::{BlockType, DashboardButton, DashboardElement};
use leptos::prelude::*;

const DEFAULT_CHART_HEIGHT: u32 = 240;

/// CSS classes for a block: type, width modifier, then user classes.
pub(super) fn block_class(block: &DashboardElement) -> String {
    let mut class = format!(
        "dashboard-block dashboard-block--{} dashboard-block--{}",
        block.block_type.as_str(),
        block.width.css_modifier()
    );
    if let Some(extra) = block.config_str("customClasses").map(str::trim).filter(|c| !c.is_empty()) {
        class.push(' ');
        class.push_str(extra);
    }
    class
}

/// Chart height from config, falling back to the default on bad input.
pub(super) fn chart_height(block: &DashboardElement) -> u32 {
    block
        .config_str("height")
        .and_then(|h| h.trim().trim_end_matches("px").parse::<u32>().ok())
        .filter(|h| *h > 0)
        .unwrap_or(DEFAULT_CHART_HEIGHT)
}

#[component]
pub fn DashboardBlock(block: DashboardElement) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let layout = use_layout();
    let period_label = move || layout.time_period.get().label();

    let body = match block.block_type {
        BlockType::Stat => view! {
            <div class="dashboard-block__value">"—"</div>
            <div class="dashboard-block__caption">{period_label}</div>
        }
        .into_any(),
        BlockType::Chart => {
            let color = block.config_str("primaryColor").unwrap_or("currentColor").to_string();
            view! {
                <div class="dashboard-block__chart" style:height=format!("{}px", chart_height(&block))>
                    <svg viewBox="0 0 100 40" preserveAspectRatio="none" width="100%" height="100%">
                        <polyline fill="none" stroke=color stroke-width="1.5" points="0,32 20,26 40,28 60,18 80,20 100,8" />
                    </svg>
                </div>
            }
            .into_any()
        }
        BlockType::Gauge => {
            let bands = [("highColor", "High"), ("mediumColor", "Medium"), ("lowColor", "Low")]
                .into_iter()
                .map(|(key, label)| {
                    let color = block.config_str(key).unwrap_or("#9ca3af").to_string();
                    view! {
                        <span class="dashboard-block__band" style:background-color=color>{label}</span>
                    }
                })
                .collect_view();
            view! { <div class="dashboard-block__gauge">{bands}</div> }.into_any()
        }
        BlockType::Table | BlockType::Widget => view! {
            <div class="dashboard-block__empty">{move || format!("No data for {}", period_label().to_lowercase())}</div>
        }
        .into_any(),
        BlockType::Custom => {
            let buttons = block.buttons.clone();
            view! { <ButtonGroup buttons=buttons /> }.into_any()
        }
    };

    let link = block.link.clone().map(StoredValue::new);

    view! {
        <section class=block_class(&block) data-block-id=block.id.clone()>
            <header class="dashboard-block__header">
                <h3>{block.name.clone()}</h3>
                {link.map(|link| view! {
                    <button class="dashboard-block__more" on:click=move |_| link.with_value(|l| ctx.navigate(l))>
                        "View all"
                    </button>
                })}
            </header>
            {block.description.clone().map(|d| view! { <p class="dashboard-block__description">{d}</p> })}
            <div class="dashboard-block__body">{body}</div>
        </section>
    }
}

#[component]
fn ButtonGroup(buttons: Vec<DashboardButton>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="dashboard-block__buttons">
            {buttons.into_iter().map(|button| {
                let link = StoredValue::new(button.link.clone());
                let has_icon = !button.icon.is_empty();
                view! {
                    <button class="button button--secondary" on:click=move |_| link.with_value(|l| ctx.navigate(l))>
                        {has_icon.then(|| icon(&button.icon))}
                        <span>{button.label.clone()}</span>
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::layout::BlockWidth;

    #[test]
    fn test_block_class() {
        let block = DashboardElement::builtin("income_chart", "Income", BlockType::Chart, BlockWidth::TwoThirds)
            .with_config("customClasses", " highlight ");
        assert_eq!(
            block_class(&block),
            "dashboard-block dashboard-block--chart dashboard-block--w-2-3 highlight"
        );

        let plain = DashboardElement::builtin("new_orders", "New orders", BlockType::Stat, BlockWidth::Quarter);
        assert_eq!(block_class(&plain), "dashboard-block dashboard-block--stat dashboard-block--w-1-4");
    }

    #[test]
    fn test_chart_height() {
        let chart = |h: &str| {
            DashboardElement::builtin("c", "C", BlockType::Chart, BlockWidth::Full).with_config("height", h)
        };
        assert_eq!(chart_height(&chart("320")), 320);
        assert_eq!(chart_height(&chart("180px")), 180);
        assert_eq!(chart_height(&chart("tall")), DEFAULT_CHART_HEIGHT);
        assert_eq!(chart_height(&chart("0")), DEFAULT_CHART_HEIGHT);
    }
}
