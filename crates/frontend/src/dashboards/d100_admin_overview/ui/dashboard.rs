use super::block::DashboardBlock;
use super::time_period_select::TimePeriodSelect;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::layout_customization::use_layout;
use contracts::shared::layout::dashboard::resolvable_blocks;
use contracts::shared::layout::{sort_by_order, DashboardElement};
use leptos::prelude::*;

/// Visible blocks in display order. Built-in blocks missing from `defaults`
/// are skipped.
fn visible_blocks(blocks: &[DashboardElement], defaults: &[DashboardElement]) -> Vec<DashboardElement> {
    sort_by_order(&resolvable_blocks(blocks, defaults))
        .into_iter()
        .filter(|b| b.visible)
        .collect()
}

/// Admin landing page. Blocks flow-wrap left to right in their stored order.
#[component]
pub fn AdminOverviewDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let layout = use_layout();

    let blocks = move || {
        let stored = layout.dashboard.get();
        let blocks = layout
            .dashboard_defaults
            .with_value(|defaults| visible_blocks(&stored, defaults));
        if blocks.is_empty() {
            return view! {
                <div class="dashboard__empty">
                    "All blocks are hidden. Use \"Customize\" to show them again."
                </div>
            }
            .into_any();
        }
        blocks
            .into_iter()
            .map(|block| view! { <DashboardBlock block=block /> })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="dashboard">
            <div class="dashboard__toolbar">
                <h1>"Overview"</h1>
                <TimePeriodSelect />
                <button class="button button--ghost" on:click=move |_| ctx.open_dashboard_editor()>
                    {icon("sliders")}
                    <span>"Customize"</span>
                </button>
            </div>
            <div class="dashboard__grid">{blocks}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d100_admin_overview::defaults::default_blocks;
    use crate::shared::navigation::PermissionSet;
    use contracts::shared::layout::{BlockType, BlockWidth};

    #[test]
    fn test_visible_blocks_sorted() {
        let mut a = DashboardElement::builtin("a", "A", BlockType::Stat, BlockWidth::Quarter);
        a.order = 2;
        let mut b = DashboardElement::builtin("b", "B", BlockType::Stat, BlockWidth::Quarter);
        b.order = 0;
        b.visible = false;
        let mut c = DashboardElement::builtin("c", "C", BlockType::Table, BlockWidth::Full);
        c.order = 1;

        let blocks = vec![a, b, c];
        let ids: Vec<String> = visible_blocks(&blocks, &blocks).into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_revoked_blocks_are_not_rendered() {
        let stored = default_blocks(&PermissionSet::Unrestricted);
        let live = default_blocks(&PermissionSet::from_keys(["orders.view"]));

        let ids: Vec<String> = visible_blocks(&stored, &live).into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["new_orders", "recent_orders"]);
    }
}
