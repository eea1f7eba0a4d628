//! Built-in dashboard blocks, filtered by what the user may see.

use crate::shared::navigation::PermissionSet;
use contracts::shared::layout::{reindex, BlockType, BlockWidth, DashboardElement};

fn builtin_blocks() -> Vec<(DashboardElement, Option<&'static str>)> {
    vec![
        (
            DashboardElement::builtin("revenue_today", "Revenue today", BlockType::Stat, BlockWidth::Quarter)
                .with_link("/admin/billing/transactions"),
            Some("billing.view"),
        ),
        (
            DashboardElement::builtin("new_orders", "New orders", BlockType::Stat, BlockWidth::Quarter)
                .with_link("/admin/orders/pending"),
            Some("orders.view"),
        ),
        (
            DashboardElement::builtin("active_customers", "Active customers", BlockType::Stat, BlockWidth::Quarter)
                .with_link("/admin/customers/list"),
            Some("customers.view"),
        ),
        (
            DashboardElement::builtin("unpaid_invoices", "Unpaid invoices", BlockType::Stat, BlockWidth::Quarter)
                .with_link("/admin/orders/invoices"),
            Some("invoices.view"),
        ),
        (
            DashboardElement::builtin("income_chart", "Income", BlockType::Chart, BlockWidth::TwoThirds)
                .with_description("Paid invoices over the selected period")
                .with_config("primaryColor", "#4f46e5")
                .with_config("height", "280"),
            Some("billing.view"),
        ),
        (
            DashboardElement::builtin("collection_rate", "Collection rate", BlockType::Gauge, BlockWidth::Third)
                .with_description("Share of invoices paid on time")
                .with_config("highColor", "#16a34a")
                .with_config("mediumColor", "#f59e0b")
                .with_config("lowColor", "#dc2626"),
            Some("billing.view"),
        ),
        (
            DashboardElement::builtin("recent_orders", "Recent orders", BlockType::Table, BlockWidth::Full)
                .with_link("/admin/orders/list"),
            Some("orders.view"),
        ),
        (
            DashboardElement::builtin("automation_status", "Automation", BlockType::Widget, BlockWidth::Half)
                .with_description("Last run of each automation rule")
                .with_link("/admin/automation/log"),
            Some("automation.manage"),
        ),
        (
            DashboardElement::builtin("staff_activity", "Staff activity", BlockType::Widget, BlockWidth::Half)
                .with_link("/admin/staff/members"),
            Some("staff.manage"),
        ),
    ]
}

/// Dashboard blocks computed from the current permission set.
pub fn default_blocks(permissions: &PermissionSet) -> Vec<DashboardElement> {
    let mut blocks: Vec<DashboardElement> = builtin_blocks()
        .into_iter()
        .filter(|(_, permission)| permissions.allows(*permission))
        .map(|(block, _)| block)
        .collect();
    reindex(&mut blocks);
    blocks
}
