use crate::dashboards::AdminOverviewDashboard;
use crate::dashboards::d100_admin_overview::ui::TimePeriodSelect;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::shared::layout_customization::use_layout;
use crate::shared::navigation::{DASHBOARD_HREF, LAYOUT_SETTINGS_HREF};
use crate::shared::page_frame::{page_id_for, PageFrame, PAGE_CAT_DASHBOARD, PAGE_CAT_SECTION, PAGE_CAT_SETTINGS};
use contracts::shared::layout::SidebarItem;
use leptos::prelude::*;

/// Display name of the sidebar entry pointing at `href`, if any.
fn title_for(items: &[SidebarItem], href: &str) -> Option<String> {
    items.iter().find_map(|item| {
        if item.href == href {
            return Some(item.name.clone());
        }
        item.children
            .iter()
            .flatten()
            .find(|c| c.href == href)
            .map(|c| c.name.clone())
    })
}

#[component]
fn LayoutSettingsPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <PageFrame page_id=page_id_for(LAYOUT_SETTINGS_HREF) category=PAGE_CAT_SETTINGS>
            <div class="page__header"><h1>"Layout"</h1></div>
            <div class="page__content">
                <section class="settings-card">
                    <h2>"Sidebar"</h2>
                    <p>"Reorder, rename and hide navigation links, or add your own."</p>
                    <button class="button button--primary" on:click=move |_| ctx.open_sidebar_editor()>
                        "Customize sidebar"
                    </button>
                </section>
                <section class="settings-card">
                    <h2>"Dashboard"</h2>
                    <p>"Choose which blocks the overview shows, their order and width."</p>
                    <button class="button button--primary" on:click=move |_| ctx.open_dashboard_editor()>
                        "Customize dashboard"
                    </button>
                </section>
                <section class="settings-card">
                    <h2>"Default period"</h2>
                    <TimePeriodSelect />
                </section>
            </div>
        </PageFrame>
    }
}

#[component]
fn SectionPage(href: String) -> impl IntoView {
    let layout = use_layout();
    let title = {
        let href = href.clone();
        move || layout.sidebar.with(|items| title_for(items, &href)).unwrap_or_else(|| href.clone())
    };

    view! {
        <PageFrame page_id=page_id_for(&href) category=PAGE_CAT_SECTION>
            <div class="page__header"><h1>{title}</h1></div>
            <div class="page__content"><code>{href.clone()}</code></div>
        </PageFrame>
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Initialize router integration. This runs once when the component is created.
    ctx.init_router_integration();

    let page = move || {
        let href = ctx.active.get();
        match href.as_str() {
            DASHBOARD_HREF => view! {
                <PageFrame page_id=page_id_for(DASHBOARD_HREF) category=PAGE_CAT_DASHBOARD>
                    <AdminOverviewDashboard />
                </PageFrame>
            }
            .into_any(),
            LAYOUT_SETTINGS_HREF => view! { <LayoutSettingsPage /> }.into_any(),
            _ => view! { <SectionPage href=href /> }.into_any(),
        }
    };

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || page.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! { <MainLayout /> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::layout::SidebarSubmenuItem;

    #[test]
    fn test_title_for_uses_custom_names() {
        let mut orders = SidebarItem::builtin("Orders", "/admin/orders", "orders")
            .with_children(vec![SidebarSubmenuItem::builtin("All orders", "/admin/orders/list")]);
        if let Some(children) = orders.children.as_mut() {
            children[0].name = "Every order".to_string();
        }
        let items = vec![orders];
        assert_eq!(title_for(&items, "/admin/orders/list").as_deref(), Some("Every order"));
        assert_eq!(title_for(&items, "/admin/orders").as_deref(), Some("Orders"));
        assert_eq!(title_for(&items, "/admin/unknown"), None);
    }
}
