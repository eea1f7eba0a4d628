//! Sidebar with collapsible groups, rendered from the user's customized
//! layout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::layout_customization::use_layout;
use contracts::shared::layout::sidebar::resolvable;
use contracts::shared::layout::{sort_by_order, SidebarItem};
use leptos::prelude::*;

/// Visible entries in display order, with hidden submenu links and
/// navigation missing from `defaults` removed.
fn visible_items(items: &[SidebarItem], defaults: &[SidebarItem]) -> Vec<SidebarItem> {
    sort_by_order(&resolvable(items, defaults))
        .into_iter()
        .filter(|item| item.visible)
        .map(|mut item| {
            if item.children.is_some() {
                let children: Vec<_> = item
                    .sorted_children()
                    .into_iter()
                    .filter(|c| c.visible)
                    .collect();
                item.children = Some(children);
            }
            item
        })
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let layout = use_layout();

    let expanded_groups = RwSignal::new(Vec::<String>::new());

    let toggle_group = move |gid: String| {
        expanded_groups.update(move |items| {
            if let Some(pos) = items.iter().position(|x| x == &gid) {
                items.remove(pos);
            } else {
                items.push(gid);
            }
        });
    };

    let groups = move || {
        let items = layout.sidebar.get();
        layout
            .sidebar_defaults
            .with_value(|defaults| visible_items(&items, defaults))
            .into_iter()
            .map(|item| {
                let group_id = StoredValue::new(item.id.clone());
                let href = StoredValue::new(item.href.clone());
                let children = item.children.clone().unwrap_or_default();
                let has_children = !children.is_empty();
                let icon_name = item
                    .icon
                    .clone()
                    .unwrap_or_else(|| if item.is_custom { "link".to_string() } else { "item".to_string() });

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || {
                                !has_children && href.with_value(|h| ctx.is_active(h))
                            }
                            style:padding-left="12px"
                            on:click=move |_| {
                                if has_children {
                                    toggle_group(group_id.get_value());
                                } else {
                                    href.with_value(|h| ctx.navigate(h));
                                }
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(&icon_name)}
                                <span>{item.name.clone()}</span>
                            </div>
                            {has_children.then(|| view! {
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=move || {
                                        group_id.with_value(|gid| expanded_groups.get().contains(gid))
                                    }
                                >
                                    {icon("chevron-right")}
                                </div>
                            })}
                        </div>

                        {has_children.then(|| {
                            let children = StoredValue::new(children);
                            view! {
                                <Show when=move || group_id.with_value(|gid| expanded_groups.get().contains(gid))>
                                    <div class="app-sidebar__children">
                                        {children.get_value().into_iter().map(|child| {
                                            let child_href = StoredValue::new(child.href.clone());
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || {
                                                        child_href.with_value(|h| ctx.is_active(h))
                                                    }
                                                    style:padding-left="10px"
                                                    on:click=move |_| child_href.with_value(|h| ctx.navigate(h))
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {child.is_custom.then(|| icon("link"))}
                                                        <span>{child.name.clone()}</span>
                                                    </div>
                                                </div>
                                            }
                                        }).collect_view()}
                                    </div>
                                </Show>
                            }
                        })}
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="app-sidebar__content">
            {groups}
            <div class="app-sidebar__footer">
                <button class="app-sidebar__customize" on:click=move |_| ctx.open_sidebar_editor()>
                    {icon("sliders")}
                    <span>"Customize"</span>
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::navigation::{default_sidebar, PermissionSet};
    use contracts::shared::layout::SidebarSubmenuItem;

    #[test]
    fn test_hidden_entries_are_filtered() {
        let mut hidden_child = SidebarSubmenuItem::builtin("Roles", "/admin/staff/roles");
        hidden_child.visible = false;
        let staff = SidebarItem::builtin("Staff", "/admin/staff", "users").with_children(vec![
            SidebarSubmenuItem::builtin("Members", "/admin/staff/members"),
            hidden_child,
        ]);
        let mut hidden = SidebarItem::builtin("Billing", "/admin/billing", "credit-card");
        hidden.visible = false;
        hidden.order = 1;
        let mut home = SidebarItem::builtin("Dashboard", "/admin", "home");
        home.order = 2;

        let items = vec![home, hidden, staff];
        let result = visible_items(&items, &items);
        let ids: Vec<&str> = result.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["/admin/staff", "/admin"]);
        assert_eq!(result[0].children.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_revoked_navigation_is_not_rendered() {
        // layout saved while every permission was granted
        let mut stored = default_sidebar(&PermissionSet::Unrestricted);
        let mut status = SidebarItem::builtin("Status page", "https://status.example.com", "link");
        status.id = "custom-status".to_string();
        status.is_custom = true;
        status.order = 100;
        stored.push(status);
        let live = default_sidebar(&PermissionSet::from_keys(["orders.view"]));

        let result = visible_items(&stored, &live);
        let ids: Vec<&str> = result.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["/admin", "/admin/orders", "/admin/settings", "custom-status"]);

        let orders: Vec<&str> = result[1].children.iter().flatten().map(|c| c.id.as_str()).collect();
        assert_eq!(orders, vec!["/admin/orders/list", "/admin/orders/pending"]);
    }
}
