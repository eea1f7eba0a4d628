//! Built-in admin navigation and the default sidebar layout derived from it.

use contracts::shared::layout::{reindex, SidebarItem, SidebarSubmenuItem};
use std::collections::HashSet;

pub const DASHBOARD_HREF: &str = "/admin";
pub const LAYOUT_SETTINGS_HREF: &str = "/admin/settings/layout";

/// Permission keys of the signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionSet {
    /// No permission list was provided; everything is shown and the API
    /// enforces access.
    Unrestricted,
    Granted(HashSet<String>),
}

impl PermissionSet {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PermissionSet::Granted(keys.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, permission: Option<&str>) -> bool {
        match (self, permission) {
            (_, None) => true,
            (PermissionSet::Unrestricted, Some(_)) => true,
            (PermissionSet::Granted(keys), Some(p)) => keys.contains(p),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct NavGroup {
    label: &'static str,
    href: &'static str,
    icon: &'static str,
    permission: Option<&'static str>,
    items: Vec<(&'static str, &'static str, Option<&'static str>)>, // (label, href, permission)
}

fn get_nav_groups() -> Vec<NavGroup> {
    vec![
        NavGroup {
            label: "Dashboard",
            href: DASHBOARD_HREF,
            icon: "home",
            permission: None,
            items: vec![],
        },
        NavGroup {
            label: "Customers",
            href: "/admin/customers",
            icon: "customers",
            permission: Some("customers.view"),
            items: vec![
                ("All customers", "/admin/customers/list", None),
                ("Customer groups", "/admin/customers/groups", None),
                ("Add customer", "/admin/customers/new", Some("customers.edit")),
            ],
        },
        NavGroup {
            label: "Orders",
            href: "/admin/orders",
            icon: "orders",
            permission: Some("orders.view"),
            items: vec![
                ("All orders", "/admin/orders/list", None),
                ("Pending orders", "/admin/orders/pending", None),
                ("Invoices", "/admin/orders/invoices", Some("invoices.view")),
            ],
        },
        NavGroup {
            label: "Products",
            href: "/admin/products",
            icon: "products",
            permission: Some("products.view"),
            items: vec![
                ("Products", "/admin/products/list", None),
                ("Product groups", "/admin/products/groups", None),
                ("Add-ons", "/admin/products/addons", None),
            ],
        },
        NavGroup {
            label: "Billing",
            href: "/admin/billing",
            icon: "credit-card",
            permission: Some("billing.view"),
            items: vec![
                ("Transactions", "/admin/billing/transactions", None),
                ("Payment methods", "/admin/billing/payment-methods", Some("billing.manage")),
            ],
        },
        NavGroup {
            label: "Automation",
            href: "/admin/automation",
            icon: "zap",
            permission: Some("automation.manage"),
            items: vec![
                ("Rules", "/admin/automation/rules", None),
                ("Execution log", "/admin/automation/log", None),
            ],
        },
        NavGroup {
            label: "Staff",
            href: "/admin/staff",
            icon: "users",
            permission: Some("staff.manage"),
            items: vec![
                ("Staff members", "/admin/staff/members", None),
                ("Roles", "/admin/staff/roles", None),
                ("Permissions", "/admin/staff/permissions", None),
            ],
        },
        NavGroup {
            label: "Settings",
            href: "/admin/settings",
            icon: "settings",
            permission: None,
            items: vec![
                ("General", "/admin/settings/general", Some("settings.manage")),
                ("Layout", LAYOUT_SETTINGS_HREF, None),
            ],
        },
    ]
}

/// Sidebar layout offered by the navigation the user is allowed to see.
pub fn default_sidebar(permissions: &PermissionSet) -> Vec<SidebarItem> {
    let mut items: Vec<SidebarItem> = get_nav_groups()
        .into_iter()
        .filter(|g| permissions.allows(g.permission))
        .map(|group| {
            let children: Vec<SidebarSubmenuItem> = group
                .items
                .iter()
                .filter(|(_, _, permission)| permissions.allows(*permission))
                .map(|(label, href, _)| SidebarSubmenuItem::builtin(label, href))
                .collect();
            let item = SidebarItem::builtin(group.label, group.href, group.icon);
            if children.is_empty() {
                item
            } else {
                item.with_children(children)
            }
        })
        .collect();
    reindex(&mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_sidebar() {
        let items = default_sidebar(&PermissionSet::Unrestricted);
        assert_eq!(items.len(), 8);
        assert_eq!(items[0].id, DASHBOARD_HREF);
        assert!(items[0].is_leaf());
        for (index, item) in items.iter().enumerate() {
            assert_eq!(item.order, index as i32);
            assert_eq!(item.id, item.href);
            assert!(!item.is_custom);
        }
        let staff = items.iter().find(|i| i.id == "/admin/staff").unwrap();
        assert_eq!(staff.children.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_ids_are_unique_across_levels() {
        let items = default_sidebar(&PermissionSet::Unrestricted);
        let mut ids = HashSet::new();
        for item in &items {
            assert!(ids.insert(item.id.clone()));
            for child in item.children.iter().flatten() {
                assert!(ids.insert(child.id.clone()));
            }
        }
    }

    #[test]
    fn test_permissions_filter_groups_and_items() {
        let perms = PermissionSet::from_keys(["customers.view", "orders.view"]);
        let items = default_sidebar(&perms);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["/admin", "/admin/customers", "/admin/orders", "/admin/settings"]);

        let customers = &items[1];
        let children: Vec<&str> = customers
            .children
            .iter()
            .flatten()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(children, vec!["/admin/customers/list", "/admin/customers/groups"]);

        let settings = &items[3];
        assert_eq!(settings.children.as_ref().unwrap().len(), 1);
    }
}
