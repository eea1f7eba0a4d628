use super::entry::{self, LayoutEntry};
use super::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Top-level sidebar navigation entry.
///
/// Built-in items use their navigation path as `id`; custom items get a
/// generated `custom-<uuid>` id. A non-empty `children` list turns the item
/// into an expandable group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarItem {
    pub id: String,
    pub name: String,
    pub href: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SidebarSubmenuItem>>,
}

/// Second and last nesting level. Cannot hold children of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarSubmenuItem {
    pub id: String,
    pub name: String,
    pub href: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl SidebarItem {
    /// Built-in leaf item identified by its navigation path.
    pub fn builtin(name: &str, href: &str, icon: &str) -> Self {
        Self {
            id: href.to_string(),
            name: name.to_string(),
            href: href.to_string(),
            visible: true,
            order: 0,
            is_custom: false,
            icon: Some(icon.to_string()),
            children: None,
        }
    }

    pub fn with_children(mut self, mut children: Vec<SidebarSubmenuItem>) -> Self {
        entry::reindex(&mut children);
        self.children = Some(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.as_ref().map_or(true, |c| c.is_empty())
    }

    /// Children sorted by `order` for rendering.
    pub fn sorted_children(&self) -> Vec<SidebarSubmenuItem> {
        self.children
            .as_deref()
            .map(entry::sort_by_order)
            .unwrap_or_default()
    }
}

impl SidebarSubmenuItem {
    pub fn builtin(name: &str, href: &str) -> Self {
        Self {
            id: href.to_string(),
            name: name.to_string(),
            href: href.to_string(),
            visible: true,
            order: 0,
            is_custom: false,
            icon: None,
        }
    }
}

impl LayoutEntry for SidebarItem {
    fn id(&self) -> &str {
        &self.id
    }
    fn order(&self) -> i32 {
        self.order
    }
    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
    fn is_custom(&self) -> bool {
        self.is_custom
    }
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
    fn is_visible(&self) -> bool {
        self.visible
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl LayoutEntry for SidebarSubmenuItem {
    fn id(&self) -> &str {
        &self.id
    }
    fn order(&self) -> i32 {
        self.order
    }
    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
    fn is_custom(&self) -> bool {
        self.is_custom
    }
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
    fn is_visible(&self) -> bool {
        self.visible
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Form data for a user-created sidebar entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSidebarItem {
    pub name: String,
    pub href: String,
    pub visible: bool,
    pub is_submenu: bool,
    pub parent_id: Option<String>,
}

impl NewSidebarItem {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.name.trim().is_empty() {
            return Err(LayoutError::EmptyName);
        }
        if self.href.trim().is_empty() {
            return Err(LayoutError::EmptyHref);
        }
        if self.is_submenu
            && self
                .parent_id
                .as_deref()
                .map_or(true, |p| p.trim().is_empty())
        {
            return Err(LayoutError::MissingParent);
        }
        Ok(())
    }
}

fn custom_id() -> String {
    format!("custom-{}", Uuid::new_v4())
}

// ============================================================================
// Reorder scopes
// ============================================================================

/// Positions follow the `order`-sorted list, as rendered.
pub fn reorder_top_level(items: &[SidebarItem], source_id: &str, target_id: &str) -> Vec<SidebarItem> {
    entry::reorder_sorted(items, source_id, target_id)
}

/// Reorders the submenu of `parent_id` only; every other parent is untouched.
pub fn reorder_submenu(
    items: &[SidebarItem],
    parent_id: &str,
    source_id: &str,
    target_id: &str,
) -> Vec<SidebarItem> {
    items
        .iter()
        .map(|item| {
            if item.id != parent_id {
                return item.clone();
            }
            let mut item = item.clone();
            if let Some(children) = item.children.as_deref() {
                item.children = Some(entry::reorder_sorted(children, source_id, target_id));
            }
            item
        })
        .collect()
}

// ============================================================================
// Mutations
// ============================================================================

/// Flips visibility of the item or submenu item with `id`.
pub fn toggle_visibility(items: &[SidebarItem], id: &str) -> Vec<SidebarItem> {
    let mut result = items.to_vec();
    if entry::toggle_in(&mut result, id) {
        return result;
    }
    for item in result.iter_mut() {
        if let Some(children) = item.children.as_mut() {
            if entry::toggle_in(children, id) {
                break;
            }
        }
    }
    result
}

/// Renames the item or submenu item with `id`. Blank names are ignored.
pub fn rename(items: &[SidebarItem], id: &str, name: &str) -> Vec<SidebarItem> {
    let name = name.trim();
    if name.is_empty() {
        return items.to_vec();
    }
    let mut result = items.to_vec();
    if entry::rename_in(&mut result, id, name) {
        return result;
    }
    for item in result.iter_mut() {
        if let Some(children) = item.children.as_mut() {
            if entry::rename_in(children, id, name) {
                break;
            }
        }
    }
    result
}

/// Deletes the item with `id` if it is custom. Callers confirm with the user
/// before calling this.
pub fn delete(items: &[SidebarItem], id: &str) -> Vec<SidebarItem> {
    let mut result = items.to_vec();
    if entry::remove_custom_in(&mut result, id) {
        return result;
    }
    for item in result.iter_mut() {
        if let Some(children) = item.children.as_mut() {
            if entry::remove_custom_in(children, id) {
                break;
            }
        }
    }
    result
}

/// Inserts a custom entry at order 0 of the top level or of the parent's
/// submenu, shifting the existing siblings of that list by one.
pub fn insert_custom(
    items: &[SidebarItem],
    new_item: &NewSidebarItem,
) -> Result<Vec<SidebarItem>, LayoutError> {
    new_item.validate()?;
    let name = new_item.name.trim().to_string();
    let href = new_item.href.trim().to_string();

    if !new_item.is_submenu {
        let item = SidebarItem {
            id: custom_id(),
            name,
            href,
            visible: new_item.visible,
            order: 0,
            is_custom: true,
            icon: None,
            children: None,
        };
        return Ok(entry::prepend(items, item));
    }

    let parent_id = new_item.parent_id.as_deref().unwrap_or_default();
    let Some(parent_index) = items.iter().position(|i| i.id == parent_id) else {
        return Err(LayoutError::ParentNotFound(parent_id.to_string()));
    };

    let child = SidebarSubmenuItem {
        id: custom_id(),
        name,
        href,
        visible: new_item.visible,
        order: 0,
        is_custom: true,
        icon: None,
    };
    let mut result = items.to_vec();
    let parent = &mut result[parent_index];
    let children = parent.children.take().unwrap_or_default();
    parent.children = Some(entry::prepend(&children, child));
    Ok(result)
}

/// Entries that can still be rendered against the live `defaults`: built-in
/// items and submenu items whose id no longer appears there (a revoked
/// permission, a removed page) are skipped. Custom entries always stay.
/// The persisted layout itself is not pruned.
pub fn resolvable(items: &[SidebarItem], defaults: &[SidebarItem]) -> Vec<SidebarItem> {
    let known: HashSet<&str> = defaults
        .iter()
        .flat_map(|item| {
            std::iter::once(item.id.as_str()).chain(item.children.iter().flatten().map(|c| c.id.as_str()))
        })
        .collect();

    items
        .iter()
        .filter(|item| item.is_custom || known.contains(item.id.as_str()))
        .cloned()
        .map(|mut item| {
            if let Some(children) = item.children.as_mut() {
                children.retain(|c| c.is_custom || known.contains(c.id.as_str()));
            }
            item
        })
        .collect()
}

/// Finds an item or submenu item by id and returns its `(name, href)`.
pub fn find_entry<'a>(items: &'a [SidebarItem], id: &str) -> Option<(&'a str, &'a str)> {
    for item in items {
        if item.id == id {
            return Some((&item.name, &item.href));
        }
        if let Some(child) = item.children.iter().flatten().find(|c| c.id == id) {
            return Some((&child.name, &child.href));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SidebarItem> {
        vec![
            SidebarItem::builtin("Customers", "/admin/customers", "customers").with_children(vec![
                SidebarSubmenuItem::builtin("All customers", "/admin/customers/list"),
                SidebarSubmenuItem::builtin("Groups", "/admin/customers/groups"),
            ]),
            SidebarItem {
                order: 1,
                ..SidebarItem::builtin("Orders", "/admin/orders", "orders")
            }
            .with_children(vec![SidebarSubmenuItem::builtin("Invoices", "/admin/orders/invoices")]),
        ]
    }

    fn child_orders(item: &SidebarItem) -> Vec<(String, i32)> {
        item.children
            .iter()
            .flatten()
            .map(|c| (c.id.clone(), c.order))
            .collect()
    }

    #[test]
    fn test_submenu_reorder_is_isolated() {
        let items = sample();
        let result = reorder_submenu(
            &items,
            "/admin/customers",
            "/admin/customers/list",
            "/admin/customers/groups",
        );
        assert_eq!(
            child_orders(&result[0]),
            vec![
                ("/admin/customers/groups".to_string(), 0),
                ("/admin/customers/list".to_string(), 1),
            ]
        );
        assert_eq!(result[1], items[1]);
        assert_eq!(
            child_orders(&result[1]),
            vec![("/admin/orders/invoices".to_string(), 0)]
        );
    }

    #[test]
    fn test_submenu_reorder_unknown_parent_is_noop() {
        let items = sample();
        let result = reorder_submenu(&items, "/nope", "/admin/customers/list", "/admin/customers/groups");
        assert_eq!(result, items);
    }

    #[test]
    fn test_top_level_reorder_follows_displayed_order() {
        // stored sequence differs from the `order` the editor renders by
        let items = vec![
            SidebarItem { order: 2, ..SidebarItem::builtin("A", "/a", "item") },
            SidebarItem { order: 0, ..SidebarItem::builtin("B", "/b", "item") },
            SidebarItem { order: 1, ..SidebarItem::builtin("C", "/c", "item") },
        ];
        // displayed: B, C, A. Dropping A onto B puts A first.
        let result = reorder_top_level(&items, "/a", "/b");
        let ids: Vec<(&str, i32)> = result.iter().map(|i| (i.id.as_str(), i.order)).collect();
        assert_eq!(ids, vec![("/a", 0), ("/b", 1), ("/c", 2)]);
    }

    #[test]
    fn test_submenu_reorder_follows_displayed_order() {
        let mut items = sample();
        if let Some(children) = items[0].children.as_mut() {
            children[0].order = 1;
            children[1].order = 0;
        }
        // displayed: Groups, All customers. Dropping Groups onto All customers
        // moves it to the end.
        let result = reorder_submenu(
            &items,
            "/admin/customers",
            "/admin/customers/groups",
            "/admin/customers/list",
        );
        assert_eq!(
            child_orders(&result[0]),
            vec![
                ("/admin/customers/list".to_string(), 0),
                ("/admin/customers/groups".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_resolvable_skips_revoked_builtin_entries() {
        let mut stored = sample();
        stored = insert_custom(
            &stored,
            &NewSidebarItem {
                name: "Status page".to_string(),
                href: "https://status.example.com".to_string(),
                visible: true,
                is_submenu: false,
                parent_id: None,
            },
        )
        .unwrap();
        if let Some(children) = stored[1].children.as_mut() {
            children.push(SidebarSubmenuItem {
                is_custom: true,
                id: "custom-child".to_string(),
                ..SidebarSubmenuItem::builtin("Mine", "/mine")
            });
        }

        // live navigation now only offers Customers with its first link
        let defaults = vec![SidebarItem::builtin("Customers", "/admin/customers", "customers")
            .with_children(vec![SidebarSubmenuItem::builtin("All customers", "/admin/customers/list")])];

        let result = resolvable(&stored, &defaults);
        let ids: Vec<&str> = result.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids[0].starts_with("custom-"));
        assert_eq!(ids[1], "/admin/customers");
        // custom submenu entry survives, revoked built-in one does not
        let children: Vec<&str> = result[1].children.iter().flatten().map(|c| c.id.as_str()).collect();
        assert_eq!(children, vec!["/admin/customers/list", "custom-child"]);
    }

    #[test]
    fn test_toggle_visibility_reaches_submenu() {
        let items = sample();
        let result = toggle_visibility(&items, "/admin/orders/invoices");
        let invoices = &result[1].children.as_ref().unwrap()[0];
        assert!(!invoices.visible);
        assert!(result[0].visible);

        let result = toggle_visibility(&result, "/admin/customers");
        assert!(!result[0].visible);
    }

    #[test]
    fn test_rename_ignores_blank_name() {
        let items = sample();
        assert_eq!(rename(&items, "/admin/orders", "   "), items);
        let result = rename(&items, "/admin/customers/groups", "  Segments ");
        assert_eq!(result[0].children.as_ref().unwrap()[1].name, "Segments");
    }

    #[test]
    fn test_delete_builtin_is_refused() {
        let items = sample();
        assert_eq!(delete(&items, "/admin/orders"), items);
        assert_eq!(delete(&items, "/admin/orders/invoices"), items);
    }

    #[test]
    fn test_delete_custom_top_level_and_child() {
        let items = sample();
        let items = insert_custom(
            &items,
            &NewSidebarItem {
                name: "Docs".into(),
                href: "https://docs.example.com".into(),
                visible: true,
                ..Default::default()
            },
        )
        .unwrap();
        let items = insert_custom(
            &items,
            &NewSidebarItem {
                name: "VIP".into(),
                href: "/admin/customers?vip=1".into(),
                visible: true,
                is_submenu: true,
                parent_id: Some("/admin/customers".into()),
            },
        )
        .unwrap();

        let top_custom = items[0].id.clone();
        let customers = items.iter().find(|i| i.id == "/admin/customers").unwrap();
        let child_custom = customers.children.as_ref().unwrap()[0].id.clone();

        let result = delete(&items, &child_custom);
        let customers = result.iter().find(|i| i.id == "/admin/customers").unwrap();
        assert_eq!(customers.children.as_ref().unwrap().len(), 2);

        let result = delete(&result, &top_custom);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_insert_custom_goes_first() {
        let items = vec![
            SidebarItem::builtin("A", "/a", "a"),
            SidebarItem {
                order: 1,
                ..SidebarItem::builtin("B", "/b", "b")
            },
        ];
        let result = insert_custom(
            &items,
            &NewSidebarItem {
                name: "C".into(),
                href: "/c".into(),
                visible: true,
                ..Default::default()
            },
        )
        .unwrap();
        let pairs: Vec<(&str, i32)> = result.iter().map(|i| (i.name.as_str(), i.order)).collect();
        assert_eq!(pairs, vec![("C", 0), ("A", 1), ("B", 2)]);
        assert!(result[0].is_custom);
        assert!(result[0].id.starts_with("custom-"));
        assert_ne!(result[0].id, result[0].href);
    }

    #[test]
    fn test_insert_custom_submenu_shifts_only_parent() {
        let items = sample();
        let result = insert_custom(
            &items,
            &NewSidebarItem {
                name: "Refunds".into(),
                href: "/admin/orders/refunds".into(),
                visible: false,
                is_submenu: true,
                parent_id: Some("/admin/orders".into()),
            },
        )
        .unwrap();
        assert_eq!(result[0], items[0]);
        let children = result[1].children.as_ref().unwrap();
        assert_eq!(children[0].name, "Refunds");
        assert_eq!(children[0].order, 0);
        assert!(!children[0].visible);
        assert_eq!(children[1].id, "/admin/orders/invoices");
        assert_eq!(children[1].order, 1);
    }

    #[test]
    fn test_insert_custom_submenu_into_leaf_parent() {
        let items = vec![SidebarItem::builtin("Reports", "/admin/reports", "chart")];
        let result = insert_custom(
            &items,
            &NewSidebarItem {
                name: "Tax".into(),
                href: "/admin/reports/tax".into(),
                visible: true,
                is_submenu: true,
                parent_id: Some("/admin/reports".into()),
            },
        )
        .unwrap();
        assert!(!result[0].is_leaf());
    }

    #[test]
    fn test_insert_custom_validation() {
        let items = sample();
        let base = NewSidebarItem {
            name: "X".into(),
            href: "/x".into(),
            visible: true,
            ..Default::default()
        };

        let err = insert_custom(&items, &NewSidebarItem { name: " ".into(), ..base.clone() });
        assert_eq!(err, Err(LayoutError::EmptyName));

        let err = insert_custom(&items, &NewSidebarItem { href: "".into(), ..base.clone() });
        assert_eq!(err, Err(LayoutError::EmptyHref));

        let err = insert_custom(
            &items,
            &NewSidebarItem {
                is_submenu: true,
                ..base.clone()
            },
        );
        assert_eq!(err, Err(LayoutError::MissingParent));

        let err = insert_custom(
            &items,
            &NewSidebarItem {
                is_submenu: true,
                parent_id: Some("/missing".into()),
                ..base
            },
        );
        assert_eq!(err, Err(LayoutError::ParentNotFound("/missing".into())));
    }

    #[test]
    fn test_find_entry() {
        let items = sample();
        assert_eq!(
            find_entry(&items, "/admin/orders/invoices"),
            Some(("Invoices", "/admin/orders/invoices"))
        );
        assert_eq!(find_entry(&items, "/none"), None);
    }
}
