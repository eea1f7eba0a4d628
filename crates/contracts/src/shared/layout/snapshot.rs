//! Persisted layout snapshots: storage keys, encoding, shape validation and
//! the load-time decision between a persisted layout and computed defaults.

use super::dashboard::DashboardElement;
use super::sidebar::SidebarItem;
use super::time_period::TimePeriod;
use serde::Serialize;
use serde_json::Value;

pub const SIDEBAR_KEY: &str = "dashboard_sidebar_customization";
pub const DASHBOARD_KEY: &str = "dashboard_elements_customization";
pub const TIME_PERIOD_KEY: &str = "dashboard_default_time_period";

/// Outcome of reading one persisted collection.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotStatus<T> {
    /// Nothing stored (or an empty list).
    Missing,
    /// Stored value is not valid JSON for this collection.
    Malformed(String),
    /// Valid JSON of an older or unexpected shape.
    Incompatible(String),
    Valid(Vec<T>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Persisted,
    Defaults,
}

/// The working set chosen at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<T> {
    pub items: Vec<T>,
    pub source: SnapshotSource,
    /// The defaults were adopted and have to be written back right away.
    pub needs_persist: bool,
}

pub fn encode<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

pub fn decode_sidebar(raw: Option<&str>) -> SnapshotStatus<SidebarItem> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return SnapshotStatus::Missing;
    };
    match serde_json::from_str::<Vec<SidebarItem>>(raw) {
        Ok(items) if items.is_empty() => SnapshotStatus::Missing,
        Ok(items) => SnapshotStatus::Valid(items),
        Err(e) => SnapshotStatus::Malformed(e.to_string()),
    }
}

/// Dashboard snapshots carry no version tag, so older layouts are detected
/// by shape: a non-empty list, at least one element with a `width` field and
/// at least `min_blocks` entries.
pub fn decode_dashboard(raw: Option<&str>, min_blocks: usize) -> SnapshotStatus<DashboardElement> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return SnapshotStatus::Missing;
    };
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => return SnapshotStatus::Malformed(e.to_string()),
    };
    let Some(elements) = value.as_array() else {
        return SnapshotStatus::Incompatible("not a list".to_string());
    };
    if elements.is_empty() {
        return SnapshotStatus::Incompatible("empty list".to_string());
    }
    if !elements.iter().any(|e| e.get("width").is_some()) {
        return SnapshotStatus::Incompatible("no element carries a width".to_string());
    }
    if elements.len() < min_blocks {
        return SnapshotStatus::Incompatible(format!(
            "{} blocks, expected at least {}",
            elements.len(),
            min_blocks
        ));
    }
    match serde_json::from_value::<Vec<DashboardElement>>(value) {
        Ok(blocks) => SnapshotStatus::Valid(blocks),
        Err(e) => SnapshotStatus::Malformed(e.to_string()),
    }
}

pub fn decode_time_period(raw: Option<&str>) -> Option<TimePeriod> {
    raw.and_then(TimePeriod::parse)
}

/// Trusts a valid persisted list as-is; anything else falls back to
/// `defaults`, which must then be persisted.
///
/// Items that no longer exist upstream are not pruned here: renderers pass
/// the list through `sidebar::resolvable` / `dashboard::resolvable_blocks`.
pub fn reconcile<T>(status: SnapshotStatus<T>, defaults: &[T]) -> Reconciled<T>
where
    T: Clone,
{
    match status {
        SnapshotStatus::Valid(items) => Reconciled {
            items,
            source: SnapshotSource::Persisted,
            needs_persist: false,
        },
        _ => Reconciled {
            items: defaults.to_vec(),
            source: SnapshotSource::Defaults,
            needs_persist: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::layout::dashboard::{BlockType, BlockWidth};
    use crate::shared::layout::entry::reindex;
    use crate::shared::layout::sidebar::{self, NewSidebarItem, SidebarSubmenuItem};

    fn sidebar_sample() -> Vec<SidebarItem> {
        let mut items = vec![
            SidebarItem::builtin("Dashboard", "/admin", "home"),
            SidebarItem::builtin("Customers", "/admin/customers", "customers").with_children(vec![
                SidebarSubmenuItem::builtin("All", "/admin/customers/list"),
                SidebarSubmenuItem::builtin("Groups", "/admin/customers/groups"),
            ]),
        ];
        reindex(&mut items);
        sidebar::toggle_visibility(&items, "/admin/customers/groups")
    }

    fn dashboard_sample(n: usize) -> Vec<DashboardElement> {
        let mut blocks: Vec<DashboardElement> = (0..n)
            .map(|i| {
                DashboardElement::builtin(&format!("b{i}"), &format!("Block {i}"), BlockType::Stat, BlockWidth::Quarter)
            })
            .collect();
        reindex(&mut blocks);
        blocks
    }

    #[test]
    fn test_sidebar_round_trip() {
        let items = sidebar::insert_custom(
            &sidebar_sample(),
            &NewSidebarItem {
                name: "Help".into(),
                href: "https://help".into(),
                visible: false,
                ..Default::default()
            },
        )
        .unwrap();
        let raw = encode(&items).unwrap();
        assert_eq!(decode_sidebar(Some(&raw)), SnapshotStatus::Valid(items));
    }

    #[test]
    fn test_sidebar_json_shape() {
        let raw = encode(&sidebar_sample()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[1]["isCustom"], false);
        assert_eq!(value[1]["children"][1]["visible"], false);
        assert!(value[0].get("children").is_none());
    }

    #[test]
    fn test_dashboard_round_trip() {
        let blocks = dashboard_sample(4);
        let raw = encode(&blocks).unwrap();
        assert_eq!(decode_dashboard(Some(&raw), 4), SnapshotStatus::Valid(blocks));
    }

    #[test]
    fn test_missing_and_malformed() {
        assert_eq!(decode_sidebar(None), SnapshotStatus::Missing);
        assert_eq!(decode_sidebar(Some("[]")), SnapshotStatus::Missing);
        assert!(matches!(decode_sidebar(Some("{not json")), SnapshotStatus::Malformed(_)));
        assert_eq!(decode_dashboard(Some(""), 1), SnapshotStatus::Missing);
        assert!(matches!(decode_dashboard(Some("[{"), 1), SnapshotStatus::Malformed(_)));
    }

    #[test]
    fn test_dashboard_schema_heuristics() {
        assert!(matches!(
            decode_dashboard(Some(r#"{"a":1}"#), 1),
            SnapshotStatus::Incompatible(_)
        ));
        assert!(matches!(decode_dashboard(Some("[]"), 1), SnapshotStatus::Incompatible(_)));

        let old_schema = r#"[{"id":"a","name":"A","type":"stat","visible":true,"order":0}]"#;
        assert!(matches!(
            decode_dashboard(Some(old_schema), 1),
            SnapshotStatus::Incompatible(_)
        ));

        let raw = encode(&dashboard_sample(2)).unwrap();
        assert!(matches!(decode_dashboard(Some(&raw), 3), SnapshotStatus::Incompatible(_)));
        assert!(matches!(decode_dashboard(Some(&raw), 2), SnapshotStatus::Valid(_)));
    }

    #[test]
    fn test_width_missing_on_some_elements_defaults_to_full() {
        let raw = r#"[
            {"id":"a","name":"A","type":"stat","visible":true,"order":0,"width":"1/2"},
            {"id":"b","name":"B","type":"table","visible":true,"order":1}
        ]"#;
        let SnapshotStatus::Valid(blocks) = decode_dashboard(Some(raw), 2) else {
            panic!("expected a valid snapshot");
        };
        assert_eq!(blocks[0].width, BlockWidth::Half);
        assert_eq!(blocks[1].width, BlockWidth::Full);
    }

    #[test]
    fn test_reconcile() {
        let defaults = dashboard_sample(3);
        let persisted = dashboard_sample(5);

        let r = reconcile(SnapshotStatus::Valid(persisted.clone()), &defaults);
        assert_eq!(r.items, persisted);
        assert_eq!(r.source, SnapshotSource::Persisted);
        assert!(!r.needs_persist);

        for status in [
            SnapshotStatus::Missing,
            SnapshotStatus::Malformed("x".into()),
            SnapshotStatus::Incompatible("y".into()),
        ] {
            let r = reconcile(status, &defaults);
            assert_eq!(r.items, defaults);
            assert_eq!(r.source, SnapshotSource::Defaults);
            assert!(r.needs_persist);
        }
    }

    #[test]
    fn test_time_period_decode() {
        assert_eq!(decode_time_period(Some("week")), Some(TimePeriod::Week));
        assert_eq!(decode_time_period(Some("fortnight")), None);
        assert_eq!(decode_time_period(None), None);
    }
}
