use super::entry::{self, LayoutEntry};
use super::error::LayoutError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Kind of dashboard block. Determines which `config` keys are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Stat,
    Chart,
    Widget,
    Gauge,
    Table,
    Custom,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Stat => "stat",
            BlockType::Chart => "chart",
            BlockType::Widget => "widget",
            BlockType::Gauge => "gauge",
            BlockType::Table => "table",
            BlockType::Custom => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BlockType::Stat => "Statistic",
            BlockType::Chart => "Chart",
            BlockType::Widget => "Widget",
            BlockType::Gauge => "Gauge",
            BlockType::Table => "Table",
            BlockType::Custom => "Button group",
        }
    }

    /// Config keys the editor offers for this block type.
    pub fn config_keys(&self) -> &'static [&'static str] {
        match self {
            BlockType::Chart => &["primaryColor", "height", "customClasses"],
            BlockType::Gauge => &["highColor", "mediumColor", "lowColor", "customClasses"],
            _ => &["customClasses"],
        }
    }
}

/// Layout hint for a block. Rows are not packed: blocks flow-wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockWidth {
    #[default]
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "1/2")]
    Half,
    #[serde(rename = "1/3")]
    Third,
    #[serde(rename = "1/4")]
    Quarter,
    #[serde(rename = "2/3")]
    TwoThirds,
    #[serde(rename = "3/4")]
    ThreeQuarters,
}

impl BlockWidth {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockWidth::Full => "full",
            BlockWidth::Half => "1/2",
            BlockWidth::Third => "1/3",
            BlockWidth::Quarter => "1/4",
            BlockWidth::TwoThirds => "2/3",
            BlockWidth::ThreeQuarters => "3/4",
        }
    }

    /// Parses the persisted form (`"1/2"` etc).
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|w| w.as_str() == s)
    }

    /// CSS modifier suffix, e.g. `w-1-2`.
    pub fn css_modifier(&self) -> &'static str {
        match self {
            BlockWidth::Full => "w-full",
            BlockWidth::Half => "w-1-2",
            BlockWidth::Third => "w-1-3",
            BlockWidth::Quarter => "w-1-4",
            BlockWidth::TwoThirds => "w-2-3",
            BlockWidth::ThreeQuarters => "w-3-4",
        }
    }

    pub fn all() -> [BlockWidth; 6] {
        [
            BlockWidth::Full,
            BlockWidth::Half,
            BlockWidth::Third,
            BlockWidth::Quarter,
            BlockWidth::TwoThirds,
            BlockWidth::ThreeQuarters,
        ]
    }
}

/// Action button of a `custom` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardButton {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    pub link: String,
}

/// One visual unit of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardElement {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub width: BlockWidth,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<DashboardButton>,
}

fn default_visible() -> bool {
    true
}

impl DashboardElement {
    /// Built-in block with an empty config.
    pub fn builtin(id: &str, name: &str, block_type: BlockType, width: BlockWidth) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            block_type,
            visible: true,
            order: 0,
            width,
            config: Map::new(),
            is_custom: false,
            description: None,
            link: None,
            buttons: vec![],
        }
    }

    pub fn with_config(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.config.insert(key.to_string(), value.into());
        self
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }
}

impl LayoutEntry for DashboardElement {
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

/// Button row of the "add custom block" form. Rows missing a label or a link
/// are dropped on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonDraft {
    pub label: String,
    pub icon: String,
    pub link: String,
}

impl ButtonDraft {
    pub fn new(label: &str, link: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: String::new(),
            link: link.to_string(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.label.trim().is_empty() && !self.link.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDashboardBlock {
    pub name: String,
    pub width: BlockWidth,
    pub buttons: Vec<ButtonDraft>,
}

// ============================================================================
// Operations
// ============================================================================

/// Reorders blocks after a stable sort by the current `order`: the drag
/// surface shows sorted blocks while storage may not be sorted.
pub fn reorder_blocks(
    blocks: &[DashboardElement],
    source_id: &str,
    target_id: &str,
) -> Vec<DashboardElement> {
    entry::reorder_sorted(blocks, source_id, target_id)
}

pub fn toggle_visibility(blocks: &[DashboardElement], id: &str) -> Vec<DashboardElement> {
    let mut result = blocks.to_vec();
    entry::toggle_in(&mut result, id);
    result
}

pub fn rename(blocks: &[DashboardElement], id: &str, name: &str) -> Vec<DashboardElement> {
    let name = name.trim();
    if name.is_empty() {
        return blocks.to_vec();
    }
    let mut result = blocks.to_vec();
    entry::rename_in(&mut result, id, name);
    result
}

/// Blocks that can still be rendered: built-in blocks missing from the live
/// `defaults` (for example after a permission was revoked) are skipped.
/// Custom blocks always stay.
pub fn resolvable_blocks(blocks: &[DashboardElement], defaults: &[DashboardElement]) -> Vec<DashboardElement> {
    blocks
        .iter()
        .filter(|b| b.is_custom || defaults.iter().any(|d| d.id == b.id))
        .cloned()
        .collect()
}

/// Removes a custom block. Built-in blocks can only be hidden.
pub fn delete(blocks: &[DashboardElement], id: &str) -> Vec<DashboardElement> {
    let mut result = blocks.to_vec();
    entry::remove_custom_in(&mut result, id);
    result
}

pub fn update_width(blocks: &[DashboardElement], id: &str, width: BlockWidth) -> Vec<DashboardElement> {
    blocks
        .iter()
        .cloned()
        .map(|mut b| {
            if b.id == id {
                b.width = width;
            }
            b
        })
        .collect()
}

/// Sets one config value. Keys that are not meaningful for the block's type
/// are ignored; an empty value removes the key.
pub fn update_config(
    blocks: &[DashboardElement],
    id: &str,
    key: &str,
    value: &str,
) -> Vec<DashboardElement> {
    blocks
        .iter()
        .cloned()
        .map(|mut b| {
            if b.id == id && b.block_type.config_keys().contains(&key) {
                if value.trim().is_empty() {
                    b.config.remove(key);
                } else {
                    b.config
                        .insert(key.to_string(), Value::String(value.trim().to_string()));
                }
            }
            b
        })
        .collect()
}

/// Inserts a custom button-group block at order 0.
pub fn insert_custom_block(
    blocks: &[DashboardElement],
    new_block: &NewDashboardBlock,
) -> Result<Vec<DashboardElement>, LayoutError> {
    let name = new_block.name.trim();
    if name.is_empty() {
        return Err(LayoutError::EmptyName);
    }

    let buttons: Vec<DashboardButton> = new_block
        .buttons
        .iter()
        .filter(|b| b.is_complete())
        .map(|b| DashboardButton {
            id: format!("btn-{}", Uuid::new_v4()),
            label: b.label.trim().to_string(),
            icon: b.icon.trim().to_string(),
            link: b.link.trim().to_string(),
        })
        .collect();
    if buttons.is_empty() {
        return Err(LayoutError::NoValidButtons);
    }

    let block = DashboardElement {
        id: format!("custom-{}", Uuid::new_v4()),
        name: name.to_string(),
        block_type: BlockType::Custom,
        visible: true,
        order: 0,
        width: new_block.width,
        config: Map::new(),
        is_custom: true,
        description: None,
        link: None,
        buttons,
    };
    Ok(entry::prepend(blocks, block))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DashboardElement> {
        let mut blocks = vec![
            DashboardElement::builtin("revenue", "Revenue", BlockType::Stat, BlockWidth::Quarter),
            DashboardElement::builtin("orders", "Orders", BlockType::Stat, BlockWidth::Quarter),
            DashboardElement::builtin("sales_chart", "Sales", BlockType::Chart, BlockWidth::TwoThirds),
        ];
        entry::reindex(&mut blocks);
        blocks
    }

    fn ids(blocks: &[DashboardElement]) -> Vec<&str> {
        blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_reorder_blocks_sorts_before_moving() {
        let mut blocks = sample();
        // storage order differs from display order
        blocks[0].order = 2;
        blocks[2].order = 0;
        // displayed: sales_chart, orders, revenue
        let result = reorder_blocks(&blocks, "revenue", "sales_chart");
        assert_eq!(ids(&result), vec!["revenue", "sales_chart", "orders"]);
        let orders: Vec<i32> = result.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_blocks_noop() {
        let mut blocks = sample();
        blocks[0].order = 5;
        assert_eq!(reorder_blocks(&blocks, "orders", "orders"), blocks);
        assert_eq!(reorder_blocks(&blocks, "ghost", "orders"), blocks);
    }

    #[test]
    fn test_resolvable_blocks_keeps_custom_and_known() {
        let stored = insert_custom_block(
            &sample(),
            &NewDashboardBlock {
                name: "Shortcuts".to_string(),
                width: BlockWidth::Half,
                buttons: vec![ButtonDraft::new("Invoices", "/admin/orders/invoices")],
            },
        )
        .unwrap();
        let defaults: Vec<DashboardElement> = sample().into_iter().filter(|b| b.id == "orders").collect();

        let result = resolvable_blocks(&stored, &defaults);
        assert_eq!(result.len(), 2);
        assert!(result[0].is_custom);
        assert_eq!(result[1].id, "orders");
        // order values are left as stored
        assert_eq!(result[1].order, 2);
    }

    #[test]
    fn test_custom_block_prunes_invalid_buttons() {
        let blocks = sample();
        let result = insert_custom_block(
            &blocks,
            &NewDashboardBlock {
                name: "Shortcuts".into(),
                width: BlockWidth::Half,
                buttons: vec![ButtonDraft::new("Go", "/x"), ButtonDraft::new("", "/y")],
            },
        )
        .unwrap();
        assert_eq!(result.len(), 4);
        let block = &result[0];
        assert_eq!(block.order, 0);
        assert_eq!(block.block_type, BlockType::Custom);
        assert!(block.is_custom);
        assert_eq!(block.buttons.len(), 1);
        assert_eq!(block.buttons[0].label, "Go");
        assert_eq!(block.buttons[0].link, "/x");
        let shifted: Vec<(&str, i32)> = result[1..].iter().map(|b| (b.id.as_str(), b.order)).collect();
        assert_eq!(shifted, vec![("revenue", 1), ("orders", 2), ("sales_chart", 3)]);
    }

    #[test]
    fn test_custom_block_without_valid_buttons_is_rejected() {
        let blocks = sample();
        let result = insert_custom_block(
            &blocks,
            &NewDashboardBlock {
                name: "Shortcuts".into(),
                width: BlockWidth::Full,
                buttons: vec![ButtonDraft::new("", "")],
            },
        );
        assert_eq!(result, Err(LayoutError::NoValidButtons));

        let result = insert_custom_block(
            &blocks,
            &NewDashboardBlock {
                name: "  ".into(),
                width: BlockWidth::Full,
                buttons: vec![ButtonDraft::new("Go", "/x")],
            },
        );
        assert_eq!(result, Err(LayoutError::EmptyName));
    }

    #[test]
    fn test_delete_only_custom_blocks() {
        let blocks = sample();
        assert_eq!(delete(&blocks, "revenue"), blocks);

        let with_custom = insert_custom_block(
            &blocks,
            &NewDashboardBlock {
                name: "Links".into(),
                width: BlockWidth::Third,
                buttons: vec![ButtonDraft::new("Docs", "https://docs")],
            },
        )
        .unwrap();
        let custom_id = with_custom[0].id.clone();
        let result = delete(&with_custom, &custom_id);
        assert_eq!(ids(&result), vec!["revenue", "orders", "sales_chart"]);
    }

    #[test]
    fn test_update_width_and_visibility() {
        let blocks = sample();
        let result = update_width(&blocks, "orders", BlockWidth::Full);
        assert_eq!(result[1].width, BlockWidth::Full);
        assert_eq!(result[0].width, BlockWidth::Quarter);

        let result = toggle_visibility(&result, "orders");
        assert!(!result[1].visible);
        let result = rename(&result, "orders", "");
        assert_eq!(result[1].name, "Orders");
    }

    #[test]
    fn test_update_config_respects_type() {
        let blocks = sample();
        let result = update_config(&blocks, "sales_chart", "primaryColor", "#3366ff");
        assert_eq!(result[2].config_str("primaryColor"), Some("#3366ff"));

        let result = update_config(&result, "revenue", "primaryColor", "#000");
        assert_eq!(result[0].config_str("primaryColor"), None);

        let result = update_config(&result, "sales_chart", "primaryColor", "");
        assert_eq!(result[2].config_str("primaryColor"), None);
    }

    #[test]
    fn test_width_serialization() {
        let block = DashboardElement::builtin("x", "X", BlockType::Gauge, BlockWidth::ThreeQuarters);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["width"], "3/4");
        assert_eq!(json["type"], "gauge");
        assert_eq!(json["isCustom"], false);
        assert_eq!(BlockWidth::parse("1/3"), Some(BlockWidth::Third));
        assert_eq!(BlockWidth::parse("5/6"), None);
    }
}
