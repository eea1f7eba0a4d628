use contracts::shared::layout::snapshot::{DASHBOARD_KEY, SIDEBAR_KEY, TIME_PERIOD_KEY};
use serde::Deserialize;

/// Storage keys and thresholds of the layout customization store.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CustomizationSettings {
    pub storage: StorageKeys,
    /// Persisted dashboards with fewer blocks are treated as an older schema.
    pub min_dashboard_blocks: usize,
    /// Name of the DOM event dispatched on `window` after a commit.
    pub change_event: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageKeys {
    pub sidebar: String,
    pub dashboard: String,
    pub time_period: String,
}

/// Default settings embedded in the bundle
const DEFAULT_SETTINGS: &str = r#"{
    "storage": {
        "sidebar": "dashboard_sidebar_customization",
        "dashboard": "dashboard_elements_customization",
        "time_period": "dashboard_default_time_period"
    },
    "min_dashboard_blocks": 4,
    "change_event": "dashboard-customization-changed"
}"#;

impl CustomizationSettings {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl Default for CustomizationSettings {
    fn default() -> Self {
        Self {
            storage: StorageKeys {
                sidebar: SIDEBAR_KEY.to_string(),
                dashboard: DASHBOARD_KEY.to_string(),
                time_period: TIME_PERIOD_KEY.to_string(),
            },
            min_dashboard_blocks: 4,
            change_event: "dashboard-customization-changed".to_string(),
        }
    }
}

/// Load settings from an optional JSON override.
///
/// Falls back to the embedded defaults when the override is absent or invalid.
pub fn load_settings(override_json: Option<&str>) -> CustomizationSettings {
    if let Some(raw) = override_json {
        match CustomizationSettings::from_json(raw) {
            Ok(settings) => {
                log::info!("Using customization settings override");
                return settings;
            }
            Err(e) => log::warn!("Invalid customization settings override: {}", e),
        }
    }
    CustomizationSettings::from_json(DEFAULT_SETTINGS).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_load() {
        let settings = CustomizationSettings::from_json(DEFAULT_SETTINGS);
        assert!(settings.is_ok());
        assert_eq!(settings.unwrap(), CustomizationSettings::default());
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let settings = load_settings(Some("{\"storage\": 1}"));
        assert_eq!(settings, CustomizationSettings::default());
    }

    #[test]
    fn test_override_is_used() {
        let raw = r#"{
            "storage": {"sidebar": "s", "dashboard": "d", "time_period": "t"},
            "min_dashboard_blocks": 1,
            "change_event": "layout-changed"
        }"#;
        let settings = load_settings(Some(raw));
        assert_eq!(settings.storage.sidebar, "s");
        assert_eq!(settings.min_dashboard_blocks, 1);
        assert_eq!(settings.change_event, "layout-changed");
    }
}
