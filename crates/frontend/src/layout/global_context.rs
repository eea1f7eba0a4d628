use crate::shared::navigation::DASHBOARD_HREF;
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Shell state: the page being shown and which panels are open.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Href of the active admin page.
    pub active: RwSignal<String>,
    pub left_open: RwSignal<bool>,
    pub sidebar_editor_open: RwSignal<bool>,
    pub dashboard_editor_open: RwSignal<bool>,
}

fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(DASHBOARD_HREF.to_string()),
            left_open: RwSignal::new(true),
            sidebar_editor_open: RwSignal::new(false),
            dashboard_editor_open: RwSignal::new(false),
        }
    }

    /// Restores the active page from `?active=` and keeps the query string in
    /// sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active) = params.get("active") {
            if !active.is_empty() && !is_external(active) {
                self.active.set(active.clone());
            }
        }

        let this = *self;
        Effect::new(move |_| {
            let active = this.active.get();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), active)])).unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    /// Opens an admin page, or a new browser tab for absolute links.
    pub fn navigate(&self, href: &str) {
        if is_external(href) {
            if let Some(w) = window() {
                let _ = w.open_with_url_and_target(href, "_blank");
            }
            return;
        }
        log::debug!("navigate: {}", href);
        self.active.set(href.to_string());
    }

    pub fn is_active(&self, href: &str) -> bool {
        self.active.with(|active| active == href)
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    pub fn open_sidebar_editor(&self) {
        self.dashboard_editor_open.set(false);
        self.sidebar_editor_open.set(true);
    }

    pub fn open_dashboard_editor(&self) {
        self.sidebar_editor_open.set(false);
        self.dashboard_editor_open.set(true);
    }

    pub fn close_editors(&self) {
        self.sidebar_editor_open.set(false);
        self.dashboard_editor_open.set(false);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_links() {
        assert!(is_external("https://status.example.com"));
        assert!(is_external("//cdn.example.com/x"));
        assert!(!is_external("/admin/orders"));
    }
}
