use leptos::ev::DragEvent;
use leptos::prelude::*;

/// Drag gesture state for one editor: the dragged id and the row under the
/// cursor. Dropping hands `(source, target)` to the reorder engine, which
/// ignores pairs from different sibling lists.
#[derive(Clone, Copy)]
pub struct DragState {
    source: RwSignal<Option<String>>,
    over: RwSignal<Option<String>>,
}

impl DragState {
    pub fn new() -> Self {
        Self {
            source: RwSignal::new(None),
            over: RwSignal::new(None),
        }
    }

    pub fn start(&self, id: &str, ev: &DragEvent) {
        ev.stop_propagation();
        // Firefox does not start a drag without data
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", id);
            dt.set_effect_allowed("move");
        }
        self.source.set(Some(id.to_string()));
    }

    pub fn enter(&self, id: &str, ev: &DragEvent) {
        ev.prevent_default();
        ev.stop_propagation();
        if self.over.get_untracked().as_deref() != Some(id) {
            self.over.set(Some(id.to_string()));
        }
    }

    /// Ends the gesture and returns the pair to reorder, if any.
    pub fn drop_on(&self, id: &str, ev: &DragEvent) -> Option<(String, String)> {
        ev.prevent_default();
        ev.stop_propagation();
        let source = self.source.get_untracked();
        self.cancel();
        source.map(|s| (s, id.to_string()))
    }

    pub fn cancel(&self) {
        self.source.set(None);
        self.over.set(None);
    }

    pub fn is_source(&self, id: &str) -> bool {
        self.source.with(|s| s.as_deref() == Some(id))
    }

    pub fn is_over(&self, id: &str) -> bool {
        self.over.with(|o| o.as_deref() == Some(id))
    }
}

impl Default for DragState {
    fn default() -> Self {
        Self::new()
    }
}
