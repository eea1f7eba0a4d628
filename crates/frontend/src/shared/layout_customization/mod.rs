//! Sidebar and dashboard layout customization: the session store, its
//! storage and scheduling seams, and the editors.

pub mod context;
pub mod dashboard_editor;
pub mod drag;
pub mod events;
pub mod scheduler;
pub mod settings;
pub mod sidebar_editor;
pub mod storage;
pub mod store;

pub use context::{use_layout, LayoutContext, LayoutCustomizationProvider};
pub use dashboard_editor::DashboardEditor;
pub use sidebar_editor::SidebarEditor;
pub use store::{ChangeSet, LayoutStore, SubscriptionId};
