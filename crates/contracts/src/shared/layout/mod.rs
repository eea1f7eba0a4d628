//! Layout customization model shared by the admin frontend.
//!
//! Sidebar navigation items (two fixed levels), dashboard blocks and the
//! default time period preference, together with the pure operations that
//! reorder and mutate them and the decoding of persisted snapshots.

pub mod dashboard;
pub mod entry;
pub mod error;
pub mod sidebar;
pub mod snapshot;
pub mod time_period;

// Re-exports
pub use dashboard::{
    BlockType, BlockWidth, ButtonDraft, DashboardButton, DashboardElement, NewDashboardBlock,
};
pub use entry::{reindex, reorder, sort_by_order, LayoutEntry};
pub use error::LayoutError;
pub use sidebar::{NewSidebarItem, SidebarItem, SidebarSubmenuItem};
pub use snapshot::{Reconciled, SnapshotSource, SnapshotStatus};
pub use time_period::TimePeriod;
