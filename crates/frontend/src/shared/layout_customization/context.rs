use super::events::{dispatch_layout_changed, listen_layout_changed};
use super::scheduler::NextTick;
use super::settings::load_settings;
use super::storage::{BrowserStorage, KeyValueStorage, MemoryStorage};
use super::store::{ChangeSet, LayoutStore};
use crate::dashboards::d100_admin_overview::defaults::default_blocks;
use crate::shared::navigation::default_sidebar;
use crate::system::auth::storage::get_permissions;
use contracts::shared::layout::{dashboard, sidebar, DashboardElement, LayoutError, SidebarItem, TimePeriod};
use leptos::prelude::*;
use std::sync::Arc;

/// Reactive view of the layout store.
///
/// Signals are refreshed right after each mutation so the editors respond
/// immediately, and again on every store commit (including reloads caused by
/// other views).
#[derive(Clone, Copy)]
pub struct LayoutContext {
    pub store: StoredValue<LayoutStore>,
    pub sidebar: RwSignal<Vec<SidebarItem>>,
    pub dashboard: RwSignal<Vec<DashboardElement>>,
    pub time_period: RwSignal<TimePeriod>,
    /// Live navigation and block sets captured at `init`. Renderers skip
    /// persisted built-in entries that are not in them.
    pub sidebar_defaults: StoredValue<Vec<SidebarItem>>,
    pub dashboard_defaults: StoredValue<Vec<DashboardElement>>,
}

impl LayoutContext {
    pub fn new(store: LayoutStore) -> Self {
        Self {
            sidebar: RwSignal::new(store.sidebar()),
            dashboard: RwSignal::new(store.dashboard()),
            time_period: RwSignal::new(store.time_period()),
            sidebar_defaults: StoredValue::new(store.sidebar_defaults()),
            dashboard_defaults: StoredValue::new(store.dashboard_defaults()),
            store: StoredValue::new(store),
        }
    }

    fn sync_from(&self, store: &LayoutStore, changed: ChangeSet) {
        if changed.sidebar {
            self.sidebar.set(store.sidebar());
        }
        if changed.dashboard {
            self.dashboard.set(store.dashboard());
        }
        if changed.time_period {
            self.time_period.set(store.time_period());
        }
    }

    /// Sidebar entries that can be rendered for the current user.
    pub fn resolved_sidebar(&self) -> Vec<SidebarItem> {
        let items = self.sidebar.get();
        self.sidebar_defaults.with_value(|defaults| sidebar::resolvable(&items, defaults))
    }

    /// Dashboard blocks that can be rendered for the current user.
    pub fn resolved_dashboard(&self) -> Vec<DashboardElement> {
        let blocks = self.dashboard.get();
        self.dashboard_defaults.with_value(|defaults| dashboard::resolvable_blocks(&blocks, defaults))
    }

    fn sync(&self, changed: ChangeSet) {
        self.store.with_value(|store| self.sync_from(store, changed));
    }

    pub fn mutate_sidebar(&self, f: impl FnOnce(&[SidebarItem]) -> Vec<SidebarItem>) {
        self.store.with_value(|store| store.mutate_sidebar(f));
        self.sync(ChangeSet::SIDEBAR);
    }

    pub fn try_mutate_sidebar(
        &self,
        f: impl FnOnce(&[SidebarItem]) -> Result<Vec<SidebarItem>, LayoutError>,
    ) -> Result<(), LayoutError> {
        self.store.with_value(|store| store.try_mutate_sidebar(f))?;
        self.sync(ChangeSet::SIDEBAR);
        Ok(())
    }

    pub fn mutate_dashboard(&self, f: impl FnOnce(&[DashboardElement]) -> Vec<DashboardElement>) {
        self.store.with_value(|store| store.mutate_dashboard(f));
        self.sync(ChangeSet::DASHBOARD);
    }

    pub fn try_mutate_dashboard(
        &self,
        f: impl FnOnce(&[DashboardElement]) -> Result<Vec<DashboardElement>, LayoutError>,
    ) -> Result<(), LayoutError> {
        self.store.with_value(|store| store.try_mutate_dashboard(f))?;
        self.sync(ChangeSet::DASHBOARD);
        Ok(())
    }

    pub fn set_time_period(&self, period: TimePeriod) {
        self.store.with_value(|store| store.set_time_period(period));
        self.sync(ChangeSet::TIME_PERIOD);
    }

    pub fn reset_sidebar(&self) {
        self.store.with_value(|store| store.reset_sidebar());
        self.sync(ChangeSet::SIDEBAR);
    }

    pub fn reset_dashboard(&self) {
        self.store.with_value(|store| store.reset_dashboard());
        self.sync(ChangeSet::DASHBOARD);
    }
}

fn browser_or_memory_storage() -> Arc<dyn KeyValueStorage> {
    if BrowserStorage::is_available() {
        Arc::new(BrowserStorage)
    } else {
        log::warn!("localStorage unavailable, layout changes will not survive a reload");
        Arc::new(MemoryStorage::new())
    }
}

/// Creates the session's layout store and provides `LayoutContext`.
#[component]
pub fn LayoutCustomizationProvider(children: Children) -> impl IntoView {
    let store = LayoutStore::new(browser_or_memory_storage(), Arc::new(NextTick), load_settings(None));

    let permissions = get_permissions();
    store.init(default_sidebar(&permissions), default_blocks(&permissions));

    let context = LayoutContext::new(store.clone());
    let event_name = store.settings().change_event.clone();
    let origin = store.instance_id();

    {
        let event_name = event_name.clone();
        let subscriber_store = store.clone();
        store.subscribe(move |changed| {
            context.sync_from(&subscriber_store, changed);
            if !changed.external {
                dispatch_layout_changed(&event_name, origin);
            }
        });
    }

    {
        let store = store.clone();
        listen_layout_changed(&event_name, move |from| {
            if from != origin {
                store.reload();
            }
        });
    }

    provide_context(context);

    children()
}

/// Hook to use the layout context.
pub fn use_layout() -> LayoutContext {
    use_context::<LayoutContext>()
        .expect("LayoutContext not found. Wrap your app with LayoutCustomizationProvider.")
}
