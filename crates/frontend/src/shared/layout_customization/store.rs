//! Layout store: the single owner of the sidebar layout, the dashboard block
//! list and the default time period of one admin session.
//!
//! Lifecycle: `init` → `sidebar`/`dashboard`/`time_period` reads →
//! `mutate_*` → deferred coalesced write + notification → `reset_*`.
//! Writes never happen inside the mutating call: they are handed to the
//! `DeferScheduler`, and every mutation before the deferred task runs is
//! folded into one write per collection carrying the latest value.

use super::scheduler::DeferScheduler;
use super::settings::CustomizationSettings;
use super::storage::KeyValueStorage;
use contracts::shared::layout::snapshot::{self, SnapshotStatus};
use contracts::shared::layout::{DashboardElement, LayoutError, SidebarItem, TimePeriod};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Which collections a commit touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub sidebar: bool,
    pub dashboard: bool,
    pub time_period: bool,
    /// Raised by `reload` after another view wrote the store.
    pub external: bool,
}

impl ChangeSet {
    pub const SIDEBAR: ChangeSet = ChangeSet {
        sidebar: true,
        dashboard: false,
        time_period: false,
        external: false,
    };
    pub const DASHBOARD: ChangeSet = ChangeSet {
        sidebar: false,
        dashboard: true,
        time_period: false,
        external: false,
    };
    pub const TIME_PERIOD: ChangeSet = ChangeSet {
        sidebar: false,
        dashboard: false,
        time_period: true,
        external: false,
    };

    pub fn is_empty(&self) -> bool {
        !(self.sidebar || self.dashboard || self.time_period)
    }

    fn merge(&mut self, other: ChangeSet) {
        self.sidebar |= other.sidebar;
        self.dashboard |= other.dashboard;
        self.time_period |= other.time_period;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Arc<dyn Fn(ChangeSet) + Send + Sync>;

#[derive(Default)]
struct StoreState {
    sidebar: Vec<SidebarItem>,
    dashboard: Vec<DashboardElement>,
    time_period: TimePeriod,
    sidebar_defaults: Vec<SidebarItem>,
    dashboard_defaults: Vec<DashboardElement>,
    dirty: ChangeSet,
    flush_scheduled: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

#[derive(Clone)]
pub struct LayoutStore {
    id: u64,
    state: Arc<Mutex<StoreState>>,
    storage: Arc<dyn KeyValueStorage>,
    scheduler: Arc<dyn DeferScheduler>,
    settings: Arc<CustomizationSettings>,
}

impl LayoutStore {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        scheduler: Arc<dyn DeferScheduler>,
        settings: CustomizationSettings,
    ) -> Self {
        Self {
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            state: Arc::new(Mutex::new(StoreState::default())),
            storage,
            scheduler,
            settings: Arc::new(settings),
        }
    }

    /// Identifies this store in cross-view change events.
    pub fn instance_id(&self) -> u64 {
        self.id
    }

    pub fn settings(&self) -> &CustomizationSettings {
        &self.settings
    }

    /// Block count below which a persisted dashboard counts as outdated,
    /// capped by how many blocks the user is offered at all.
    fn dashboard_threshold(&self, default_count: usize) -> usize {
        self.settings.min_dashboard_blocks.min(default_count)
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Captures the default snapshots and loads the persisted layout.
    ///
    /// A missing, malformed or outdated persisted collection is replaced by
    /// its defaults, which are written back right away.
    pub fn init(&self, sidebar_defaults: Vec<SidebarItem>, dashboard_defaults: Vec<DashboardElement>) {
        let keys = &self.settings.storage;

        let sidebar_status = snapshot::decode_sidebar(self.storage.get_item(&keys.sidebar).as_deref());
        log_status("sidebar", &sidebar_status);
        let sidebar = snapshot::reconcile(sidebar_status, &sidebar_defaults);

        let dashboard_status = snapshot::decode_dashboard(
            self.storage.get_item(&keys.dashboard).as_deref(),
            self.dashboard_threshold(dashboard_defaults.len()),
        );
        log_status("dashboard", &dashboard_status);
        let dashboard = snapshot::reconcile(dashboard_status, &dashboard_defaults);

        let time_period = snapshot::decode_time_period(self.storage.get_item(&keys.time_period).as_deref())
            .unwrap_or_default();

        log::debug!(
            "Layout store #{} initialised: sidebar from {:?}, dashboard from {:?}",
            self.id,
            sidebar.source,
            dashboard.source
        );

        if sidebar.needs_persist {
            self.write(&keys.sidebar, &sidebar.items);
        }
        if dashboard.needs_persist {
            self.write(&keys.dashboard, &dashboard.items);
        }

        let mut state = self.state();
        state.sidebar = sidebar.items;
        state.dashboard = dashboard.items;
        state.time_period = time_period;
        state.sidebar_defaults = sidebar_defaults;
        state.dashboard_defaults = dashboard_defaults;
    }

    /// Re-reads the persisted collections after another view committed.
    /// Invalid or missing values leave the in-memory state untouched.
    pub fn reload(&self) {
        let keys = &self.settings.storage;
        let default_count = self.state().dashboard_defaults.len();
        let sidebar = snapshot::decode_sidebar(self.storage.get_item(&keys.sidebar).as_deref());
        let dashboard = snapshot::decode_dashboard(
            self.storage.get_item(&keys.dashboard).as_deref(),
            self.dashboard_threshold(default_count),
        );
        let time_period = snapshot::decode_time_period(self.storage.get_item(&keys.time_period).as_deref());

        let mut changed = ChangeSet {
            external: true,
            ..ChangeSet::default()
        };
        let listeners = {
            let mut state = self.state();
            if let SnapshotStatus::Valid(items) = sidebar {
                if items != state.sidebar {
                    state.sidebar = items;
                    changed.sidebar = true;
                }
            }
            if let SnapshotStatus::Valid(blocks) = dashboard {
                if blocks != state.dashboard {
                    state.dashboard = blocks;
                    changed.dashboard = true;
                }
            }
            if let Some(period) = time_period {
                if period != state.time_period {
                    state.time_period = period;
                    changed.time_period = true;
                }
            }
            listener_list(&state)
        };
        if !changed.is_empty() {
            notify(&listeners, changed);
        }
    }

    pub fn sidebar(&self) -> Vec<SidebarItem> {
        self.state().sidebar.clone()
    }

    pub fn dashboard(&self) -> Vec<DashboardElement> {
        self.state().dashboard.clone()
    }

    pub fn time_period(&self) -> TimePeriod {
        self.state().time_period
    }

    pub fn sidebar_defaults(&self) -> Vec<SidebarItem> {
        self.state().sidebar_defaults.clone()
    }

    pub fn dashboard_defaults(&self) -> Vec<DashboardElement> {
        self.state().dashboard_defaults.clone()
    }

    /// Applies a pure transform to the sidebar layout.
    pub fn mutate_sidebar(&self, f: impl FnOnce(&[SidebarItem]) -> Vec<SidebarItem>) {
        let _ = self.try_mutate_sidebar(|items| Ok(f(items)));
    }

    /// Applies a fallible transform; on error nothing changes.
    pub fn try_mutate_sidebar(
        &self,
        f: impl FnOnce(&[SidebarItem]) -> Result<Vec<SidebarItem>, LayoutError>,
    ) -> Result<(), LayoutError> {
        let changed = {
            let mut state = self.state();
            let next = f(&state.sidebar)?;
            let changed = next != state.sidebar;
            state.sidebar = next;
            changed
        };
        if changed {
            self.schedule_flush(ChangeSet::SIDEBAR);
        }
        Ok(())
    }

    pub fn mutate_dashboard(&self, f: impl FnOnce(&[DashboardElement]) -> Vec<DashboardElement>) {
        let _ = self.try_mutate_dashboard(|blocks| Ok(f(blocks)));
    }

    pub fn try_mutate_dashboard(
        &self,
        f: impl FnOnce(&[DashboardElement]) -> Result<Vec<DashboardElement>, LayoutError>,
    ) -> Result<(), LayoutError> {
        let changed = {
            let mut state = self.state();
            let next = f(&state.dashboard)?;
            let changed = next != state.dashboard;
            state.dashboard = next;
            changed
        };
        if changed {
            self.schedule_flush(ChangeSet::DASHBOARD);
        }
        Ok(())
    }

    pub fn set_time_period(&self, period: TimePeriod) {
        let changed = {
            let mut state = self.state();
            let changed = state.time_period != period;
            state.time_period = period;
            changed
        };
        if changed {
            self.schedule_flush(ChangeSet::TIME_PERIOD);
        }
    }

    /// Reinstates the sidebar snapshot captured by the last `init`.
    pub fn reset_sidebar(&self) {
        {
            let mut state = self.state();
            state.sidebar = state.sidebar_defaults.clone();
        }
        log::info!("Sidebar layout reset to defaults");
        self.storage.remove_item(&self.settings.storage.sidebar);
        self.schedule_flush(ChangeSet::SIDEBAR);
    }

    /// Reinstates the dashboard snapshot captured by the last `init`.
    pub fn reset_dashboard(&self) {
        {
            let mut state = self.state();
            state.dashboard = state.dashboard_defaults.clone();
        }
        log::info!("Dashboard layout reset to defaults");
        self.storage.remove_item(&self.settings.storage.dashboard);
        self.schedule_flush(ChangeSet::DASHBOARD);
    }

    pub fn subscribe(&self, listener: impl Fn(ChangeSet) + Send + Sync + 'static) -> SubscriptionId {
        let mut state = self.state();
        state.next_subscription += 1;
        let id = SubscriptionId(state.next_subscription);
        state.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state().listeners.retain(|(sid, _)| *sid != id);
    }

    fn schedule_flush(&self, changed: ChangeSet) {
        let schedule = {
            let mut state = self.state();
            state.dirty.merge(changed);
            !std::mem::replace(&mut state.flush_scheduled, true)
        };
        if schedule {
            let store = self.clone();
            self.scheduler.defer(Box::new(move || store.flush()));
        }
    }

    /// Writes every dirty collection once and notifies listeners.
    fn flush(&self) {
        let (dirty, sidebar, dashboard, time_period, listeners) = {
            let mut state = self.state();
            state.flush_scheduled = false;
            let dirty = std::mem::take(&mut state.dirty);
            (
                dirty,
                dirty.sidebar.then(|| state.sidebar.clone()),
                dirty.dashboard.then(|| state.dashboard.clone()),
                state.time_period,
                listener_list(&state),
            )
        };
        if dirty.is_empty() {
            return;
        }

        let keys = &self.settings.storage;
        if let Some(items) = sidebar {
            self.write(&keys.sidebar, &items);
        }
        if let Some(blocks) = dashboard {
            self.write(&keys.dashboard, &blocks);
        }
        if dirty.time_period {
            self.storage.set_item(&keys.time_period, time_period.as_str());
        }
        log::debug!("Layout store #{} committed {:?}", self.id, dirty);

        notify(&listeners, dirty);
    }

    fn write<T: Serialize>(&self, key: &str, items: &[T]) {
        match snapshot::encode(items) {
            Ok(raw) => self.storage.set_item(key, &raw),
            Err(e) => log::error!("Failed to serialize layout '{}': {}", key, e),
        }
    }
}

fn listener_list(state: &StoreState) -> Vec<Listener> {
    state.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
}

fn notify(listeners: &[Listener], changed: ChangeSet) {
    for listener in listeners {
        listener(changed);
    }
}

fn log_status<T>(collection: &str, status: &SnapshotStatus<T>) {
    match status {
        SnapshotStatus::Malformed(reason) => {
            log::warn!("Persisted {} layout is malformed, using defaults: {}", collection, reason)
        }
        SnapshotStatus::Incompatible(reason) => {
            log::info!("Persisted {} layout is outdated, using defaults: {}", collection, reason)
        }
        SnapshotStatus::Missing | SnapshotStatus::Valid(_) => {}
    }
}
