mod block;
mod dashboard;
mod time_period_select;

pub use dashboard::AdminOverviewDashboard;
pub use time_period_select::TimePeriodSelect;
