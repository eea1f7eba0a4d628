use crate::shared::layout_customization::use_layout;
use chrono::{Local, NaiveDate};
use contracts::shared::layout::TimePeriod;
use leptos::prelude::*;

fn range_caption(period: TimePeriod, today: NaiveDate) -> String {
    match period.date_range(today) {
        Some((from, to)) if from == to => from.format("%d %b %Y").to_string(),
        Some((from, to)) => format!("{} to {}", from.format("%d %b"), to.format("%d %b %Y")),
        None => "Pick dates in each report".to_string(),
    }
}

/// Default reporting period selector, persisted with the layout.
#[component]
pub fn TimePeriodSelect() -> impl IntoView {
    let ctx = use_layout();
    let today = Local::now().date_naive();

    view! {
        <div class="time-period-select">
            <select on:change=move |ev| {
                if let Some(period) = TimePeriod::parse(&event_target_value(&ev)) {
                    ctx.set_time_period(period);
                }
            }>
                {TimePeriod::all().into_iter().map(|p| view! {
                    <option value=p.as_str() selected=move || ctx.time_period.get() == p>{p.label()}</option>
                }).collect_view()}
            </select>
            <span class="time-period-select__range">
                {move || range_caption(ctx.time_period.get(), today)}
            </span>
        </div>
    }
}
