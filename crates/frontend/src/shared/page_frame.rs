//! PageFrame: standard root wrapper for every admin page rendered in the
//! content area.

use leptos::prelude::*;

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";
pub const PAGE_CAT_SETTINGS: &str = "settings";
pub const PAGE_CAT_SECTION: &str = "section";

/// Sets `id` and `data-page-category` on the page root and adds the BEM
/// modifier for the category.
#[component]
pub fn PageFrame(
    /// DOM id, derived from the page href.
    page_id: String,
    /// One of the PAGE_CAT_* constants.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_SETTINGS => "page page--settings",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}

/// `/admin/orders/list` becomes `admin-orders-list`.
pub fn page_id_for(href: &str) -> String {
    let id = href
        .trim_matches('/')
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if id.is_empty() {
        "page".to_string()
    } else {
        id
    }
}
