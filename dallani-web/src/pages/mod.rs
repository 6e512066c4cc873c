pub mod audit_logs;
pub mod customers;
pub mod dashboard;
pub mod disputes;
pub mod drivers;
pub mod error;
pub mod invoices;
pub mod login;
pub mod orders;
pub mod ratings;
pub mod settings;
pub mod settlements;

pub use audit_logs::AuditLogsPage;
pub use customers::CustomersPage;
pub use dashboard::DashboardPage;
pub use disputes::DisputesPage;
pub use drivers::DriversPage;
pub use error::ErrorPage;
pub use invoices::InvoicesPage;
pub use orders::OrdersPage;
pub use ratings::RatingsPage;
pub use settings::SettingsPage;
pub use settlements::SettlementsPage;

use crate::components::loading::Loading;
use chrono::NaiveDate;
use shared::messages;
use shared::models::BadgeTone;
use shared::query::Phase;
use yew::{Callback, Html, MouseEvent, html};

/// Status pill used by every table.
pub(crate) fn badge(label: &str, tone: BadgeTone) -> Html {
    html! { <span class={tone.class()}>{label.to_string()}</span> }
}

/// Table body placeholder while loading, after a failure, or when empty.
/// `None` when the rows should be shown.
pub(crate) fn placeholder_row(
    phase: &Phase,
    is_empty: bool,
    columns: usize,
    empty: &str,
    on_retry: &Callback<MouseEvent>,
) -> Option<Html> {
    let colspan = columns.to_string();
    let content = match phase {
        Phase::Loading | Phase::Idle if is_empty => html! { <Loading /> },
        Phase::Failed(message) if is_empty => html! {
            <span class="notice notice-error">
                {message.clone()}
                {retry_button(on_retry)}
            </span>
        },
        _ if is_empty => html! { <span>{empty.to_string()}</span> },
        _ => return None,
    };
    Some(html! { <tr><td {colspan}>{content}</td></tr> })
}

/// Error banner for a failed refetch that kept the previous rows.
pub(crate) fn refetch_error(phase: &Phase, is_empty: bool, on_retry: &Callback<MouseEvent>) -> Html {
    match phase {
        Phase::Failed(message) if !is_empty => html! {
            <div class="notice notice-error">
                <span>{message.clone()}</span>
                {retry_button(on_retry)}
            </div>
        },
        _ => html! {},
    }
}

fn retry_button(on_retry: &Callback<MouseEvent>) -> Html {
    html! {
        <button class="btn btn-secondary" onclick={on_retry.clone()}>
            <i class="fas fa-redo"></i>{" "}{messages::RETRY}
        </button>
    }
}

/// Parses an `<input type="date">` value; empty clears the date.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub(crate) fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string()).unwrap_or_default()
}
