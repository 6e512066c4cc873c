use super::{date_value, parse_date, placeholder_row, refetch_error};
use crate::components::form::{input_value, select_value};
use crate::hooks::use_list_query;
use shared::format::{display_timestamp, or_dash};
use shared::messages;
use shared::models::{AuditAction, AuditFilter, AuditLogEntry};
use shared::query::{AuditLogs, Criteria};
use strum::IntoEnumIterator;
use yew::prelude::*;

fn action_cell(entry: &AuditLogEntry) -> Html {
    match entry.action() {
        Some(action) => html! {
            <span style={format!("color: {}", action.color())}>
                {action.icon()}{" "}{action.label()}
            </span>
        },
        None => html! { <span>{entry.action.clone().unwrap_or_else(|| messages::NOT_AVAILABLE.to_string())}</span> },
    }
}

#[function_component(AuditLogsPage)]
pub fn audit_logs_page() -> Html {
    let list = use_list_query::<AuditLogs, _>(Criteria::default);

    let on_action = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            let action = select_value(&event).and_then(|value| value.parse::<AuditAction>().ok());
            list.update(|query| query.set_filter(AuditFilter { action }));
        })
    };
    let on_date = {
        let list = list.clone();
        Callback::from(move |event: InputEvent| {
            let date = input_value(&event).and_then(|value| parse_date(&value));
            list.update(|query| query.set_date(date));
        })
    };
    let on_search = {
        let list = list.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                list.update(|query| query.set_search(value));
            }
        })
    };

    let on_retry = list.retry_callback();
    let query = list.read();
    let criteria = query.criteria();
    let entries = query.visible();
    let action_options = AuditAction::iter().map(|action| {
        html! {
            <option value={action.as_ref().to_string()} selected={criteria.filter.action == Some(action)}>
                {action.filter_label()}
            </option>
        }
    });

    let rows = entries.iter().map(|entry| {
        html! {
            <tr key={entry.id.clone()}>
                <td>{action_cell(entry)}</td>
                <td>
                    if entry.is_system() {
                        <i class="fas fa-robot"></i>{" "}
                    }
                    {or_dash(entry.admin.as_deref())}
                </td>
                <td>{or_dash(entry.target.as_deref())}</td>
                <td>{or_dash(entry.details.as_deref())}</td>
                <td>{display_timestamp(entry.created_at.as_deref())}</td>
            </tr>
        }
    });

    html! {
        <div>
            <h1>{"سجل العمليات"}</h1>
            <div class="toolbar">
                <select onchange={on_action}>
                    <option value="" selected={criteria.filter.action.is_none()}>{"جميع العمليات"}</option>
                    {for action_options}
                </select>
                <input type="date" value={date_value(criteria.date)} oninput={on_date} />
                <input type="search" placeholder="بحث..." value={criteria.search.clone()} oninput={on_search} />
            </div>
            {refetch_error(query.phase(), entries.is_empty(), &on_retry)}
            <table>
                <thead>
                    <tr>
                        <th>{"العملية"}</th>
                        <th>{"المنفذ"}</th>
                        <th>{"الهدف"}</th>
                        <th>{"التفاصيل"}</th>
                        <th>{"التاريخ"}</th>
                    </tr>
                </thead>
                <tbody>
                    {placeholder_row(query.phase(), entries.is_empty(), 5, "لا توجد سجلات", &on_retry).unwrap_or_else(|| rows.collect())}
                </tbody>
            </table>
        </div>
    }
}
