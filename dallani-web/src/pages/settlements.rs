use super::{badge, date_value, parse_date, placeholder_row, refetch_error};
use crate::components::form::input_value;
use crate::components::notice::{Notice, NoticeBanner};
use crate::components::stat_card::StatCard;
use crate::download::download_text;
use crate::hooks::{use_admin_action, use_list_query};
use chrono::Utc;
use shared::actions::AdminAction;
use shared::export::{CSV_MIME, settlements_csv, settlements_filename};
use shared::format::{money, or_dash};
use shared::models::BadgeTone;
use shared::query::{Criteria, Settlements};
use yew::prelude::*;

#[function_component(SettlementsPage)]
pub fn settlements_page() -> Html {
    let list = use_list_query::<Settlements, _>(|| Criteria {
        date: Some(Utc::now().date_naive()),
        ..Criteria::default()
    });
    let actions = {
        let list = list.clone();
        use_admin_action(Callback::from(move |()| list.refresh()))
    };

    let on_date = {
        let list = list.clone();
        Callback::from(move |event: InputEvent| {
            let date = input_value(&event).and_then(|value| parse_date(&value));
            // The report is always for one day.
            if date.is_some() {
                list.update(|query| query.set_date(date));
            }
        })
    };
    let on_export = {
        let list = list.clone();
        let actions = actions.clone();
        Callback::from(move |_: MouseEvent| {
            let query = list.read();
            let date = query.criteria().date.unwrap_or_else(|| Utc::now().date_naive());
            let result = settlements_csv(query.items())
                .map_err(|err| err.to_string())
                .and_then(|csv| download_text(&settlements_filename(date), CSV_MIME, &csv));
            if let Err(message) = result {
                actions.set_notice(Some(Notice::error(message)));
            }
        })
    };
    let on_dismiss = {
        let actions = actions.clone();
        Callback::from(move |()| actions.set_notice(None))
    };

    let on_retry = list.retry_callback();
    let query = list.read();
    let summary = query.summary();
    let drivers = query.items();

    let rows = drivers.iter().map(|driver| {
        let action = AdminAction::PaySettlement {
            driver_id: driver.id.clone(),
            driver_name: driver.name.clone().unwrap_or_else(|| driver.id.clone()),
        };
        let busy = actions.is_in_flight(&action);
        let onclick = {
            let actions = actions.clone();
            Callback::from(move |_: MouseEvent| actions.request(action.clone()))
        };
        let status = if driver.is_blocked {
            badge(driver.state_label(), BadgeTone::Danger)
        } else {
            badge(driver.state_label(), BadgeTone::Success)
        };
        html! {
            <tr key={driver.id.clone()} class={classes!(driver.is_highlighted().then_some("highlight"))}>
                <td>{or_dash(driver.name.as_deref())}</td>
                <td>{or_dash(driver.phone.as_deref())}</td>
                <td>
                    if driver.is_highlighted() {
                        <strong style="color: #dc2626">{money(driver.pending_settlement)}</strong>
                    } else {
                        {money(driver.pending_settlement)}
                    }
                </td>
                <td>{status}</td>
                <td>
                    <button class="btn btn-success" disabled={busy} {onclick}>
                        <i class="fas fa-check"></i>{" تمت التسوية"}
                    </button>
                </td>
            </tr>
        }
    });

    html! {
        <div>
            <h1>{"التسويات اليومية"}</h1>
            <NoticeBanner notice={actions.notice()} on_dismiss={Some(on_dismiss)} />
            <div class="toolbar">
                <label>{"التاريخ: "}</label>
                <input type="date" value={date_value(query.criteria().date)} oninput={on_date} />
                <button class="btn btn-primary" onclick={on_export}>
                    <i class="fas fa-file-csv"></i>{" تصدير CSV"}
                </button>
            </div>
            <div class="stats-grid">
                <StatCard label="إجمالي المستحقات" value={money(summary.total_pending)} icon="fas fa-money-bill-wave" color="#dc2626" />
                <StatCard label="عدد السائقين" value={summary.drivers_count.to_string()} icon="fas fa-motorcycle" color="#2563eb" />
            </div>
            {refetch_error(query.phase(), drivers.is_empty(), &on_retry)}
            <table>
                <thead>
                    <tr>
                        <th>{"السائق"}</th>
                        <th>{"الهاتف"}</th>
                        <th>{"المبلغ المستحق"}</th>
                        <th>{"الحالة"}</th>
                        <th>{"إجراء"}</th>
                    </tr>
                </thead>
                <tbody>
                    {placeholder_row(query.phase(), drivers.is_empty(), 5, "لا توجد تسويات معلقة", &on_retry).unwrap_or_else(|| rows.collect())}
                </tbody>
            </table>
            {actions.dialog()}
        </div>
    }
}
