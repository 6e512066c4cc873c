use super::{badge, placeholder_row, refetch_error};
use crate::components::form::{enum_options, input_value, selected};
use crate::components::notice::NoticeBanner;
use crate::hooks::{ActionHandle, use_admin_action, use_list_query};
use shared::actions::AdminAction;
use shared::format::{money, or_dash};
use shared::models::{Driver, DriverFilter, DriverStatus};
use shared::query::{Criteria, Drivers};
use yew::prelude::*;

/// Actions offered for a driver in its current state.
fn driver_actions(driver: &Driver) -> Vec<(AdminAction, &'static str, &'static str)> {
    let driver_id = driver.id.clone();
    match driver.status() {
        DriverStatus::AwaitingApproval => vec![(
            AdminAction::ApproveDriver { driver_id },
            "btn btn-success",
            "موافقة",
        )],
        DriverStatus::Blocked => vec![(
            AdminAction::UnblockDriver { driver_id },
            "btn btn-success",
            "رفع الحظر",
        )],
        DriverStatus::Online | DriverStatus::Offline => {
            vec![(AdminAction::BlockDriver { driver_id }, "btn btn-danger", "حظر")]
        }
    }
}

fn action_buttons(driver: &Driver, actions: &ActionHandle) -> Html {
    driver_actions(driver)
        .into_iter()
        .map(|(action, class, label)| {
            let disabled = actions.is_in_flight(&action);
            let onclick = {
                let actions = actions.clone();
                Callback::from(move |_: MouseEvent| actions.request(action.clone()))
            };
            html! { <button {class} {disabled} {onclick}>{label}</button> }
        })
        .collect()
}

#[function_component(DriversPage)]
pub fn drivers_page() -> Html {
    let list = use_list_query::<Drivers, _>(Criteria::default);
    let actions = {
        let list = list.clone();
        use_admin_action(Callback::from(move |()| list.refresh()))
    };

    let on_filter = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            if let Some(filter) = selected::<DriverFilter>(&event) {
                list.update(|query| query.set_filter(filter));
            }
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
    let on_dismiss = {
        let actions = actions.clone();
        Callback::from(move |()| actions.set_notice(None))
    };

    let on_retry = list.retry_callback();
    let query = list.read();
    let criteria = query.criteria();
    let drivers = query.visible();

    let rows = drivers.iter().map(|driver| {
        let status = driver.status();
        let owes = driver.pending_settlement > 0.0;
        html! {
            <tr key={driver.id.clone()} class={classes!(owes.then_some("highlight"))}>
                <td>{or_dash(driver.name())}<br /><small>{or_dash(driver.phone())}</small></td>
                <td>{or_dash(driver.plate_number.as_deref())}</td>
                <td>{driver.rating.map_or_else(|| "-".to_string(), |rating| format!("{rating:.1} ⭐"))}</td>
                <td>{driver.total_deliveries.to_string()}</td>
                <td>
                    if owes {
                        <strong style="color: #dc2626">{money(driver.pending_settlement)}</strong>
                    } else {
                        {money(driver.pending_settlement)}
                    }
                </td>
                <td>{badge(status.label(), status.tone())}</td>
                <td>{action_buttons(driver, &actions)}</td>
            </tr>
        }
    });

    html! {
        <div>
            <h1>{"السائقين"}</h1>
            <NoticeBanner notice={actions.notice()} on_dismiss={Some(on_dismiss)} />
            <div class="toolbar">
                <select onchange={on_filter}>
                    {enum_options(criteria.filter, DriverFilter::label)}
                </select>
                <input
                    type="search"
                    placeholder="بحث بالاسم أو الهاتف..."
                    value={criteria.search.clone()}
                    oninput={on_search}
                />
            </div>
            {refetch_error(query.phase(), drivers.is_empty(), &on_retry)}
            <table>
                <thead>
                    <tr>
                        <th>{"السائق"}</th>
                        <th>{"رقم اللوحة"}</th>
                        <th>{"التقييم"}</th>
                        <th>{"التوصيلات"}</th>
                        <th>{"المستحقات"}</th>
                        <th>{"الحالة"}</th>
                        <th>{"إجراءات"}</th>
                    </tr>
                </thead>
                <tbody>
                    {placeholder_row(query.phase(), drivers.is_empty(), 7, "لا يوجد سائقون", &on_retry).unwrap_or_else(|| rows.collect())}
                </tbody>
            </table>
            {actions.dialog()}
        </div>
    }
}
