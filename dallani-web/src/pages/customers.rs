use super::{badge, placeholder_row, refetch_error};
use crate::components::form::{enum_options, input_value, selected};
use crate::components::notice::NoticeBanner;
use crate::components::stat_card::StatCard;
use crate::hooks::{use_admin_action, use_list_query};
use shared::actions::AdminAction;
use shared::format::{display_timestamp, or_dash};
use shared::models::{BadgeTone, CustomerFilter, CustomerSort, CustomerStats};
use shared::query::{Criteria, Customers};
use yew::prelude::*;

#[function_component(CustomersPage)]
pub fn customers_page() -> Html {
    let list = use_list_query::<Customers, _>(Criteria::default);
    let actions = {
        let list = list.clone();
        use_admin_action(Callback::from(move |()| list.refresh()))
    };

    let on_filter = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            if let Some(filter) = selected::<CustomerFilter>(&event) {
                list.update(|query| query.set_filter(filter));
            }
        })
    };
    let on_sort = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            if let Some(sort) = selected::<CustomerSort>(&event) {
                list.update(|query| query.set_sort(sort));
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
    let customers = query.visible();
    let stats = CustomerStats::from_customers(query.items());

    let rows = customers.iter().map(|customer| {
        let action = if customer.is_blocked {
            AdminAction::UnblockCustomer {
                customer_id: customer.id.clone(),
            }
        } else {
            AdminAction::BlockCustomer {
                customer_id: customer.id.clone(),
            }
        };
        let busy = actions.is_in_flight(&action);
        let (button_class, button_label) = if customer.is_blocked {
            ("btn btn-success", "رفع الحظر")
        } else {
            ("btn btn-danger", "حظر")
        };
        let onclick = {
            let actions = actions.clone();
            Callback::from(move |_: MouseEvent| actions.request(action.clone()))
        };
        let status = if customer.is_blocked {
            badge("محظور", BadgeTone::Danger)
        } else {
            badge("نشط", BadgeTone::Success)
        };
        html! {
            <tr key={customer.id.clone()}>
                <td>{customer.name.as_deref().unwrap_or("غير معروف")}</td>
                <td>{or_dash(customer.phone.as_deref())}</td>
                <td>{customer.orders_count.to_string()}</td>
                <td>{display_timestamp(customer.register_time.as_deref())}</td>
                <td>{status}</td>
                <td>
                    <button class={button_class} disabled={busy} {onclick}>{button_label}</button>
                </td>
            </tr>
        }
    });

    html! {
        <div>
            <h1>{"الزبائن"}</h1>
            <NoticeBanner notice={actions.notice()} on_dismiss={Some(on_dismiss)} />
            <div class="card">
                <h3>{"إحصائيات الزبائن"}</h3>
                <div class="stats-grid">
                    <StatCard label="إجمالي الزبائن" value={stats.total.to_string()} icon="fas fa-users" />
                    <StatCard label="زبائن لديهم طلبات" value={stats.with_orders.to_string()} icon="fas fa-shopping-bag" />
                    <StatCard label="زبائن بدون طلبات" value={stats.without_orders.to_string()} icon="fas fa-user-clock" />
                </div>
            </div>
            <div class="toolbar">
                <select onchange={on_filter}>
                    {enum_options(criteria.filter, CustomerFilter::label)}
                </select>
                <select onchange={on_sort}>
                    {enum_options(criteria.sort, CustomerSort::label)}
                </select>
                <input
                    type="search"
                    placeholder="بحث بالاسم أو الهاتف..."
                    value={criteria.search.clone()}
                    oninput={on_search}
                />
            </div>
            {refetch_error(query.phase(), customers.is_empty(), &on_retry)}
            <table>
                <thead>
                    <tr>
                        <th>{"الاسم"}</th>
                        <th>{"رقم الهاتف"}</th>
                        <th>{"عدد الطلبات"}</th>
                        <th>{"تاريخ التسجيل"}</th>
                        <th>{"الحالة"}</th>
                        <th>{"إجراءات"}</th>
                    </tr>
                </thead>
                <tbody>
                    {placeholder_row(query.phase(), customers.is_empty(), 6, "لا يوجد زبائن", &on_retry).unwrap_or_else(|| rows.collect())}
                </tbody>
            </table>
            {actions.dialog()}
        </div>
    }
}
