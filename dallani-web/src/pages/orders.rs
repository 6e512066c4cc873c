use super::{badge, date_value, parse_date, placeholder_row, refetch_error};
use crate::api;
use crate::components::form::{input_value, select_value};
use crate::components::modal::Modal;
use crate::hooks::use_list_query;
use shared::format::{display_timestamp, money, or_dash, short_id};
use shared::models::{Order, OrderStatus};
use shared::query::{Criteria, Effect, Orders};
use strum::IntoEnumIterator;
use yew::prelude::*;

fn price(amount: Option<f64>) -> String {
    amount.map_or_else(|| "-".to_string(), money)
}

#[function_component(OrdersPage)]
pub fn orders_page() -> Html {
    let list = use_list_query::<Orders, _>(Criteria::default);

    let on_status = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            let status = select_value(&event).and_then(|value| value.parse::<OrderStatus>().ok());
            list.update(|query| query.set_filter(status));
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
    let on_close = {
        let list = list.clone();
        Callback::from(move |()| {
            list.update(|query| {
                query.select(None);
                Effect::None
            });
        })
    };

    let on_retry = list.retry_callback();
    let query = list.read();
    let criteria = query.criteria();
    let orders = query.visible();
    let status_options = OrderStatus::iter().map(|status| {
        html! {
            <option value={status.as_ref().to_string()} selected={criteria.filter == Some(status)}>
                {status.filter_label()}
            </option>
        }
    });

    let rows = orders.iter().map(|order| {
        let (label, tone) = order.status_badge();
        let on_view = {
            let list = list.clone();
            let order = (*order).clone();
            Callback::from(move |_: MouseEvent| {
                let order = order.clone();
                list.update(|query| {
                    query.select(Some(order));
                    Effect::None
                });
            })
        };
        html! {
            <tr key={order.id.clone()}>
                <td>{format!("#{}", short_id(&order.id))}</td>
                <td>{or_dash(order.customer_name())}</td>
                <td>{or_dash(order.items_text.as_deref())}</td>
                <td>{or_dash(order.driver_name())}</td>
                <td>{price(order.estimated_price)}</td>
                <td>{badge(&label, tone)}</td>
                <td>{display_timestamp(order.created_at.as_deref())}</td>
                <td>
                    <button class="btn btn-secondary" onclick={on_view}>
                        <i class="fas fa-eye"></i>{" عرض"}
                    </button>
                    if order.invoice_image_url.as_deref().is_some_and(|url| !url.is_empty()) {
                        {" "}<i class="fas fa-file-invoice" title="فاتورة"></i>
                    }
                </td>
            </tr>
        }
    });

    let details = query.selected().map(|order| order_details(order, on_close.clone()));

    html! {
        <div>
            <h1>{"الطلبات"}</h1>
            <div class="toolbar">
                <select onchange={on_status}>
                    <option value="" selected={criteria.filter.is_none()}>{"جميع الطلبات"}</option>
                    {for status_options}
                </select>
                <input type="date" value={date_value(criteria.date)} oninput={on_date} />
                <input
                    type="search"
                    placeholder="بحث برقم الطلب أو المحتوى..."
                    value={criteria.search.clone()}
                    oninput={on_search}
                />
            </div>
            {refetch_error(query.phase(), orders.is_empty(), &on_retry)}
            <table>
                <thead>
                    <tr>
                        <th>{"رقم الطلب"}</th>
                        <th>{"الزبون"}</th>
                        <th>{"الطلب"}</th>
                        <th>{"السائق"}</th>
                        <th>{"السعر"}</th>
                        <th>{"الحالة"}</th>
                        <th>{"التاريخ"}</th>
                        <th>{"إجراءات"}</th>
                    </tr>
                </thead>
                <tbody>
                    {placeholder_row(query.phase(), orders.is_empty(), 8, "لا توجد طلبات", &on_retry).unwrap_or_else(|| rows.collect())}
                </tbody>
            </table>
            {for details}
        </div>
    }
}

fn order_details(order: &Order, on_close: Callback<()>) -> Html {
    let (label, tone) = order.status_badge();
    let image = order
        .invoice_image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| api::client().asset_url(url));

    html! {
        <Modal title={format!("تفاصيل الطلب #{}", short_id(&order.id))} {on_close}>
            <p><strong>{"الزبون: "}</strong>{or_dash(order.customer_name())}{" "}{or_dash(order.customer_phone())}</p>
            <p><strong>{"الطلب: "}</strong>{or_dash(order.items_text.as_deref())}</p>
            <p><strong>{"السائق: "}</strong>{or_dash(order.driver_name())}</p>
            <p><strong>{"السعر: "}</strong>{price(order.estimated_price)}</p>
            <p><strong>{"رسوم التوصيل: "}</strong>{price(order.delivery_fee)}</p>
            <p><strong>{"الحالة: "}</strong>{badge(&label, tone)}</p>
            if let Some(src) = image {
                <p><strong>{"صورة الفاتورة:"}</strong></p>
                <img {src} alt="فاتورة" style="max-width: 100%" />
            }
        </Modal>
    }
}
