use super::{badge, placeholder_row, refetch_error};
use crate::api;
use crate::components::form::{enum_options, input_value, select_value, selected};
use crate::components::modal::Modal;
use crate::hooks::use_list_query;
use shared::format::{display_timestamp, money, or_dash, short_id};
use shared::models::{Invoice, InvoiceFilter, InvoiceState};
use shared::query::{Criteria, Invoices};
use std::collections::BTreeSet;
use yew::prelude::*;

/// Locations offered in the picker: every location seen in the current
/// page plus the selected one.
fn location_choices(invoices: &[Invoice], current: Option<&str>) -> BTreeSet<String> {
    invoices
        .iter()
        .filter_map(|invoice| invoice.location.clone())
        .chain(current.map(str::to_string))
        .filter(|location| !location.is_empty())
        .collect()
}

#[function_component(InvoicesPage)]
pub fn invoices_page() -> Html {
    let list = use_list_query::<Invoices, _>(Criteria::default);
    let preview = use_state(|| None::<Invoice>);

    let on_location = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            let location = select_value(&event).filter(|value| !value.is_empty());
            list.update(|query| {
                let filter = InvoiceFilter {
                    location,
                    ..query.criteria().filter.clone()
                };
                query.set_filter(filter)
            });
        })
    };
    let on_state = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            if let Some(state) = selected::<InvoiceState>(&event) {
                list.update(|query| {
                    let filter = InvoiceFilter {
                        state,
                        ..query.criteria().filter.clone()
                    };
                    query.set_filter(filter)
                });
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
    let on_close = {
        let preview = preview.clone();
        Callback::from(move |()| preview.set(None))
    };

    let on_retry = list.retry_callback();
    let query = list.read();
    let criteria = query.criteria();
    let invoices = query.visible();
    let current_location = criteria.filter.location.as_deref();
    let locations = location_choices(query.items(), current_location)
        .into_iter()
        .map(|location| {
            let is_current = current_location == Some(location.as_str());
            html! { <option value={location.clone()} selected={is_current}>{location}</option> }
        });

    let rows = invoices.iter().map(|invoice| {
        let (label, tone) = invoice.state_badge();
        let on_view = {
            let preview = preview.clone();
            let invoice = (*invoice).clone();
            Callback::from(move |_: MouseEvent| preview.set(Some(invoice.clone())))
        };
        let has_image = invoice.image_url.as_deref().is_some_and(|url| !url.is_empty());
        html! {
            <tr key={format!("{}-{}", invoice.location.as_deref().unwrap_or_default(), invoice.id)}>
                <td>{format!("#{}", short_id(&invoice.id))}</td>
                <td>{format!("#{}", short_id(&invoice.order_id))}</td>
                <td>{or_dash(invoice.driver.as_deref())}</td>
                <td>{or_dash(invoice.location.as_deref())}</td>
                <td>{money(invoice.amount)}</td>
                <td>{display_timestamp(invoice.uploaded_at.as_deref())}</td>
                <td>{badge(label, tone)}</td>
                <td>
                    if has_image {
                        <button class="btn btn-secondary" onclick={on_view}>
                            <i class="fas fa-image"></i>{" عرض الصورة"}
                        </button>
                    }
                </td>
            </tr>
        }
    });

    let image_modal = (*preview).as_ref().map(|invoice| {
        let src = invoice
            .image_url
            .as_deref()
            .map(|url| api::client().asset_url(url))
            .unwrap_or_default();
        html! {
            <Modal title="صورة الفاتورة" on_close={on_close.clone()}>
                <p><strong>{"المبلغ: "}</strong>{money(invoice.amount)}</p>
                <p><strong>{"السائق: "}</strong>{or_dash(invoice.driver.as_deref())}</p>
                <img {src} alt="فاتورة" style="max-width: 100%" />
            </Modal>
        }
    });

    html! {
        <div>
            <h1>{"الفواتير"}</h1>
            <div class="toolbar">
                <select onchange={on_location}>
                    <option value="" selected={current_location.is_none()}>{"جميع المواقع"}</option>
                    {for locations}
                </select>
                <select onchange={on_state}>
                    {enum_options(criteria.filter.state, InvoiceState::label)}
                </select>
                <input
                    type="search"
                    placeholder="بحث برقم الطلب..."
                    value={criteria.search.clone()}
                    oninput={on_search}
                />
            </div>
            {refetch_error(query.phase(), invoices.is_empty(), &on_retry)}
            <table>
                <thead>
                    <tr>
                        <th>{"رقم الفاتورة"}</th>
                        <th>{"رقم الطلب"}</th>
                        <th>{"السائق"}</th>
                        <th>{"الموقع"}</th>
                        <th>{"المبلغ"}</th>
                        <th>{"تاريخ الرفع"}</th>
                        <th>{"الحالة"}</th>
                        <th>{"إجراءات"}</th>
                    </tr>
                </thead>
                <tbody>
                    {placeholder_row(query.phase(), invoices.is_empty(), 8, "لا توجد فواتير", &on_retry).unwrap_or_else(|| rows.collect())}
                </tbody>
            </table>
            {for image_modal}
        </div>
    }
}
