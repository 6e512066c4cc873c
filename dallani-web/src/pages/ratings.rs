use super::{placeholder_row, refetch_error};
use crate::components::form::{enum_options, input_value, selected};
use crate::components::stat_card::StatCard;
use crate::hooks::use_list_query;
use shared::format::{display_timestamp, or_dash, short_id, stars};
use shared::models::{RatingFilter, RatingSummary};
use shared::query::{Criteria, Ratings};
use yew::prelude::*;

#[function_component(RatingsPage)]
pub fn ratings_page() -> Html {
    let list = use_list_query::<Ratings, _>(Criteria::default);

    let on_filter = {
        let list = list.clone();
        Callback::from(move |event: Event| {
            if let Some(filter) = selected::<RatingFilter>(&event) {
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

    let on_retry = list.retry_callback();
    let query = list.read();
    let criteria = query.criteria();
    let ratings = query.visible();
    let summary = RatingSummary::from_ratings(query.items());

    let rows = ratings.iter().map(|rating| {
        html! {
            <tr key={rating.id.clone()}>
                <td>{format!("#{}", short_id(&rating.order_id))}</td>
                <td>{or_dash(rating.customer.as_deref())}</td>
                <td>{or_dash(rating.driver.as_deref())}</td>
                <td class="stars">{stars(rating.stars())}</td>
                <td>{rating.comment.as_deref().filter(|comment| !comment.is_empty()).unwrap_or("بدون تعليق")}</td>
                <td>{display_timestamp(rating.created_at.as_deref())}</td>
            </tr>
        }
    });

    html! {
        <div>
            <h1>{"التقييمات"}</h1>
            <div class="stats-grid">
                <StatCard label="متوسط التقييم" value={format!("{:.1}", summary.average)} icon="fas fa-star" color="#f59e0b" />
                <StatCard label="إجمالي التقييمات" value={summary.total.to_string()} icon="fas fa-comments" />
                <StatCard label="تقييمات إيجابية" value={summary.positive.to_string()} icon="fas fa-thumbs-up" color="#16a34a" />
                <StatCard label="تقييمات سلبية" value={summary.negative.to_string()} icon="fas fa-thumbs-down" color="#dc2626" />
            </div>
            <div class="toolbar">
                <select onchange={on_filter}>
                    {enum_options(criteria.filter, RatingFilter::label)}
                </select>
                <input
                    type="search"
                    placeholder="بحث بالسائق أو الزبون..."
                    value={criteria.search.clone()}
                    oninput={on_search}
                />
            </div>
            {refetch_error(query.phase(), ratings.is_empty(), &on_retry)}
            <table>
                <thead>
                    <tr>
                        <th>{"رقم الطلب"}</th>
                        <th>{"الزبون"}</th>
                        <th>{"السائق"}</th>
                        <th>{"التقييم"}</th>
                        <th>{"التعليق"}</th>
                        <th>{"التاريخ"}</th>
                    </tr>
                </thead>
                <tbody>
                    {placeholder_row(query.phase(), ratings.is_empty(), 6, "لا توجد تقييمات", &on_retry).unwrap_or_else(|| rows.collect())}
                </tbody>
            </table>
        </div>
    }
}
