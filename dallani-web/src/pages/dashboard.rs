use crate::api;
use crate::components::loading::Loading;
use crate::components::notice::{Notice, NoticeBanner};
use crate::components::stat_card::StatCard;
use shared::format::money;
use shared::models::DashboardStats;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let stats = use_state(|| None::<DashboardStats>);
    let error = use_state(|| None::<Notice>);

    {
        let stats = stats.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::client().fetch_stats().await {
                    Ok(loaded) => stats.set(Some(loaded)),
                    Err(err) if err.is_session_expired() => {}
                    Err(err) => error.set(Some(Notice::error(err.user_message()))),
                }
            });
            || ()
        });
    }

    let cards = stats.as_ref().map(|stats| {
        html! {
            <div class="stats-grid">
                <StatCard label="إجمالي الطلبات" value={stats.total_orders.to_string()} icon="fas fa-box" color="#2563eb" />
                <StatCard label="طلبات معلقة" value={stats.pending_orders.to_string()} icon="fas fa-clock" color="#f59e0b" />
                <StatCard label="السائقين النشطين" value={stats.active_drivers.to_string()} icon="fas fa-motorcycle" color="#16a34a" />
                <StatCard label="سائقين محظورين" value={stats.blocked_drivers.to_string()} icon="fas fa-ban" color="#dc2626" />
                <StatCard label="إجمالي السائقين" value={stats.total_drivers.to_string()} icon="fas fa-users" color="#7c3aed" />
                <StatCard label="مستحقات معلقة" value={money(stats.total_pending_settlement)} icon="fas fa-money-bill-wave" color="#0891b2" />
            </div>
        }
    });

    html! {
        <div>
            <h1>{"لوحة التحكم"}</h1>
            <NoticeBanner notice={(*error).clone()} />
            if let Some(cards) = cards {
                {cards}
            } else if error.is_none() {
                <Loading />
            }
            <div class="card">
                <h3>{"نظرة سريعة"}</h3>
                <p>{"مرحباً بك في لوحة تحكم دلّعني. يمكنك إدارة الطلبات، السائقين، الفواتير، والتسويات من هنا."}</p>
            </div>
        </div>
    }
}
