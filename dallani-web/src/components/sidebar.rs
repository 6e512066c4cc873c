use crate::api;
use crate::models::app_state::AppState;
use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_store;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let (state, dispatch) = use_store::<AppState>();
    let current = use_route::<Route>();

    let on_logout = Callback::from(move |_: MouseEvent| {
        dispatch.set(AppState {
            authenticated: false,
            user: None,
        });
        api::client().logout();
    });

    let menu = Route::menu().map(|route| {
        let class = if current == Some(route) { "active" } else { "" };
        html! {
            <Link<Route> to={route} classes={classes!(class)}>
                <i class={route.icon()}></i>
                <span>{route.label()}</span>
            </Link<Route>>
        }
    });

    html! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2>{"دلّعني"}</h2>
                <p>{"لوحة الإدارة"}</p>
            </div>
            <nav class="sidebar-menu">
                {for menu}
            </nav>
            <div class="sidebar-footer">
                <div><i class="fas fa-user-shield"></i>{" "}{state.admin_name().to_string()}</div>
                <small>{"مدير النظام"}</small>
                <button class="btn btn-danger" onclick={on_logout}>
                    <i class="fas fa-sign-out-alt"></i>{" تسجيل الخروج"}
                </button>
            </div>
        </aside>
    }
}
