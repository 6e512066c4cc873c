use crate::components::sidebar::Sidebar;
use crate::models::app_state::AppState;
use crate::pages::login::LoginPage;
use crate::routes::{Route, switch};
use yew::{Html, function_component, html};
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// Login form without a token, the routed dashboard with one.
#[function_component(App)]
pub fn app() -> Html {
    let authenticated = use_selector(|state: &AppState| state.authenticated);

    if !*authenticated {
        return html! { <LoginPage /> };
    }

    html! {
        <BrowserRouter>
            <div class="layout">
                <Sidebar />
                <main class="content">
                    <Switch<Route> render={switch} />
                </main>
            </div>
        </BrowserRouter>
    }
}
