use crate::api;
use crate::components::form::input_value;
use crate::models::app_state::AppState;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_store;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let (_, dispatch) = use_store::<AppState>();

    let onsubmit = {
        let email_handle = email.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let email_value = (*email_handle).clone();
            let password_value = (*password_handle).clone();
            loading_handle.set(true);
            error_handle.set(None);
            let loading_ref = loading_handle.clone();
            let error_ref = error_handle.clone();
            let dispatch = dispatch.clone();
            spawn_local(async move {
                match api::client().login(&email_value, &password_value).await {
                    Ok(success) => dispatch.set(AppState {
                        authenticated: true,
                        user: success.user,
                    }),
                    Err(err) => error_ref.set(Some(err.user_message())),
                }
                loading_ref.set(false);
            });
        })
    };

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                email.set(value);
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                password.set(value);
            }
        })
    };

    let is_busy = *loading;

    html! {
        <div class="login-page">
            <div class="card login-card">
                <form onsubmit={onsubmit}>
                    <h2>{"دلّعني"}</h2>
                    <p>{"تسجيل دخول الإدارة"}</p>
                    if let Some(message) = &*error {
                        <div class="notice notice-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <div class="form-field">
                        <label for="email">{"البريد الإلكتروني"}</label>
                        <input
                            id="email"
                            type="email"
                            value={(*email).clone()}
                            oninput={on_email_change}
                        />
                    </div>
                    <div class="form-field">
                        <label for="password">{"كلمة المرور"}</label>
                        <input
                            id="password"
                            type="password"
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <button class="btn btn-primary" type="submit" disabled={is_busy}>
                        {if is_busy { "جاري تسجيل الدخول..." } else { "تسجيل الدخول" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
