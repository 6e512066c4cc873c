mod api;
mod app;
mod components;
mod config;
mod download;
mod hooks;
mod models;
mod pages;
mod routes;

use app::App;
use yew::Renderer;
use yew::{Html, function_component, html};
use yewdux::YewduxRoot;

#[function_component(Root)]
fn root() -> Html {
    html! {
        <YewduxRoot>
            <App />
        </YewduxRoot>
    }
}

fn main() {
    // Full panic payloads in the browser console
    std::panic::set_hook(Box::new(|info| {
        if let Some(s) = info.payload().downcast_ref::<String>() {
            web_sys::console::log_1(&format!("Panic: {s}").into());
        } else if let Some(s) = info.payload().downcast_ref::<&str>() {
            web_sys::console::log_1(&format!("Panic: {s}").into());
        } else {
            web_sys::console::log_1(&"Unknown panic".into());
        }
        if let Some(location) = info.location() {
            web_sys::console::log_1(
                &format!(
                    "  at {}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                )
                .into(),
            );
        }
    }));

    web_sys::console::log_1(&format!("Starting Dallani admin console against {}", config::web_config().api_url).into());

    let body = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body());
    match body {
        Some(body) => {
            Renderer::<Root>::with_root(body.into()).render();
        }
        None => web_sys::console::error_1(&"No document body to mount into".into()),
    }
}
