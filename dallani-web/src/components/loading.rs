use shared::messages;
use yew::{Html, function_component, html};

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="loading">
            <i class="fas fa-spinner fa-spin"></i>
            <span>{" "}{messages::LOADING}</span>
        </div>
    }
}
