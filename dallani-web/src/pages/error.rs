use crate::routes::Route;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    html! {
        <div class="card">
            <h1>{"404"}</h1>
            <p>{"الصفحة المطلوبة غير موجودة"}</p>
            <Link<Route> to={Route::Dashboard}>{"العودة إلى لوحة التحكم"}</Link<Route>>
        </div>
    }
}
