use crate::api;
use crate::components::form::{checkbox_value, input_value};
use crate::components::loading::Loading;
use crate::components::notice::{Notice, NoticeBanner};
use shared::errors::ApiError;
use shared::models::SystemSettings;
use shared::models::settings::notices;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// The server's own text or the transport cause, else `fallback`.
fn failure_detail(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
        ApiError::Transport(_) => err.user_message(),
        _ => fallback.to_string(),
    }
}

fn save_failure(err: &ApiError) -> String {
    failure_detail(err, notices::SAVE_FAILED)
}

fn load_failure(err: &ApiError) -> String {
    let detail = failure_detail(err, notices::LOAD_FAILED);
    if detail == notices::LOAD_FAILED {
        detail
    } else {
        format!("{}: {detail}", notices::LOAD_FAILED)
    }
}

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let settings = use_state(|| None::<SystemSettings>);
    let saving = use_state(|| false);
    let notice = use_state(|| None::<Notice>);

    {
        let settings = settings.clone();
        let notice = notice.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::client().fetch_settings().await {
                    Ok(loaded) => settings.set(Some(loaded)),
                    Err(err) if err.is_session_expired() => {}
                    Err(err) => {
                        // Form stays editable with defaults.
                        notice.set(Some(Notice::error(load_failure(&err))));
                        settings.set(Some(SystemSettings::default()));
                    }
                }
            });
            || ()
        });
    }

    let edit = |change: fn(&mut SystemSettings, &str)| {
        let settings = settings.clone();
        Callback::from(move |event: InputEvent| {
            if let (Some(mut current), Some(value)) = ((*settings).clone(), input_value(&event)) {
                change(&mut current, &value);
                settings.set(Some(current));
            }
        })
    };
    let toggle = |change: fn(&mut SystemSettings, bool)| {
        let settings = settings.clone();
        Callback::from(move |event: Event| {
            if let (Some(mut current), Some(checked)) = ((*settings).clone(), checkbox_value(&event)) {
                change(&mut current, checked);
                settings.set(Some(current));
            }
        })
    };

    let on_commission = edit(|settings, value| {
        if let Ok(amount) = value.parse() {
            settings.commission_amount = amount;
        }
    });
    let on_points_per_order = edit(|settings, value| {
        if let Ok(points) = value.parse() {
            settings.points_per_order = points;
        }
    });
    let on_points_for_free_order = edit(|settings, value| {
        if let Ok(points) = value.parse() {
            settings.points_for_free_order = points;
        }
    });
    let on_stores = toggle(|settings, enabled| settings.stores_enabled = enabled);
    let on_points = toggle(|settings, enabled| settings.points_enabled = enabled);

    let on_submit = {
        let settings = settings.clone();
        let saving = saving.clone();
        let notice = notice.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(current) = (*settings).clone() else {
                return;
            };
            if *saving {
                return;
            }
            saving.set(true);
            notice.set(None);
            let saving = saving.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match api::client().update_settings(&current).await {
                    Ok(()) => notice.set(Some(Notice::success(notices::SAVED))),
                    Err(err) if err.is_session_expired() => {}
                    Err(err) => notice.set(Some(Notice::error(save_failure(&err)))),
                }
                saving.set(false);
            });
        })
    };
    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |()| notice.set(None))
    };

    let Some(current) = (*settings).clone() else {
        return html! {
            <div>
                <h1>{"إعدادات النظام"}</h1>
                <NoticeBanner notice={(*notice).clone()} />
                if notice.is_none() {
                    <Loading />
                }
            </div>
        };
    };
    let is_saving = *saving;

    html! {
        <div>
            <h1>{"إعدادات النظام"}</h1>
            <NoticeBanner notice={(*notice).clone()} on_dismiss={Some(on_dismiss)} />
            <form onsubmit={on_submit}>
                <div class="card">
                    <h3>{"إعدادات عامة"}</h3>
                    <div class="form-field">
                        <label>{"قيمة العمولة (ل.س)"}</label>
                        <input type="number" step="0.01" min="0" value={current.commission_amount.to_string()} oninput={on_commission} />
                        <small>{"المبلغ المقتطع من السائق عن كل طلب"}</small>
                    </div>
                    <label>
                        <input type="checkbox" checked={current.stores_enabled} onchange={on_stores} />
                        {" تفعيل نظام المتاجر"}
                    </label>
                </div>
                <div class="card">
                    <h3>{"نظام النقاط والمكافآت"}</h3>
                    <label>
                        <input type="checkbox" checked={current.points_enabled} onchange={on_points} />
                        {" تفعيل نظام النقاط"}
                    </label>
                    <p><small>{"عند التفعيل، سيكسب الزبائن نقاطاً ويمكنهم استخدامها لطلبات مجانية."}</small></p>
                    if current.points_enabled {
                        <div class="form-field">
                            <label>{"نقاط مكتسبة لكل طلب"}</label>
                            <input type="number" min="0" value={current.points_per_order.to_string()} oninput={on_points_per_order} />
                            <small>{"عدد النقاط التي يكسبها الزبون عند إكمال طلب"}</small>
                        </div>
                        <div class="form-field">
                            <label>{"تكلفة الطلب المجاني (نقاط)"}</label>
                            <input type="number" min="0" value={current.points_for_free_order.to_string()} oninput={on_points_for_free_order} />
                            <small>{"عدد النقاط المطلوبة للحصول على طلب مجاني"}</small>
                        </div>
                    }
                </div>
                <button class="btn btn-primary" type="submit" disabled={is_saving}>
                    {if is_saving { "جاري الحفظ..." } else { "حفظ التغييرات" }}
                </button>
            </form>
        </div>
    }
}
