//! Small helpers for the filter bars every list page has.

use std::str::FromStr;
use strum::IntoEnumIterator;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::{Event, Html, InputEvent, TargetCast, html};

pub fn input_value(event: &InputEvent) -> Option<String> {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
}

pub fn checkbox_value(event: &Event) -> Option<bool> {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.checked())
}

pub fn textarea_value(event: &InputEvent) -> Option<String> {
    event
        .target_dyn_into::<HtmlTextAreaElement>()
        .map(|area| area.value())
}

pub fn select_value(event: &Event) -> Option<String> {
    event
        .target_dyn_into::<HtmlSelectElement>()
        .map(|select| select.value())
}

/// Parses the selected `<option>` back into `T`.
pub fn selected<T: FromStr>(event: &Event) -> Option<T> {
    select_value(event).and_then(|value| value.parse().ok())
}

/// One `<option>` per variant, keyed by its kebab-case name.
pub fn enum_options<T>(current: T, label: impl Fn(T) -> &'static str) -> Html
where
    T: IntoEnumIterator + AsRef<str> + PartialEq + Copy,
{
    T::iter()
        .map(|variant| {
            let value = variant.as_ref().to_string();
            html! {
                <option {value} selected={variant == current}>{label(variant)}</option>
            }
        })
        .collect()
}
