use yew::{Callback, Children, Html, MouseEvent, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: String,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

/// Overlay dialog. Clicking the backdrop closes it.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let stop = Callback::from(|event: MouseEvent| event.stop_propagation());

    html! {
        <div class="modal-backdrop" onclick={on_backdrop}>
            <div class="modal" onclick={stop}>
                <h3>{props.title.clone()}</h3>
                {props.children.clone()}
                <div class="modal-actions">
                    <button class="btn btn-secondary" onclick={on_close_button}>{"إغلاق"}</button>
                </div>
            </div>
        </div>
    }
}
