use yew::{Callback, Html, MouseEvent, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub prompt: String,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Second step of every mutating action. Nothing is sent until the operator
/// presses confirm.
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_confirm = {
        let callback = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };
    let on_cancel = {
        let callback = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal" role="alertdialog">
                <p>{props.prompt.clone()}</p>
                <div class="modal-actions">
                    <button class="btn btn-primary" onclick={on_confirm}>{"تأكيد"}</button>
                    <button class="btn btn-secondary" onclick={on_cancel}>{"إلغاء"}</button>
                </div>
            </div>
        </div>
    }
}
