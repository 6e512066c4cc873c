use crate::api;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::notice::Notice;
use shared::actions::{ActionDesk, ActionOutcome, AdminAction};
use shared::messages;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::functional::UseForceUpdateHandle;
use yew::{Callback, Html, UseStateHandle, hook, html, use_force_update, use_mut_ref, use_state};

/// Component-side handle of an [`ActionDesk`].
#[derive(Clone)]
pub struct ActionHandle {
    desk: Rc<RefCell<ActionDesk>>,
    notice: UseStateHandle<Option<Notice>>,
    rerender: UseForceUpdateHandle,
    on_success: Callback<()>,
}

impl ActionHandle {
    /// Opens the confirmation dialog for `action`.
    pub fn request(&self, action: AdminAction) {
        let accepted = self.desk.borrow_mut().request(action);
        if !accepted {
            self.notice.set(Some(Notice::error(messages::ACTION_IN_FLIGHT)));
        }
        self.rerender.force_update();
    }

    pub fn cancel(&self) {
        self.desk.borrow_mut().cancel();
        self.rerender.force_update();
    }

    /// Sends the pending action. On success the notice is shown and the
    /// page's success callback refetches its data.
    pub fn confirm(&self) {
        let Some(action) = self.desk.borrow_mut().confirm() else {
            return;
        };
        self.rerender.force_update();

        let handle = self.clone();
        spawn_local(async move {
            let outcome = ActionOutcome::from_result(api::client().perform(&action).await);
            handle.desk.borrow_mut().finish(&action);
            match outcome {
                ActionOutcome::Completed(message) => {
                    handle.notice.set(Some(Notice::success(message)));
                    handle.on_success.emit(());
                }
                ActionOutcome::Failed(message) => handle.notice.set(Some(Notice::error(message))),
                ActionOutcome::SessionExpired => {}
            }
            handle.rerender.force_update();
        });
    }

    pub fn is_in_flight(&self, action: &AdminAction) -> bool {
        self.desk.borrow().is_in_flight(action)
    }

    pub fn notice(&self) -> Option<Notice> {
        (*self.notice).clone()
    }

    /// Replaces the notice, e.g. with a page-local validation message.
    pub fn set_notice(&self, notice: Option<Notice>) {
        self.notice.set(notice);
    }

    /// The confirmation dialog, or nothing when no action is pending.
    pub fn dialog(&self) -> Html {
        let Some(prompt) = self.desk.borrow().pending().map(AdminAction::confirmation_prompt) else {
            return html! {};
        };
        let on_confirm = {
            let handle = self.clone();
            Callback::from(move |()| handle.confirm())
        };
        let on_cancel = {
            let handle = self.clone();
            Callback::from(move |()| handle.cancel())
        };
        html! { <ConfirmDialog {prompt} {on_confirm} {on_cancel} /> }
    }
}

/// Confirmation and re-entrancy guard for a page's mutating actions.
///
/// `on_success` runs after every completed action, typically a list
/// refresh.
#[hook]
pub fn use_admin_action(on_success: Callback<()>) -> ActionHandle {
    let desk = use_mut_ref(ActionDesk::new);
    let notice = use_state(|| None::<Notice>);
    let rerender = use_force_update();
    ActionHandle {
        desk,
        notice,
        rerender,
        on_success,
    }
}
