//! Binds a shared [`ListQuery`] to a component.
//!
//! The controller decides, the hook performs: fetch effects become
//! `spawn_local` requests, debounce effects arm a `gloo` timeout. Unmounting
//! tears the controller down, so late responses and pending searches are
//! dropped.

use crate::api;
use crate::config::web_config;
use gloo_timers::callback::Timeout;
use shared::query::{Criteria, Effect, ListQuery, ListResource, TimerSlot};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::functional::UseForceUpdateHandle;
use yew::{Callback, MouseEvent, hook, use_effect_with, use_force_update, use_mut_ref};

/// Component-side handle of a list controller.
pub struct ListHandle<R: ListResource> {
    query: Rc<RefCell<ListQuery<R>>>,
    timer: Rc<RefCell<TimerSlot<Timeout>>>,
    rerender: UseForceUpdateHandle,
}

impl<R: ListResource> Clone for ListHandle<R> {
    fn clone(&self) -> Self {
        Self {
            query: Rc::clone(&self.query),
            timer: Rc::clone(&self.timer),
            rerender: self.rerender.clone(),
        }
    }
}

impl<R: ListResource> PartialEq for ListHandle<R> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.query, &other.query)
    }
}

impl<R: ListResource + 'static> ListHandle<R> {
    /// Current controller state. Do not hold across callbacks.
    pub fn read(&self) -> Ref<'_, ListQuery<R>> {
        self.query.borrow()
    }

    /// Applies a state change and performs the effect it returns.
    pub fn update(&self, change: impl FnOnce(&mut ListQuery<R>) -> Effect) {
        let effect = change(&mut self.query.borrow_mut());
        self.rerender.force_update();
        self.perform(effect);
    }

    pub fn refresh(&self) {
        self.update(ListQuery::refresh);
    }

    /// Click handler refetching the current criteria.
    pub fn retry_callback(&self) -> Callback<MouseEvent> {
        let handle = self.clone();
        Callback::from(move |_| handle.refresh())
    }

    fn perform(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Fetch(ticket) => {
                let handle = self.clone();
                spawn_local(async move {
                    let result = api::client().fetch_list::<R>(&ticket).await;
                    let applied = handle.query.borrow_mut().resolve(&ticket, result);
                    if applied {
                        handle.rerender.force_update();
                    }
                });
            }
            Effect::Debounce(ticket) => {
                let handle = self.clone();
                let millis = u32::try_from(ticket.delay.as_millis()).unwrap_or(u32::MAX);
                // The timeout stays in the slot after firing; replacing or
                // dropping a fired handle is a no-op.
                let timeout = Timeout::new(millis, move || {
                    let effect = handle.query.borrow_mut().fire_debounced(ticket);
                    if effect != Effect::None {
                        handle.rerender.force_update();
                    }
                    handle.perform(effect);
                });
                self.timer.borrow_mut().replace(timeout);
            }
        }
    }
}

/// Mounts a list controller for `R`, starting from `initial` criteria.
///
/// The first fetch is issued on mount with the configured search delay.
#[hook]
pub fn use_list_query<R, F>(initial: F) -> ListHandle<R>
where
    R: ListResource + 'static,
    F: FnOnce() -> Criteria<R::Filter, R::Sort>,
{
    let query = use_mut_ref(|| ListQuery::<R>::with_criteria(initial(), web_config().search_debounce()));
    let timer = use_mut_ref(TimerSlot::<Timeout>::new);
    let rerender = use_force_update();
    let handle = ListHandle {
        query,
        timer,
        rerender,
    };

    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            handle.update(ListQuery::mount);
            move || {
                handle.query.borrow_mut().teardown();
                handle.timer.borrow_mut().clear();
            }
        });
    }

    handle
}
