//! # List Query Controller
//!
//! One controller drives every collection page. A page is described by a
//! [`ListResource`]: which parameters go to the server, which predicate
//! refines the fetched items locally, and how the response body is decoded.
//!
//! The controller never performs I/O. Each state change returns an
//! [`Effect`] telling the caller what to do next: issue a fetch, arm the
//! search timer, or nothing. Fetch results come back through
//! [`ListQuery::resolve`], which drops responses from superseded generations.

pub mod debounce;
pub mod resources;

pub use debounce::{DebounceTicket, Debouncer, PendingTimer, TimerSlot};
pub use resources::{AuditLogs, Customers, Disputes, Drivers, Invoices, Orders, Ratings, Settlements};

use crate::errors::ApiError;
use chrono::NaiveDate;
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

/// Where a resource's free-text search is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Sent as a query parameter after the debounce delay.
    Server,
    /// Applied to the fetched items on every read.
    Local,
}

/// User-selected criteria of a list page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria<F, S> {
    pub filter: F,
    pub date: Option<NaiveDate>,
    pub search: String,
    pub sort: S,
}

/// Decoded body of a list response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage<I, S> {
    pub items: Vec<I>,
    pub summary: S,
}

/// Description of one collection endpoint.
pub trait ListResource {
    type Item: Clone + Debug;
    type Filter: Clone + Default + PartialEq + Debug;
    type Sort: Clone + Default + PartialEq + Debug;
    type Summary: Clone + Default + Debug;

    /// Endpoint path relative to the API base URL.
    const PATH: &'static str;
    /// Field of the response envelope holding the items.
    const ITEMS_FIELD: &'static str;
    const SEARCH: SearchMode;

    /// Query parameters derived from `criteria`, in request order.
    fn server_params(criteria: &Criteria<Self::Filter, Self::Sort>) -> Vec<(&'static str, String)>;

    /// Local predicate. `term` is the trimmed, lower-cased search text.
    fn matches(item: &Self::Item, criteria: &Criteria<Self::Filter, Self::Sort>, term: &str) -> bool;

    /// Decodes a successful response envelope.
    ///
    /// # Errors
    /// Returns a user-facing message when the body has the wrong shape.
    fn decode(body: &Value) -> Result<ListPage<Self::Item, Self::Summary>, String>;
}

/// Builds `<PATH>?<urlencoded params>`. The `?` is kept when there are no
/// parameters.
pub fn request_path<R: ListResource>(criteria: &Criteria<R::Filter, R::Sort>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in R::server_params(criteria) {
        query.append_pair(name, &value);
    }
    format!("{}?{}", R::PATH, query.finish())
}

/// Loading state of a list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// A fetch the caller must perform and report back with [`ListQuery::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub path: String,
}

impl FetchTicket {
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the caller has to do after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Effect {
    None,
    Fetch(FetchTicket),
    /// Wait `ticket.delay`, then call [`ListQuery::fire_debounced`].
    Debounce(DebounceTicket),
}

/// Collection state of one mounted page.
#[derive(Debug)]
pub struct ListQuery<R: ListResource> {
    criteria: Criteria<R::Filter, R::Sort>,
    items: Vec<R::Item>,
    summary: R::Summary,
    phase: Phase,
    selected: Option<R::Item>,
    generation: u64,
    last_path: Option<String>,
    /// Search text that has reached the server; differs from
    /// `criteria.search` while a debounce is pending.
    sent_search: String,
    debouncer: Debouncer,
    torn_down: bool,
}

impl<R: ListResource> ListQuery<R> {
    pub fn new(debounce: Duration) -> Self {
        Self::with_criteria(Criteria::default(), debounce)
    }

    /// Starts from preset criteria, e.g. today's date on the settlements page.
    pub fn with_criteria(criteria: Criteria<R::Filter, R::Sort>, debounce: Duration) -> Self {
        Self {
            criteria,
            items: Vec::new(),
            summary: R::Summary::default(),
            phase: Phase::Idle,
            selected: None,
            generation: 0,
            last_path: None,
            sent_search: String::new(),
            debouncer: Debouncer::new(debounce),
            torn_down: false,
        }
    }

    pub const fn criteria(&self) -> &Criteria<R::Filter, R::Sort> {
        &self.criteria
    }

    /// Every fetched item, ignoring local predicates.
    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub const fn summary(&self) -> &R::Summary {
        &self.summary
    }

    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub const fn selected(&self) -> Option<&R::Item> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, item: Option<R::Item>) {
        self.selected = item;
    }

    pub const fn debounce_delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Items passing the local predicate for the current criteria.
    pub fn visible(&self) -> Vec<&R::Item> {
        let term = self.criteria.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| R::matches(item, &self.criteria, &term))
            .collect()
    }

    /// Path the current criteria would request.
    pub fn current_path(&self) -> String {
        request_path::<R>(&self.criteria)
    }

    /// Initial fetch of a freshly mounted page.
    pub fn mount(&mut self) -> Effect {
        self.torn_down = false;
        let path = self.current_path();
        Effect::Fetch(self.begin_fetch(path))
    }

    pub fn set_filter(&mut self, filter: R::Filter) -> Effect {
        self.criteria.filter = filter;
        self.sync()
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) -> Effect {
        self.criteria.date = date;
        self.sync()
    }

    pub fn set_sort(&mut self, sort: R::Sort) -> Effect {
        self.criteria.sort = sort;
        self.sync()
    }

    /// Updates the search text. Server-side searches are debounced; local
    /// ones take effect on the next [`ListQuery::visible`].
    pub fn set_search(&mut self, search: impl Into<String>) -> Effect {
        self.criteria.search = search.into();
        match R::SEARCH {
            SearchMode::Server if !self.torn_down => Effect::Debounce(self.debouncer.schedule()),
            _ => Effect::None,
        }
    }

    /// Called when a debounce timer elapses. Only the latest ticket fetches.
    pub fn fire_debounced(&mut self, ticket: DebounceTicket) -> Effect {
        if self.torn_down || !self.debouncer.fire(ticket) {
            return Effect::None;
        }
        let path = self.current_path();
        if self.last_path.as_deref() == Some(path.as_str()) {
            self.sent_search.clone_from(&self.criteria.search);
            return Effect::None;
        }
        Effect::Fetch(self.begin_fetch(path))
    }

    /// Unconditional refetch, used after a successful action.
    pub fn refresh(&mut self) -> Effect {
        if self.torn_down {
            return Effect::None;
        }
        let path = self.current_path();
        Effect::Fetch(self.begin_fetch(path))
    }

    /// Applies a fetch result if it belongs to the latest generation.
    ///
    /// Returns whether the result was applied. Failures keep the previous
    /// items and forget the failed path, so resubmitting the same criteria
    /// fetches again; a session expiry returns the page to idle without an
    /// error.
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ListPage<R::Item, R::Summary>, ApiError>,
    ) -> bool {
        if self.torn_down || ticket.generation != self.generation {
            debug!(
                path = %ticket.path,
                generation = ticket.generation,
                current = self.generation,
                "dropping stale list response"
            );
            return false;
        }
        match result {
            Ok(page) => {
                self.items = page.items;
                self.summary = page.summary;
                self.phase = Phase::Ready;
            }
            Err(err) => {
                self.last_path = None;
                self.phase = if err.is_session_expired() {
                    Phase::Idle
                } else {
                    Phase::Failed(err.user_message())
                };
            }
        }
        true
    }

    /// Invalidates every outstanding fetch and the pending search.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation += 1;
        self.debouncer.cancel();
    }

    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Path of the current criteria with the search text last sent.
    fn settled_path(&self) -> String {
        let criteria = Criteria {
            search: self.sent_search.clone(),
            ..self.criteria.clone()
        };
        request_path::<R>(&criteria)
    }

    /// Fetches when a server parameter other than a pending search changed.
    /// The pending search then goes out with it.
    fn sync(&mut self) -> Effect {
        if self.torn_down {
            return Effect::None;
        }
        if self.last_path.as_deref() == Some(self.settled_path().as_str()) {
            return Effect::None;
        }
        let path = self.current_path();
        Effect::Fetch(self.begin_fetch(path))
    }

    fn begin_fetch(&mut self, path: String) -> FetchTicket {
        self.debouncer.cancel();
        self.sent_search.clone_from(&self.criteria.search);
        self.generation += 1;
        self.last_path = Some(path.clone());
        self.phase = Phase::Loading;
        debug!(path = %path, generation = self.generation, "list fetch issued");
        FetchTicket {
            generation: self.generation,
            path,
        }
    }
}

/// Reads `body[field]` as an array, skipping malformed entries.
pub(crate) fn items_field<T: serde::de::DeserializeOwned>(body: &Value, field: &str) -> Vec<T> {
    body.get(field).map(decode_entries).unwrap_or_default()
}

/// Decodes an array value; anything else is empty.
pub(crate) fn decode_entries<T: serde::de::DeserializeOwned>(value: &Value) -> Vec<T> {
    match value {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| T::deserialize(entry).ok())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerFilter, CustomerSort, DriverFilter, OrderStatus};
    use serde_json::json;

    fn fetch(effect: Effect) -> FetchTicket {
        match effect {
            Effect::Fetch(ticket) => ticket,
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    fn page<R: ListResource>(body: Value) -> ListPage<R::Item, R::Summary> {
        R::decode(&body).unwrap()
    }

    #[test]
    fn test_orders_mount_then_status_change() {
        let mut query = ListQuery::<Orders>::new(Duration::from_millis(500));
        let mount = fetch(query.mount());
        assert_eq!(mount.path, "admin/orders?");
        assert!(query.is_loading());

        let status = fetch(query.set_filter(Some(OrderStatus::Dispute)));
        assert_eq!(status.path, "admin/orders?status=DISPUTE");
        assert!(status.generation() > mount.generation());
    }

    #[test]
    fn test_identical_params_do_not_refetch() {
        let mut query = ListQuery::<Orders>::new(Duration::from_millis(500));
        let _ = query.mount();
        assert_eq!(query.set_filter(None), Effect::None);
        let _ = fetch(query.set_date(NaiveDate::from_ymd_opt(2025, 11, 26)));
        assert_eq!(query.current_path(), "admin/orders?date=2025-11-26");
        assert_eq!(query.set_date(NaiveDate::from_ymd_opt(2025, 11, 26)), Effect::None);
    }

    #[test]
    fn test_refresh_always_fetches() {
        let mut query = ListQuery::<Drivers>::new(Duration::from_millis(500));
        let first = fetch(query.mount());
        let second = fetch(query.refresh());
        assert_eq!(first.path, second.path);
        assert_ne!(first.generation(), second.generation());
    }

    #[test]
    fn test_local_filter_is_pure() {
        let mut query = ListQuery::<Drivers>::new(Duration::from_millis(500));
        let ticket = fetch(query.mount());
        let body = json!({"success": true, "drivers": [
            {"id": "1", "isApproved": true, "isAvailable": true, "User": {"name": "Omar"}},
            {"id": "2", "isApproved": true, "isBlocked": true, "User": {"name": "Ali"}},
            {"id": "3", "isApproved": false, "User": {"name": "Sami"}}
        ]});
        assert!(query.resolve(&ticket, Ok(page::<Drivers>(body))));

        let before: Vec<String> = query.visible().iter().map(|d| d.id.clone()).collect();
        assert_eq!(query.set_filter(DriverFilter::Blocked), Effect::None);
        assert_eq!(query.visible().len(), 1);
        assert_eq!(query.set_filter(DriverFilter::All), Effect::None);
        let after: Vec<String> = query.visible().iter().map(|d| d.id.clone()).collect();
        assert_eq!(before, after);

        assert_eq!(query.set_search("OMA"), Effect::None);
        assert_eq!(query.visible().len(), 1);
    }

    #[test]
    fn test_server_search_debounces() {
        let mut query = ListQuery::<Customers>::new(Duration::from_millis(500));
        let mount = fetch(query.mount());
        assert_eq!(mount.path, "admin/users?sort=newest&search=");

        let Effect::Debounce(first) = query.set_search("a") else {
            panic!("expected debounce")
        };
        let Effect::Debounce(second) = query.set_search("ah") else {
            panic!("expected debounce")
        };
        assert_eq!(second.delay, Duration::from_millis(500));
        assert_eq!(query.fire_debounced(first), Effect::None);
        let fired = fetch(query.fire_debounced(second));
        assert_eq!(fired.path, "admin/users?sort=newest&search=ah");
    }

    #[test]
    fn test_server_param_change_cancels_pending_search() {
        let mut query = ListQuery::<Customers>::new(Duration::from_millis(500));
        let _ = query.mount();
        let Effect::Debounce(pending) = query.set_search("sa") else {
            panic!("expected debounce")
        };
        let sorted = fetch(query.set_sort(CustomerSort::NameAsc));
        assert_eq!(sorted.path, "admin/users?sort=name-asc&search=sa");
        assert_eq!(query.fire_debounced(pending), Effect::None);
        assert_eq!(query.set_filter(CustomerFilter::Blocked), Effect::None);
    }

    #[test]
    fn test_local_filter_waits_for_pending_search() {
        let mut query = ListQuery::<Customers>::new(Duration::from_millis(500));
        let mount = fetch(query.mount());
        let body = json!({"success": true, "users": [{"id": "1", "isBlocked": true}]});
        assert!(query.resolve(&mount, Ok(page::<Customers>(body))));

        let Effect::Debounce(pending) = query.set_search("ahm") else {
            panic!("expected debounce")
        };
        assert_eq!(query.set_filter(CustomerFilter::Blocked), Effect::None);
        assert_eq!(query.visible().len(), 1);

        let fired = fetch(query.fire_debounced(pending));
        assert_eq!(fired.path, "admin/users?sort=newest&search=ahm");
    }

    #[test]
    fn test_same_criteria_refetch_after_failure() {
        let mut query = ListQuery::<Customers>::new(Duration::from_millis(500));
        let mount = fetch(query.mount());
        assert!(query.resolve(&mount, Err(ApiError::Transport("timeout".into()))));
        assert!(matches!(query.phase(), Phase::Failed(_)));

        let retried = fetch(query.set_sort(CustomerSort::default()));
        assert_eq!(retried.path, mount.path);
        assert!(query.resolve(&retried, Err(ApiError::Transport("timeout".into()))));

        let Effect::Debounce(pending) = query.set_search("") else {
            panic!("expected debounce")
        };
        let resubmitted = fetch(query.fire_debounced(pending));
        assert_eq!(resubmitted.path, mount.path);
    }

    #[test]
    fn test_unchanged_search_does_not_refetch() {
        let mut query = ListQuery::<Customers>::new(Duration::from_millis(500));
        let mount = fetch(query.mount());
        assert!(query.resolve(&mount, Ok(page::<Customers>(json!({"success": true, "users": []})))));
        let Effect::Debounce(pending) = query.set_search("") else {
            panic!("expected debounce")
        };
        assert_eq!(query.fire_debounced(pending), Effect::None);
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut query = ListQuery::<Orders>::new(Duration::from_millis(500));
        let old = fetch(query.mount());
        let new = fetch(query.set_filter(Some(OrderStatus::Completed)));

        let fresh = json!({"success": true, "orders": [{"id": "new"}]});
        let stale = json!({"success": true, "orders": [{"id": "old"}]});
        assert!(query.resolve(&new, Ok(page::<Orders>(fresh))));
        assert!(!query.resolve(&old, Ok(page::<Orders>(stale))));
        assert_eq!(query.items()[0].id, "new");
        assert_eq!(query.phase(), &Phase::Ready);
    }

    #[test]
    fn test_failure_keeps_items() {
        let mut query = ListQuery::<Orders>::new(Duration::from_millis(500));
        let first = fetch(query.mount());
        let body = json!({"success": true, "orders": [{"id": "kept"}]});
        query.resolve(&first, Ok(page::<Orders>(body)));

        let second = fetch(query.refresh());
        query.resolve(&second, Err(ApiError::Transport("timeout".into())));
        assert_eq!(query.items().len(), 1);
        assert!(query.error().is_some_and(|msg| msg.contains("timeout")));
    }

    #[test]
    fn test_session_expiry_is_not_a_page_error() {
        let mut query = ListQuery::<Orders>::new(Duration::from_millis(500));
        let ticket = fetch(query.mount());
        query.resolve(&ticket, Err(ApiError::SessionExpired));
        assert_eq!(query.phase(), &Phase::Idle);
        assert_eq!(query.error(), None);
    }

    #[test]
    fn test_teardown_ignores_late_results() {
        let mut query = ListQuery::<Customers>::new(Duration::from_millis(500));
        let ticket = fetch(query.mount());
        let Effect::Debounce(pending) = query.set_search("x") else {
            panic!("expected debounce")
        };
        query.teardown();
        let body = json!({"success": true, "users": [{"id": "1"}]});
        assert!(!query.resolve(&ticket, Ok(page::<Customers>(body))));
        assert_eq!(query.fire_debounced(pending), Effect::None);
        assert_eq!(query.refresh(), Effect::None);
        assert!(query.items().is_empty());
    }

    #[test]
    fn test_selection() {
        let mut query = ListQuery::<Orders>::new(Duration::from_millis(500));
        let ticket = fetch(query.mount());
        let body = json!({"success": true, "orders": [{"id": "o1"}]});
        query.resolve(&ticket, Ok(page::<Orders>(body)));
        let first = query.items()[0].clone();
        query.select(Some(first));
        assert_eq!(query.selected().map(|o| o.id.as_str()), Some("o1"));
        query.select(None);
        assert!(query.selected().is_none());
    }
}
