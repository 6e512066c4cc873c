//! Browser wiring of the shared API client: `localStorage` for the token,
//! a full page load back to the entry point when the session ends.

use crate::config::web_config;
use gloo_storage::{LocalStorage, Storage};
use once_cell::unsync::OnceCell;
use shared::errors::StorageError;
use shared::{ApiClient, Navigator, ReqwestTransport, SessionStore, TokenStorage};
use std::sync::Arc;

thread_local! {
    static SHARED_CLIENT: OnceCell<ApiClient> = OnceCell::new();
}

/// Raw `window.localStorage` access. Values are stored verbatim, not as
/// JSON, so a token written by an older dashboard build is still read.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokens;

impl TokenStorage for LocalStorageTokens {
    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }
}

/// Sends the browser to the dashboard root. The reload rebuilds every
/// page from a session without a token, which shows the login form.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn to_login(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.location().set_href("/") {
            web_sys::console::error_1(&err);
        }
    }
}

fn build_client() -> ApiClient {
    let config = web_config();
    ApiClient::new(
        &config.api_url,
        Arc::new(ReqwestTransport::new()),
        SessionStore::new(Arc::new(LocalStorageTokens)),
        Arc::new(BrowserNavigator),
    )
}

/// The dashboard-wide client. Every page shares its session.
pub fn client() -> ApiClient {
    SHARED_CLIENT.with(|cell| cell.get_or_init(build_client).clone())
}
