use crate::storage::{FileTokenStorage, token_path};
use anyhow::{Result, bail};
use shared::config::ClientConfig;
use shared::{ApiClient, Navigator, ReqwestTransport, SessionStore};
use std::sync::Arc;
use tracing::info;

/// A terminal has no login page; the next command simply needs `dallani login`.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn to_login(&self) {
        info!("session ended, run `dallani login` to sign in again");
    }
}

/// Everything a command needs.
#[derive(Debug)]
pub struct Context {
    pub client: ApiClient,
    pub config: ClientConfig,
    pub json: bool,
    pub assume_yes: bool,
}

impl Context {
    pub fn new(config: ClientConfig, json: bool, assume_yes: bool) -> Self {
        let session = SessionStore::new(Arc::new(FileTokenStorage::new(token_path())));
        let client = ApiClient::new(
            &config.api_url,
            Arc::new(ReqwestTransport::new()),
            session,
            Arc::new(TerminalNavigator),
        );
        Self {
            client,
            config,
            json,
            assume_yes,
        }
    }

    /// Fails early when no token is stored.
    ///
    /// # Errors
    /// Returns an error telling the operator to log in.
    pub fn require_session(&self) -> Result<()> {
        if self.client.session().is_authenticated() {
            Ok(())
        } else {
            bail!("لا توجد جلسة نشطة، سجّل الدخول أولاً باستخدام `dallani login`")
        }
    }
}
