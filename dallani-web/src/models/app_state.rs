use crate::api;
use shared::models::AdminUser;
use yewdux::Store;

/// Dashboard-wide state.
///
/// `authenticated` starts from the persisted token; `user` is only known
/// after a login in this page load.
#[derive(Clone, PartialEq, Store)]
pub struct AppState {
    pub authenticated: bool,
    pub user: Option<AdminUser>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            authenticated: api::client().session().is_authenticated(),
            user: None,
        }
    }
}

impl AppState {
    /// Name shown in the sidebar footer.
    pub fn admin_name(&self) -> &str {
        self.user
            .as_ref()
            .map(AdminUser::display_name)
            .filter(|name| !name.is_empty())
            .unwrap_or("المدير")
    }
}
