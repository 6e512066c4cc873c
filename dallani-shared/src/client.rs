//! # API Client
//!
//! Wraps a [`Transport`] with the admin session: attaches the bearer token,
//! turns any `401` into a forced logout, and decodes the `{success, ...}`
//! envelope the backend wraps every response in.

use crate::actions::AdminAction;
use crate::errors::{ApiError, ApiResult};
use crate::messages;
use crate::models::settings::notices;
use crate::models::{AdminUser, DashboardStats, LoginRequest, LoginResponse, SystemSettings};
use crate::query::{FetchTicket, ListPage, ListResource};
use crate::session::SessionStore;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the user is sent when the session ends.
pub trait Navigator {
    /// Leaves the current view for the login entry point.
    fn to_login(&self);
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub user: Option<AdminUser>,
}

/// Session-aware client for the admin REST API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `http://localhost:3000/api`
    /// * `transport` - Outbound request primitive
    /// * `session` - Token store shared with the rest of the process
    /// * `navigator` - Invoked whenever the session is dropped
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Absolute URL of an endpoint path.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Resolves an uploaded file URL. Absolute URLs are kept; relative ones
    /// are joined to the backend origin.
    pub fn asset_url(&self, raw: &str) -> String {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return raw.to_string();
        }
        let origin = url::Url::parse(&self.base_url)
            .map(|url| url.origin().ascii_serialization())
            .unwrap_or_else(|_| self.base_url.clone());
        format!("{}/{}", origin, raw.trim_start_matches('/'))
    }

    /// Authenticates with email and password and stores the access token.
    ///
    /// # Errors
    /// * [`ApiError::Validation`] when either field is blank; nothing is sent.
    /// * [`ApiError::RateLimited`] on `429`.
    /// * [`ApiError::Rejected`] on any other failure status or an
    ///   unsuccessful body.
    /// * [`ApiError::Transport`] when no response was received.
    /// * [`ApiError::Storage`] when the token cannot be persisted.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginSuccess> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(messages::MISSING_CREDENTIALS.to_string()));
        }

        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = HttpRequest::post(self.api_url("auth/admin/login"))
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_json(&payload)
            .map_err(|err| ApiError::Decode(err.to_string()))?;

        info!(email, "admin login attempt");
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|err| ApiError::Transport(err.0))?;

        let status = response.status.as_u16();
        let body: Option<LoginResponse> = response.json().ok();
        let server_message = body.as_ref().and_then(|body| body.message.clone());

        if response.status == StatusCode::TOO_MANY_REQUESTS {
            warn!(email, "admin login rate limited");
            return Err(ApiError::RateLimited(
                server_message.unwrap_or_else(|| messages::RATE_LIMITED.to_string()),
            ));
        }
        if !response.is_success() {
            return Err(ApiError::Rejected {
                status,
                message: server_message.unwrap_or_else(|| messages::login_failed_with_status(status)),
            });
        }

        match body {
            Some(LoginResponse {
                success: true,
                access_token: Some(token),
                user,
                ..
            }) if !token.is_empty() => {
                self.session.set_token(&token)?;
                info!(email, "admin logged in");
                Ok(LoginSuccess { user })
            }
            _ => Err(ApiError::Rejected {
                status,
                message: server_message.unwrap_or_else(|| messages::LOGIN_FAILED.to_string()),
            }),
        }
    }

    /// Clears the session and returns to the login entry. Safe to repeat.
    pub fn logout(&self) {
        self.session.clear_token();
        self.navigator.to_login();
        info!("admin logged out");
    }

    /// Sends `request` with the session headers.
    ///
    /// `Content-Type: application/json` and `Authorization: Bearer <token>`
    /// are set first; headers already on `request` replace them. A `401`
    /// drops the session and navigates to login without reading the body.
    ///
    /// # Errors
    /// * [`ApiError::SessionExpired`] on `401`.
    /// * [`ApiError::Transport`] when no response was received.
    pub async fn authorized_request(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers: caller_headers,
            body,
        } = request;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.bearer_header());
        headers.extend(caller_headers);

        debug!(%method, %url, "authorized request");
        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: url.clone(),
                headers,
                body,
            })
            .await
            .map_err(|err| ApiError::Transport(err.0))?;

        if response.status == StatusCode::UNAUTHORIZED {
            warn!(%url, "session rejected by backend, logging out");
            self.logout();
            return Err(ApiError::SessionExpired);
        }
        Ok(response)
    }

    fn bearer_header(&self) -> HeaderValue {
        let value = self
            .session
            .token()
            .filter(|token| !token.is_empty())
            .map(|token| format!("Bearer {token}"))
            .unwrap_or_default();
        HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    async fn get_envelope(&self, path: &str) -> ApiResult<Value> {
        let response = self.authorized_request(HttpRequest::get(self.api_url(path))).await?;
        read_envelope(&response, messages::GENERIC_FAILURE)
    }

    /// Dashboard figures from `admin/stats`.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request or the envelope.
    pub async fn fetch_stats(&self) -> ApiResult<DashboardStats> {
        let body = self.get_envelope("admin/stats").await?;
        decode_field(&body, "stats")
    }

    /// Performs the fetch described by `ticket` for resource `R`.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request or the envelope; [`ApiError::Decode`]
    /// when the body does not match `R`.
    pub async fn fetch_list<R: ListResource>(
        &self,
        ticket: &FetchTicket,
    ) -> ApiResult<ListPage<R::Item, R::Summary>> {
        let body = self.get_envelope(&ticket.path).await?;
        R::decode(&body).map_err(ApiError::Decode)
    }

    /// Current system settings; missing fields take their defaults.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request or the envelope.
    pub async fn fetch_settings(&self) -> ApiResult<SystemSettings> {
        let body = self.get_envelope("admin/settings").await?;
        decode_field(&body, "settings")
    }

    /// Saves the system settings with `PUT admin/settings`.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request; a rejected save carries the server
    /// message or a save-failed fallback.
    pub async fn update_settings(&self, settings: &SystemSettings) -> ApiResult<()> {
        let request = HttpRequest::put(self.api_url("admin/settings"))
            .with_json(settings)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let response = self.authorized_request(request).await?;
        read_envelope(&response, notices::SAVE_FAILED).map(|_| ())
    }

    /// Sends a confirmed action and returns its success notification.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request or the envelope.
    pub async fn perform(&self, action: &AdminAction) -> ApiResult<String> {
        let request = HttpRequest::post(self.api_url(&action.path()))
            .with_json(&action.body())
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let response = self.authorized_request(request).await?;
        read_envelope(&response, messages::GENERIC_FAILURE)?;
        info!(path = %action.path(), "admin action completed");
        Ok(action.success_message().to_string())
    }
}

/// Checks the status and the `success` flag of a response envelope.
///
/// Non-2xx yields the server `message` or a status-embedding message; a body
/// that is not JSON yields the status-embedding message; `success != true`
/// yields the server `message` or `fallback`.
fn read_envelope(response: &HttpResponse, fallback: &str) -> ApiResult<Value> {
    let status = response.status.as_u16();
    let body: Option<Value> = response.json().ok();
    let server_message = body
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);

    if !response.is_success() {
        return Err(ApiError::Rejected {
            status,
            message: server_message.unwrap_or_else(|| messages::request_failed_with_status(status)),
        });
    }
    let Some(body) = body else {
        return Err(ApiError::Rejected {
            status,
            message: messages::request_failed_with_status(status),
        });
    };
    if body.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(ApiError::Rejected {
            status,
            message: server_message.unwrap_or_else(|| fallback.to_string()),
        });
    }
    Ok(body)
}

/// Decodes `body[field]`, using `T::default()` when it is absent or `null`.
fn decode_field<T: DeserializeOwned + Default>(body: &Value, field: &str) -> ApiResult<T> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value).map_err(|err| ApiError::Decode(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Effect, ListQuery, Orders};
    use crate::transport::TransportError;
    use async_trait::async_trait;
    use http::Method;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeTransport {
        sent: RefCell<Vec<HttpRequest>>,
        replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    }

    impl FakeTransport {
        fn reply(&self, status: u16, body: &str) -> &Self {
            self.replies.borrow_mut().push_back(Ok(HttpResponse::new(
                StatusCode::from_u16(status).unwrap(),
                body,
            )));
            self
        }

        fn fail(&self, reason: &str) -> &Self {
            self.replies
                .borrow_mut()
                .push_back(Err(TransportError(reason.to_string())));
            self
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.sent.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl Transport for Rc<FakeTransport> {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError("no reply queued".into())))
        }
    }

    #[derive(Default)]
    struct FakeNavigator {
        visits: Cell<u32>,
    }

    impl Navigator for Rc<FakeNavigator> {
        fn to_login(&self) {
            self.visits.set(self.visits.get() + 1);
        }
    }

    struct Harness {
        client: ApiClient,
        transport: Rc<FakeTransport>,
        navigator: Rc<FakeNavigator>,
    }

    fn harness() -> Harness {
        let transport = Rc::new(FakeTransport::default());
        let navigator = Rc::new(FakeNavigator::default());
        let client = ApiClient::new(
            "http://localhost:3000/api/",
            Arc::new(Rc::clone(&transport)),
            SessionStore::in_memory(),
            Arc::new(Rc::clone(&navigator)),
        );
        Harness {
            client,
            transport,
            navigator,
        }
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials_without_network() {
        let h = harness();
        for (email, password) in [("", "secret"), ("admin@dallani.app", "   "), (" ", " ")] {
            let err = h.client.login(email, password).await.unwrap_err();
            assert_eq!(err, ApiError::Validation(messages::MISSING_CREDENTIALS.into()));
        }
        assert!(h.transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_login_success_stores_token() {
        let h = harness();
        h.transport.reply(
            200,
            r#"{"success":true,"accessToken":"tok-123","user":{"id":"1","name":"مدير","email":"a@b.c","role":"ADMIN"}}"#,
        );
        let success = h.client.login("  a@b.c ", " pw ").await.unwrap();
        assert_eq!(h.client.session().token().as_deref(), Some("tok-123"));
        assert_eq!(success.user.unwrap().name.as_deref(), Some("مدير"));

        let sent = h.transport.sent();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].url, "http://localhost:3000/api/auth/admin/login");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"email":"a@b.c","password":"pw"}"#));
    }

    #[tokio::test]
    async fn test_login_rate_limited() {
        let h = harness();
        h.transport.reply(429, r#"{"message":"انتظر دقيقة"}"#).reply(429, "Too Many Requests");
        assert_eq!(
            h.client.login("a@b.c", "pw").await.unwrap_err(),
            ApiError::RateLimited("انتظر دقيقة".into())
        );
        assert_eq!(
            h.client.login("a@b.c", "pw").await.unwrap_err(),
            ApiError::RateLimited(messages::RATE_LIMITED.into())
        );
        assert!(!h.client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_failures() {
        let h = harness();
        h.transport
            .reply(401, r#"{"message":"بيانات الدخول غير صحيحة"}"#)
            .reply(502, "<html>bad gateway</html>")
            .reply(200, r#"{"success":false}"#)
            .reply(200, r#"{"success":true,"accessToken":""}"#)
            .fail("connection refused");

        let err = h.client.login("a@b.c", "pw").await.unwrap_err();
        assert_eq!(err.user_message(), "بيانات الدخول غير صحيحة");

        let err = h.client.login("a@b.c", "pw").await.unwrap_err();
        assert!(err.user_message().contains("502"));

        let err = h.client.login("a@b.c", "pw").await.unwrap_err();
        assert_eq!(err.user_message(), messages::LOGIN_FAILED);

        let err = h.client.login("a@b.c", "pw").await.unwrap_err();
        assert_eq!(err.user_message(), messages::LOGIN_FAILED);

        let err = h.client.login("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.user_message().contains("connection refused"));

        assert_eq!(h.client.session().token(), None);
        assert_eq!(h.navigator.visits.get(), 0);
    }

    #[tokio::test]
    async fn test_authorized_request_headers() {
        let h = harness();
        h.transport.reply(200, "{}").reply(200, "{}").reply(200, "{}");

        h.client
            .authorized_request(HttpRequest::get(h.client.api_url("admin/stats")))
            .await
            .unwrap();
        h.client.session().set_token("tok").unwrap();
        h.client
            .authorized_request(HttpRequest::get(h.client.api_url("admin/stats")))
            .await
            .unwrap();
        h.client
            .authorized_request(
                HttpRequest::get(h.client.api_url("admin/stats"))
                    .with_header(CONTENT_TYPE, HeaderValue::from_static("text/csv"))
                    .with_header(AUTHORIZATION, HeaderValue::from_static("Bearer other")),
            )
            .await
            .unwrap();

        let sent = h.transport.sent();
        assert_eq!(sent[0].headers[AUTHORIZATION], "");
        assert_eq!(sent[0].headers[CONTENT_TYPE], "application/json");
        assert_eq!(sent[1].headers[AUTHORIZATION], "Bearer tok");
        assert_eq!(sent[2].headers[AUTHORIZATION], "Bearer other");
        assert_eq!(sent[2].headers[CONTENT_TYPE], "text/csv");
        assert_eq!(sent[2].headers.get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_forces_logout() {
        let h = harness();
        h.client.session().set_token("tok").unwrap();
        h.transport.reply(401, "not json at all").reply(401, r#"{"success":true}"#);

        let err = h
            .client
            .authorized_request(HttpRequest::get(h.client.api_url("admin/orders?")))
            .await
            .unwrap_err();
        assert!(err.is_session_expired());
        assert_eq!(h.client.session().token(), None);
        assert_eq!(h.navigator.visits.get(), 1);

        let err = h.client.fetch_stats().await.unwrap_err();
        assert!(err.is_session_expired());
        assert_eq!(h.navigator.visits.get(), 2);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let h = harness();
        h.client.session().set_token("tok").unwrap();
        h.client.logout();
        h.client.logout();
        assert!(!h.client.session().is_authenticated());
        assert_eq!(h.navigator.visits.get(), 2);
    }

    #[tokio::test]
    async fn test_envelope_rules() {
        let h = harness();
        h.transport
            .reply(200, r#"{"success":true,"stats":{"totalOrders":"12"}}"#)
            .reply(500, r#"{"message":"خطأ في قاعدة البيانات"}"#)
            .reply(404, "Not Found")
            .reply(200, r#"{"success":false}"#)
            .reply(200, "<html>");

        assert_eq!(h.client.fetch_stats().await.unwrap().total_orders, 12);
        assert_eq!(
            h.client.fetch_stats().await.unwrap_err().user_message(),
            "خطأ في قاعدة البيانات"
        );
        assert!(h.client.fetch_stats().await.unwrap_err().user_message().contains("404"));
        assert_eq!(
            h.client.fetch_stats().await.unwrap_err().user_message(),
            messages::GENERIC_FAILURE
        );
        assert!(h.client.fetch_stats().await.unwrap_err().user_message().contains("200"));
    }

    #[tokio::test]
    async fn test_fetch_list_through_controller() {
        let h = harness();
        h.transport
            .reply(200, r#"{"success":true,"orders":[{"id":"o1","status":"DISPUTE"}]}"#);
        let mut query = ListQuery::<Orders>::new(Duration::from_millis(500));
        let Effect::Fetch(ticket) = query.mount() else {
            panic!("expected fetch")
        };
        let result = h.client.fetch_list::<Orders>(&ticket).await;
        assert!(query.resolve(&ticket, result));
        assert_eq!(query.items().len(), 1);
        assert_eq!(h.transport.sent()[0].url, "http://localhost:3000/api/admin/orders?");
    }

    #[tokio::test]
    async fn test_perform_action() {
        let h = harness();
        h.transport
            .reply(200, r#"{"success":true}"#)
            .reply(200, r#"{"success":false,"message":"السائق غير موجود"}"#);
        let action = AdminAction::BlockDriver {
            driver_id: "d1".into(),
        };

        assert_eq!(h.client.perform(&action).await.unwrap(), "تم الحظر بنجاح");
        let sent = h.transport.sent();
        assert_eq!(sent[0].url, "http://localhost:3000/api/admin/drivers/d1/block");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"reason":"حظر يدوي من الإدارة"}"#));

        assert_eq!(
            h.client.perform(&action).await.unwrap_err().user_message(),
            "السائق غير موجود"
        );
    }

    #[tokio::test]
    async fn test_settings_round() {
        let h = harness();
        h.transport
            .reply(200, r#"{"success":true,"settings":{"commissionAmount":2,"pointsEnabled":true}}"#)
            .reply(200, r#"{"success":false}"#);
        let settings = h.client.fetch_settings().await.unwrap();
        assert!(settings.points_enabled);
        assert_eq!(settings.points_per_order, 10);

        let err = h.client.update_settings(&settings).await.unwrap_err();
        assert_eq!(err.user_message(), notices::SAVE_FAILED);
        assert_eq!(h.transport.sent()[1].method, Method::PUT);
    }

    #[test]
    fn test_asset_url() {
        let h = harness();
        assert_eq!(
            h.client.asset_url("uploads/invoice.jpg"),
            "http://localhost:3000/uploads/invoice.jpg"
        );
        assert_eq!(
            h.client.asset_url("/uploads/invoice.jpg"),
            "http://localhost:3000/uploads/invoice.jpg"
        );
        assert_eq!(
            h.client.asset_url("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }
}
