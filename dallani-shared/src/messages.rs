//! User-facing Arabic strings.
//!
//! Every message shown to staff lives here so the web pages and the CLI
//! report the same wording for the same failure.

/// Login submitted with an empty email or password.
pub const MISSING_CREDENTIALS: &str = "يرجى إدخال البريد الإلكتروني وكلمة المرور";
/// Login throttled by the backend and no server message was supplied.
pub const RATE_LIMITED: &str = "محاولات كثيرة لتسجيل الدخول، يرجى المحاولة بعد قليل";
/// Generic login failure.
pub const LOGIN_FAILED: &str = "فشل تسجيل الدخول";
/// Generic failure of any other request.
pub const GENERIC_FAILURE: &str = "حدث خطأ";
/// Prefix for transport failures, followed by the underlying error text.
pub const CONNECTION_FAILED: &str = "خطأ في الاتصال بالخادم";
/// The backend rejected the session.
pub const SESSION_EXPIRED: &str = "انتهت الجلسة، يرجى تسجيل الدخول مجدداً";
/// Nothing to export.
pub const NOTHING_TO_EXPORT: &str = "لا توجد بيانات للتصدير";
/// Fallback for a missing value in tables.
pub const NOT_AVAILABLE: &str = "غير متوفر";
/// The same action was requested while it is still being sent.
pub const ACTION_IN_FLIGHT: &str = "الإجراء قيد التنفيذ بالفعل";
/// Reason sent with every manual block.
pub const MANUAL_BLOCK_REASON: &str = "حظر يدوي من الإدارة";
/// Loading indicator text.
pub const LOADING: &str = "جاري التحميل...";

/// Login failure that embeds the HTTP status when the body was not readable.
#[must_use]
pub fn login_failed_with_status(status: u16) -> String {
    format!("{LOGIN_FAILED} (رمز الحالة: {status})")
}

/// Request failure that embeds the HTTP status when the body was not readable.
#[must_use]
pub fn request_failed_with_status(status: u16) -> String {
    format!("فشل الطلب (رمز الحالة: {status})")
}

pub const RETRY: &str = "إعادة المحاولة";
