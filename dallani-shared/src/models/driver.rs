use super::{BadgeTone, Contact, contains_term, lenient};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Account status the backend reports for drivers awaiting review.
pub const PENDING_REVIEW: &str = "PENDING_REVIEW";

/// A driver as listed by `admin/drivers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Driver {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(rename = "User")]
    pub user: Option<Contact>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub plate_number: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "lenient::count")]
    pub total_deliveries: u64,
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub pending_settlement: f64,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_approved: bool,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub account_status: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_blocked: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_available: bool,
}

/// Derived driver status, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverStatus {
    AwaitingApproval,
    Blocked,
    Online,
    Offline,
}

impl DriverStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AwaitingApproval => "بانتظار الموافقة",
            Self::Blocked => "محظور",
            Self::Online => "متصل",
            Self::Offline => "غير متصل",
        }
    }

    #[must_use]
    pub const fn tone(self) -> BadgeTone {
        match self {
            Self::AwaitingApproval => BadgeTone::Warning,
            Self::Blocked => BadgeTone::Danger,
            Self::Online => BadgeTone::Success,
            Self::Offline => BadgeTone::Muted,
        }
    }
}

impl Driver {
    pub fn name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.name.as_deref())
    }

    pub fn phone(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.phone.as_deref())
    }

    /// Not yet approved, or explicitly under review.
    pub fn is_pending(&self) -> bool {
        !self.is_approved || self.account_status.as_deref() == Some(PENDING_REVIEW)
    }

    pub fn status(&self) -> DriverStatus {
        if self.is_pending() {
            DriverStatus::AwaitingApproval
        } else if self.is_blocked {
            DriverStatus::Blocked
        } else if self.is_available {
            DriverStatus::Online
        } else {
            DriverStatus::Offline
        }
    }

    pub fn matches_search(&self, term: &str) -> bool {
        term.is_empty() || contains_term(self.name(), term) || contains_term(self.phone(), term)
    }
}

/// Client-side driver filter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum DriverFilter {
    #[default]
    All,
    Online,
    Blocked,
    Pending,
}

impl DriverFilter {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "جميع السائقين",
            Self::Online => "متصلون",
            Self::Blocked => "محظورون",
            Self::Pending => "بانتظار الموافقة",
        }
    }

    pub fn accepts(self, driver: &Driver) -> bool {
        match self {
            Self::All => true,
            Self::Online => driver.is_available,
            Self::Blocked => driver.is_blocked,
            Self::Pending => driver.is_pending(),
        }
    }
}
