//! Data transfer objects for the admin API.
//!
//! Every item type tolerates missing and `null` fields; see [`lenient`].

pub mod audit;
pub mod auth;
pub mod customer;
pub mod dispute;
pub mod driver;
pub mod invoice;
pub mod lenient;
pub mod order;
pub mod rating;
pub mod settings;
pub mod settlement;
pub mod stats;

pub use audit::{AuditAction, AuditFilter, AuditLogEntry};
pub use auth::{AdminUser, LoginRequest, LoginResponse};
pub use customer::{Customer, CustomerFilter, CustomerSort, CustomerStats};
pub use dispute::{Dispute, DisputeCounts, DisputeFilter, DisputeStatus, Resolution};
pub use driver::{Driver, DriverFilter, DriverStatus};
pub use invoice::{Invoice, InvoiceFilter, InvoiceState};
pub use order::{Order, OrderStatus};
pub use rating::{Rating, RatingFilter, RatingSummary};
pub use settings::SystemSettings;
pub use settlement::{SettlementDriver, SettlementSummary};
pub use stats::DashboardStats;

use serde::{Deserialize, Serialize};

/// Visual weight of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum BadgeTone {
    Success,
    Warning,
    Danger,
    Info,
    Primary,
    Muted,
}

impl BadgeTone {
    /// CSS class of the badge.
    #[must_use]
    pub fn class(self) -> String {
        format!("badge badge-{}", self.as_ref())
    }
}

/// Name and phone of a person attached to an order or driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub phone: Option<String>,
}

/// The nested `Driver { User { .. } }` shape used inside orders and disputes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverRef {
    #[serde(rename = "User")]
    pub user: Option<Contact>,
}

impl DriverRef {
    pub fn name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.name.as_deref())
    }
}

/// Lower-cased substring match used by every local search.
pub(crate) fn contains_term(haystack: Option<&str>, term: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(term))
}
