use super::{contains_term, lenient};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// One administrative operation recorded by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditLogEntry {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub action: Option<String>,
    /// Who performed it; `النظام` for automatic operations.
    #[serde(deserialize_with = "lenient::optional_string")]
    pub admin: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub target: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub details: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub created_at: Option<String>,
}

/// Name the backend uses for automatic operations.
pub const SYSTEM_ACTOR: &str = "النظام";

impl AuditLogEntry {
    pub fn action(&self) -> Option<AuditAction> {
        self.action
            .as_deref()
            .and_then(|raw| AuditAction::from_str(raw).ok())
    }

    pub fn is_system(&self) -> bool {
        self.admin.as_deref() == Some(SYSTEM_ACTOR)
    }

    /// Calendar date part of `createdAt`, if it starts with `YYYY-MM-DD`.
    pub fn created_on(&self) -> Option<chrono::NaiveDate> {
        let created = self.created_at.as_deref()?;
        chrono::NaiveDate::parse_from_str(created.get(..10)?, "%Y-%m-%d").ok()
    }

    /// Free-text search over actor, target and details.
    pub fn matches_search(&self, term: &str) -> bool {
        term.is_empty()
            || contains_term(self.admin.as_deref(), term)
            || contains_term(self.target.as_deref(), term)
            || contains_term(self.details.as_deref(), term)
    }
}

/// Known audit actions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuditAction {
    SettlementPaid,
    DriverBlocked,
    DriverUnblocked,
    DriverApproved,
    DisputeResolved,
    OrderCancelled,
}

impl AuditAction {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SettlementPaid => "تسوية",
            Self::DriverBlocked => "حظر سائق",
            Self::DriverUnblocked => "رفع حظر",
            Self::DriverApproved => "موافقة سائق",
            Self::DisputeResolved => "حل نزاع",
            Self::OrderCancelled => "إلغاء طلب",
        }
    }

    /// Label of the filter option selecting this action.
    #[must_use]
    pub const fn filter_label(self) -> &'static str {
        match self {
            Self::SettlementPaid => "التسويات",
            Self::DriverBlocked => "حظر السائقين",
            Self::DriverUnblocked => "رفع الحظر",
            Self::DriverApproved => "موافقات السائقين",
            Self::DisputeResolved => "حل النزاعات",
            Self::OrderCancelled => "إلغاء الطلبات",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::SettlementPaid => "💰",
            Self::DriverBlocked => "🚫",
            Self::DriverUnblocked => "✅",
            Self::DriverApproved => "👤",
            Self::DisputeResolved => "⚖️",
            Self::OrderCancelled => "❌",
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::SettlementPaid | Self::DriverUnblocked => "#4caf50",
            Self::DriverBlocked | Self::OrderCancelled => "#e53935",
            Self::DriverApproved => "#2196f3",
            Self::DisputeResolved => "#ff9800",
        }
    }
}

/// Audit log action category filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AuditFilter {
    pub action: Option<AuditAction>,
}

impl AuditFilter {
    pub fn accepts(self, entry: &AuditLogEntry) -> bool {
        self.action.is_none_or(|action| entry.action() == Some(action))
    }
}
