use super::{BadgeTone, Contact, DriverRef, lenient};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The order a dispute was raised against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisputeOrder {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub customer: Option<Contact>,
    #[serde(rename = "Driver")]
    pub driver: Option<DriverRef>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub invoice_image_url: Option<String>,
}

/// A dispute as listed by `admin/disputes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dispute {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub order_id: Option<String>,
    #[serde(rename = "Order")]
    pub order: Option<DisputeOrder>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub dispute_reason: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub status: Option<String>,
}

impl Dispute {
    /// Missing status counts as an open dispute.
    pub fn status(&self) -> DisputeStatus {
        match self.status.as_deref() {
            Some("investigating") => DisputeStatus::Investigating,
            Some("resolved") => DisputeStatus::Resolved,
            _ => DisputeStatus::Open,
        }
    }

    /// Own order id, or the embedded order's id.
    pub fn order_ref(&self) -> Option<&str> {
        self.order_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.order.as_ref().map(|order| order.id.as_str()).filter(|id| !id.is_empty()))
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.order
            .as_ref()
            .and_then(|order| order.customer.as_ref())
            .and_then(|customer| customer.name.as_deref())
    }

    pub fn driver_name(&self) -> Option<&str> {
        self.order
            .as_ref()
            .and_then(|order| order.driver.as_ref())
            .and_then(DriverRef::name)
    }

    pub fn evidence_url(&self) -> Option<&str> {
        self.order
            .as_ref()
            .and_then(|order| order.invoice_image_url.as_deref())
    }
}

/// Normalized dispute state. `DISPUTE` and `open` are both open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum DisputeStatus {
    Open,
    Investigating,
    Resolved,
}

impl DisputeStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "نزاع",
            Self::Investigating => "قيد التحقيق",
            Self::Resolved => "تم الحل",
        }
    }

    #[must_use]
    pub const fn tone(self) -> BadgeTone {
        match self {
            Self::Open => BadgeTone::Danger,
            Self::Investigating => BadgeTone::Warning,
            Self::Resolved => BadgeTone::Success,
        }
    }
}

/// Client-side dispute filter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum DisputeFilter {
    #[default]
    All,
    Open,
    Investigating,
    Resolved,
}

impl DisputeFilter {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "جميع النزاعات",
            Self::Open => "نزاعات مفتوحة",
            Self::Investigating => "قيد التحقيق",
            Self::Resolved => "تم حلها",
        }
    }

    pub fn accepts(self, dispute: &Dispute) -> bool {
        match self {
            Self::All => true,
            Self::Open => dispute.status() == DisputeStatus::Open,
            Self::Investigating => dispute.status() == DisputeStatus::Investigating,
            Self::Resolved => dispute.status() == DisputeStatus::Resolved,
        }
    }
}

/// Per-status counters shown above the disputes table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisputeCounts {
    pub open: usize,
    pub investigating: usize,
    pub resolved: usize,
}

impl DisputeCounts {
    pub fn from_disputes(disputes: &[Dispute]) -> Self {
        disputes.iter().fold(Self::default(), |mut counts, dispute| {
            match dispute.status() {
                DisputeStatus::Open => counts.open += 1,
                DisputeStatus::Investigating => counts.investigating += 1,
                DisputeStatus::Resolved => counts.resolved += 1,
            }
            counts
        })
    }
}

/// Outcome chosen when resolving a dispute.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Resolution {
    #[default]
    NoAction,
    Refund,
    Penalty,
}

impl Resolution {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoAction => "لا إجراء",
            Self::Refund => "استرداد للزبون",
            Self::Penalty => "غرامة للسائق",
        }
    }
}
