use super::{BadgeTone, Contact, DriverRef, contains_term, lenient};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Lifecycle state of a delivery order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Requested,
    Assigned,
    PickedUp,
    EnRoute,
    Delivered,
    Completed,
    Canceled,
    Dispute,
}

impl OrderStatus {
    /// Arabic badge label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Requested => "معلق",
            Self::Assigned => "مقبول",
            Self::PickedUp => "تم الاستلام",
            Self::EnRoute => "في الطريق",
            Self::Delivered => "تم التوصيل",
            Self::Completed => "مكتمل",
            Self::Canceled => "ملغي",
            Self::Dispute => "نزاع",
        }
    }

    /// Plural label used by the status filter.
    #[must_use]
    pub const fn filter_label(self) -> &'static str {
        match self {
            Self::Requested => "معلقة",
            Self::Assigned => "مقبولة",
            Self::PickedUp => "تم الاستلام",
            Self::EnRoute => "في الطريق",
            Self::Delivered => "تم التوصيل",
            Self::Completed => "مكتملة",
            Self::Canceled => "ملغية",
            Self::Dispute => "نزاعات",
        }
    }

    #[must_use]
    pub const fn tone(self) -> BadgeTone {
        match self {
            Self::Requested => BadgeTone::Warning,
            Self::Assigned | Self::PickedUp | Self::EnRoute => BadgeTone::Info,
            Self::Delivered | Self::Completed => BadgeTone::Success,
            Self::Canceled | Self::Dispute => BadgeTone::Danger,
        }
    }
}

/// A delivery order as listed by `admin/orders`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub items_text: Option<String>,
    pub customer: Option<Contact>,
    #[serde(rename = "Driver")]
    pub driver: Option<DriverRef>,
    #[serde(deserialize_with = "lenient::number")]
    pub estimated_price: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub delivery_fee: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub invoice_image_url: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub created_at: Option<String>,
}

impl Order {
    /// Known status, if the raw value is one.
    pub fn status(&self) -> Option<OrderStatus> {
        self.status
            .as_deref()
            .and_then(|raw| OrderStatus::from_str(raw).ok())
    }

    /// Badge label and tone; unknown statuses show the raw value.
    pub fn status_badge(&self) -> (String, BadgeTone) {
        match (self.status(), self.status.as_deref()) {
            (Some(status), _) => (status.label().to_string(), status.tone()),
            (None, Some(raw)) => (raw.to_string(), BadgeTone::Muted),
            (None, None) => ("-".to_string(), BadgeTone::Muted),
        }
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn customer_phone(&self) -> Option<&str> {
        self.customer.as_ref().and_then(|c| c.phone.as_deref())
    }

    pub fn driver_name(&self) -> Option<&str> {
        self.driver.as_ref().and_then(DriverRef::name)
    }

    /// Matches a lower-cased term against id, items text and customer name.
    pub fn matches_search(&self, term: &str) -> bool {
        term.is_empty()
            || contains_term(Some(&self.id), term)
            || contains_term(self.items_text.as_deref(), term)
            || contains_term(self.customer_name(), term)
    }
}
