use super::{BadgeTone, contains_term, lenient};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// An uploaded purchase invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::id")]
    pub order_id: String,
    /// Driver display name.
    #[serde(deserialize_with = "lenient::optional_string")]
    pub driver: Option<String>,
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub uploaded_at: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub verified: bool,
    /// Group the invoice was listed under.
    #[serde(deserialize_with = "lenient::optional_string")]
    pub location: Option<String>,
}

impl Invoice {
    pub fn state_badge(&self) -> (&'static str, BadgeTone) {
        if self.verified {
            ("موثقة ✓", BadgeTone::Success)
        } else {
            ("بانتظار التوثيق", BadgeTone::Warning)
        }
    }

    /// Order-id search.
    pub fn matches_search(&self, term: &str) -> bool {
        term.is_empty() || contains_term(Some(&self.order_id), term)
    }
}

/// Flattens `{location: [invoice, ..]}` into one list, locations in sorted
/// order, each invoice tagged with the location it came from.
pub fn flatten_by_location(groups: BTreeMap<String, Vec<Invoice>>) -> Vec<Invoice> {
    groups
        .into_iter()
        .flat_map(|(location, invoices)| {
            invoices.into_iter().map(move |mut invoice| {
                invoice.location = Some(location.clone());
                invoice
            })
        })
        .collect()
}

/// Verification state filter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum InvoiceState {
    #[default]
    All,
    Verified,
    Pending,
}

impl InvoiceState {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "جميع الفواتير",
            Self::Verified => "موثقة",
            Self::Pending => "بانتظار التوثيق",
        }
    }
}

/// Invoice filter: `location` is sent to the server, `state` is applied locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InvoiceFilter {
    pub location: Option<String>,
    pub state: InvoiceState,
}

impl InvoiceFilter {
    pub fn accepts(&self, invoice: &Invoice) -> bool {
        match self.state {
            InvoiceState::All => true,
            InvoiceState::Verified => invoice.verified,
            InvoiceState::Pending => !invoice.verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_tags_and_orders_locations() {
        let groups: BTreeMap<String, Vec<Invoice>> = serde_json::from_str(
            r#"{
                "حلب": [{"id":"2","orderId":"20","amount":"4.5"}],
                "دمشق": [{"id":"1","orderId":"10","amount":5.5,"verified":true}, {"id":"3","orderId":"30"}]
            }"#,
        )
        .unwrap();
        let invoices = flatten_by_location(groups);
        let ids: Vec<_> = invoices.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["2", "1", "3"]);
        assert_eq!(invoices[0].location.as_deref(), Some("حلب"));
        assert_eq!(invoices[2].location.as_deref(), Some("دمشق"));
        assert_eq!(invoices[0].amount, 4.5);
    }

    #[test]
    fn test_state_filter() {
        let verified = Invoice {
            verified: true,
            ..Invoice::default()
        };
        let pending = Invoice::default();
        let filter = InvoiceFilter {
            location: None,
            state: InvoiceState::Pending,
        };
        assert!(filter.accepts(&pending));
        assert!(!filter.accepts(&verified));
        assert!(InvoiceFilter::default().accepts(&verified));
    }

    #[test]
    fn test_order_id_search() {
        let invoice = Invoice {
            order_id: "1003".into(),
            ..Invoice::default()
        };
        assert!(invoice.matches_search("100"));
        assert!(!invoice.matches_search("2"));
    }
}
