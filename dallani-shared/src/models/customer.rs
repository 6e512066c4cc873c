use super::lenient;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A customer account as listed by `admin/users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub orders_count: u64,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub register_time: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_blocked: bool,
}

/// Client-side customer filter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum CustomerFilter {
    #[default]
    All,
    WithOrders,
    NoOrders,
    Active,
    Blocked,
}

impl CustomerFilter {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "جميع الزبائن",
            Self::WithOrders => "زبائن لديهم طلبات",
            Self::NoOrders => "زبائن بدون طلبات",
            Self::Active => "زبائن نشطين",
            Self::Blocked => "زبائن محظورين",
        }
    }

    pub fn accepts(self, customer: &Customer) -> bool {
        match self {
            Self::All => true,
            Self::WithOrders => customer.orders_count > 0,
            Self::NoOrders => customer.orders_count == 0,
            Self::Active => !customer.is_blocked,
            Self::Blocked => customer.is_blocked,
        }
    }
}

/// Server-side ordering of the customer list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum CustomerSort {
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl CustomerSort {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "الأحدث أولاً",
            Self::Oldest => "الأقدم أولاً",
            Self::NameAsc => "الاسم (أ-ي)",
            Self::NameDesc => "الاسم (ي-أ)",
        }
    }
}

/// Totals shown on the customers statistics card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerStats {
    pub total: usize,
    pub with_orders: usize,
    pub without_orders: usize,
}

impl CustomerStats {
    /// Counts over the full fetched list, ignoring local filters.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let with_orders = customers.iter().filter(|c| c.orders_count > 0).count();
        Self {
            total: customers.len(),
            with_orders,
            without_orders: customers.len() - with_orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn customers() -> Vec<Customer> {
        serde_json::from_str(
            r#"[
                {"id":"1","name":"Sara","ordersCount":3,"isBlocked":false},
                {"id":"2","name":"Ali","ordersCount":"0","isBlocked":true},
                {"id":"3","name":"Noor","ordersCount":null}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_filters() {
        let customers = customers();
        let count = |filter: CustomerFilter| customers.iter().filter(|c| filter.accepts(c)).count();
        assert_eq!(count(CustomerFilter::All), 3);
        assert_eq!(count(CustomerFilter::WithOrders), 1);
        assert_eq!(count(CustomerFilter::NoOrders), 2);
        assert_eq!(count(CustomerFilter::Active), 2);
        assert_eq!(count(CustomerFilter::Blocked), 1);
    }

    #[test]
    fn test_sort_wire_values() {
        assert_eq!(CustomerSort::NameAsc.as_ref(), "name-asc");
        assert_eq!(CustomerSort::default().to_string(), "newest");
        assert_eq!(CustomerFilter::from_str("with-orders").unwrap(), CustomerFilter::WithOrders);
    }

    #[test]
    fn test_stats() {
        let stats = CustomerStats::from_customers(&customers());
        assert_eq!(
            stats,
            CustomerStats {
                total: 3,
                with_orders: 1,
                without_orders: 2
            }
        );
    }
}
