//! One [`ListResource`] per collection page.

use super::{Criteria, ListPage, ListResource, SearchMode, decode_entries, items_field};
use crate::models::invoice::flatten_by_location;
use crate::models::{
    AuditFilter, AuditLogEntry, Customer, CustomerFilter, CustomerSort, Dispute, DisputeFilter, Driver,
    DriverFilter, Invoice, InvoiceFilter, Order, OrderStatus, Rating, RatingFilter, SettlementDriver,
    SettlementSummary,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `admin/orders`: status and date go to the server, search is local.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orders;

impl ListResource for Orders {
    type Item = Order;
    type Filter = Option<OrderStatus>;
    type Sort = ();
    type Summary = ();

    const PATH: &'static str = "admin/orders";
    const ITEMS_FIELD: &'static str = "orders";
    const SEARCH: SearchMode = SearchMode::Local;

    fn server_params(criteria: &Criteria<Self::Filter, Self::Sort>) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = criteria.filter {
            params.push(("status", status.to_string()));
        }
        if let Some(date) = criteria.date {
            params.push(("date", iso_date(date)));
        }
        params
    }

    fn matches(item: &Order, _criteria: &Criteria<Self::Filter, Self::Sort>, term: &str) -> bool {
        item.matches_search(term)
    }

    fn decode(body: &Value) -> Result<ListPage<Order, ()>, String> {
        Ok(ListPage {
            items: items_field(body, Self::ITEMS_FIELD),
            summary: (),
        })
    }
}

/// `admin/drivers`: status filter and name/phone search are local.
#[derive(Debug, Clone, Copy, Default)]
pub struct Drivers;

impl ListResource for Drivers {
    type Item = Driver;
    type Filter = DriverFilter;
    type Sort = ();
    type Summary = ();

    const PATH: &'static str = "admin/drivers";
    const ITEMS_FIELD: &'static str = "drivers";
    const SEARCH: SearchMode = SearchMode::Local;

    fn server_params(_criteria: &Criteria<Self::Filter, Self::Sort>) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn matches(item: &Driver, criteria: &Criteria<Self::Filter, Self::Sort>, term: &str) -> bool {
        criteria.filter.accepts(item) && item.matches_search(term)
    }

    fn decode(body: &Value) -> Result<ListPage<Driver, ()>, String> {
        Ok(ListPage {
            items: items_field(body, Self::ITEMS_FIELD),
            summary: (),
        })
    }
}

/// `admin/users`: sort and debounced search go to the server, the account
/// filter is local.
#[derive(Debug, Clone, Copy, Default)]
pub struct Customers;

impl ListResource for Customers {
    type Item = Customer;
    type Filter = CustomerFilter;
    type Sort = CustomerSort;
    type Summary = ();

    const PATH: &'static str = "admin/users";
    const ITEMS_FIELD: &'static str = "users";
    const SEARCH: SearchMode = SearchMode::Server;

    fn server_params(criteria: &Criteria<Self::Filter, Self::Sort>) -> Vec<(&'static str, String)> {
        vec![
            ("sort", criteria.sort.to_string()),
            ("search", criteria.search.trim().to_string()),
        ]
    }

    fn matches(item: &Customer, criteria: &Criteria<Self::Filter, Self::Sort>, _term: &str) -> bool {
        criteria.filter.accepts(item)
    }

    fn decode(body: &Value) -> Result<ListPage<Customer, ()>, String> {
        Ok(ListPage {
            items: items_field(body, Self::ITEMS_FIELD),
            summary: (),
        })
    }
}

/// `admin/invoices`: location goes to the server; verification state and
/// order-id search are local. The response groups invoices by location.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invoices;

impl ListResource for Invoices {
    type Item = Invoice;
    type Filter = InvoiceFilter;
    type Sort = ();
    type Summary = ();

    const PATH: &'static str = "admin/invoices";
    const ITEMS_FIELD: &'static str = "invoices";
    const SEARCH: SearchMode = SearchMode::Local;

    fn server_params(criteria: &Criteria<Self::Filter, Self::Sort>) -> Vec<(&'static str, String)> {
        criteria
            .filter
            .location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .map(|location| vec![("location", location.to_string())])
            .unwrap_or_default()
    }

    fn matches(item: &Invoice, criteria: &Criteria<Self::Filter, Self::Sort>, term: &str) -> bool {
        criteria.filter.accepts(item) && item.matches_search(term)
    }

    fn decode(body: &Value) -> Result<ListPage<Invoice, ()>, String> {
        let items = match body.get(Self::ITEMS_FIELD) {
            Some(Value::Object(groups)) => {
                let groups: BTreeMap<String, Vec<Invoice>> = groups
                    .iter()
                    .map(|(location, entries)| (location.clone(), decode_entries(entries)))
                    .collect();
                flatten_by_location(groups)
            }
            Some(Value::Array(_)) => items_field(body, Self::ITEMS_FIELD),
            _ => Vec::new(),
        };
        Ok(ListPage { items, summary: () })
    }
}

/// `admin/disputes`: status filter is local.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disputes;

impl ListResource for Disputes {
    type Item = Dispute;
    type Filter = DisputeFilter;
    type Sort = ();
    type Summary = ();

    const PATH: &'static str = "admin/disputes";
    const ITEMS_FIELD: &'static str = "disputes";
    const SEARCH: SearchMode = SearchMode::Local;

    fn server_params(_criteria: &Criteria<Self::Filter, Self::Sort>) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn matches(item: &Dispute, criteria: &Criteria<Self::Filter, Self::Sort>, _term: &str) -> bool {
        criteria.filter.accepts(item)
    }

    fn decode(body: &Value) -> Result<ListPage<Dispute, ()>, String> {
        Ok(ListPage {
            items: items_field(body, Self::ITEMS_FIELD),
            summary: (),
        })
    }
}

/// `admin/settlements/daily`: the report date goes to the server; the body
/// carries the totals next to the rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settlements;

impl ListResource for Settlements {
    type Item = SettlementDriver;
    type Filter = ();
    type Sort = ();
    type Summary = SettlementSummary;

    const PATH: &'static str = "admin/settlements/daily";
    const ITEMS_FIELD: &'static str = "drivers";
    const SEARCH: SearchMode = SearchMode::Local;

    fn server_params(criteria: &Criteria<Self::Filter, Self::Sort>) -> Vec<(&'static str, String)> {
        criteria
            .date
            .map(|date| vec![("date", iso_date(date))])
            .unwrap_or_default()
    }

    fn matches(_item: &SettlementDriver, _criteria: &Criteria<Self::Filter, Self::Sort>, _term: &str) -> bool {
        true
    }

    fn decode(body: &Value) -> Result<ListPage<SettlementDriver, SettlementSummary>, String> {
        let summary = serde_json::from_value(body.clone()).map_err(|err| err.to_string())?;
        Ok(ListPage {
            items: items_field(body, Self::ITEMS_FIELD),
            summary,
        })
    }
}

/// `admin/ratings`: positive/negative filter and name search are local.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ratings;

impl ListResource for Ratings {
    type Item = Rating;
    type Filter = RatingFilter;
    type Sort = ();
    type Summary = ();

    const PATH: &'static str = "admin/ratings";
    const ITEMS_FIELD: &'static str = "ratings";
    const SEARCH: SearchMode = SearchMode::Local;

    fn server_params(_criteria: &Criteria<Self::Filter, Self::Sort>) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn matches(item: &Rating, criteria: &Criteria<Self::Filter, Self::Sort>, term: &str) -> bool {
        criteria.filter.accepts(item) && item.matches_search(term)
    }

    fn decode(body: &Value) -> Result<ListPage<Rating, ()>, String> {
        Ok(ListPage {
            items: items_field(body, Self::ITEMS_FIELD),
            summary: (),
        })
    }
}

/// `admin/audit-logs`: action, day and free text are all local.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLogs;

impl ListResource for AuditLogs {
    type Item = AuditLogEntry;
    type Filter = AuditFilter;
    type Sort = ();
    type Summary = ();

    const PATH: &'static str = "admin/audit-logs";
    const ITEMS_FIELD: &'static str = "logs";
    const SEARCH: SearchMode = SearchMode::Local;

    fn server_params(_criteria: &Criteria<Self::Filter, Self::Sort>) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn matches(item: &AuditLogEntry, criteria: &Criteria<Self::Filter, Self::Sort>, term: &str) -> bool {
        criteria.filter.accepts(item)
            && criteria.date.is_none_or(|day| item.created_on() == Some(day))
            && item.matches_search(term)
    }

    fn decode(body: &Value) -> Result<ListPage<AuditLogEntry, ()>, String> {
        Ok(ListPage {
            items: items_field(body, Self::ITEMS_FIELD),
            summary: (),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditAction, InvoiceState};
    use crate::query::{ListQuery, request_path, Effect};
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_request_paths() {
        let mut orders = Criteria::<Option<OrderStatus>, ()>::default();
        assert_eq!(request_path::<Orders>(&orders), "admin/orders?");
        orders.filter = Some(OrderStatus::PickedUp);
        orders.date = NaiveDate::from_ymd_opt(2025, 1, 5);
        assert_eq!(
            request_path::<Orders>(&orders),
            "admin/orders?status=PICKED_UP&date=2025-01-05"
        );

        let customers = Criteria {
            filter: CustomerFilter::All,
            date: None,
            search: " أحمد ".to_string(),
            sort: CustomerSort::Oldest,
        };
        assert_eq!(
            request_path::<Customers>(&customers),
            "admin/users?sort=oldest&search=%D8%A3%D8%AD%D9%85%D8%AF"
        );

        let settlements = Criteria {
            date: NaiveDate::from_ymd_opt(2025, 11, 26),
            ..Criteria::default()
        };
        assert_eq!(
            request_path::<Settlements>(&settlements),
            "admin/settlements/daily?date=2025-11-26"
        );

        let invoices = Criteria {
            filter: InvoiceFilter {
                location: Some("دمشق".into()),
                state: InvoiceState::All,
            },
            ..Criteria::default()
        };
        assert_eq!(
            request_path::<Invoices>(&invoices),
            "admin/invoices?location=%D8%AF%D9%85%D8%B4%D9%82"
        );
        assert_eq!(request_path::<Drivers>(&Criteria::default()), "admin/drivers?");
    }

    #[test]
    fn test_invoice_groups_flatten() {
        let body = json!({"success": true, "invoices": {
            "دمشق": [{"id": "1", "orderId": "10", "verified": true}],
            "حلب": [{"id": "2", "orderId": "20"}, "garbage"]
        }});
        let page = Invoices::decode(&body).unwrap();
        let ids: Vec<_> = page.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert_eq!(page.items[1].location.as_deref(), Some("دمشق"));
    }

    #[test]
    fn test_settlement_summary() {
        let body = json!({"success": true, "totalPending": "75.5", "driversCount": 2, "drivers": [
            {"id": "d1", "name": "أحمد", "pendingSettlement": "25.5"},
            {"id": "d2", "name": "خالد", "pendingSettlement": 50}
        ]});
        let page = Settlements::decode(&body).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.summary.drivers_count, 2);
        assert!((page.summary.total_pending - 75.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_items_field_is_empty() {
        let page = Orders::decode(&json!({"success": true})).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_audit_date_is_local() {
        let mut query = ListQuery::<AuditLogs>::new(Duration::from_millis(500));
        let Effect::Fetch(ticket) = query.mount() else {
            panic!("expected fetch")
        };
        let body = json!({"success": true, "logs": [
            {"id": "1", "action": "settlement_paid", "createdAt": "2025-11-26T12:00:00"},
            {"id": "2", "action": "driver_blocked", "createdAt": "2025-11-25T10:00:00"}
        ]});
        query.resolve(&ticket, Ok(AuditLogs::decode(&body).unwrap()));

        assert_eq!(query.set_date(NaiveDate::from_ymd_opt(2025, 11, 25)), Effect::None);
        assert_eq!(query.visible().len(), 1);
        assert_eq!(query.visible()[0].id, "2");

        assert_eq!(
            query.set_filter(AuditFilter {
                action: Some(AuditAction::SettlementPaid)
            }),
            Effect::None
        );
        assert!(query.visible().is_empty());
    }
}
