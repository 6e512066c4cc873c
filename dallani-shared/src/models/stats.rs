use super::lenient;
use serde::{Deserialize, Serialize};

/// Headline figures shown on the dashboard. Missing values are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "lenient::count")]
    pub total_orders: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub pending_orders: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub active_drivers: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub blocked_drivers: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub total_drivers: u64,
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub total_pending_settlement: f64,
}
