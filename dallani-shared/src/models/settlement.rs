use super::lenient;
use serde::{Deserialize, Serialize};

/// Amount from which a pending settlement is highlighted.
pub const HIGHLIGHT_THRESHOLD: f64 = 50.0;

/// One driver row of the daily settlement report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettlementDriver {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub pending_settlement: f64,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_blocked: bool,
}

impl SettlementDriver {
    pub fn is_highlighted(&self) -> bool {
        self.pending_settlement >= HIGHLIGHT_THRESHOLD
    }

    /// Arabic account state used in the table and the CSV export.
    pub const fn state_label(&self) -> &'static str {
        if self.is_blocked { "محظور" } else { "نشط" }
    }
}

/// Totals returned alongside the daily settlement rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettlementSummary {
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub total_pending: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub drivers_count: u64,
}
