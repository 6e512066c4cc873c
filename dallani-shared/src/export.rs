//! Settlements CSV export.
//!
//! The document starts with a UTF-8 BOM so spreadsheet tools detect the
//! encoding of the Arabic text.

use crate::errors::ExportError;
use crate::models::SettlementDriver;
use chrono::NaiveDate;

/// UTF-8 byte order mark.
pub const BOM: &str = "\u{FEFF}";
/// MIME type of the export.
pub const CSV_MIME: &str = "text/csv;charset=utf-8;";

const HEADER: [&str; 4] = ["السائق", "الهاتف", "المبلغ المستحق", "الحالة"];

/// Quotes a field containing a separator, quote or line break.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders the daily settlement rows.
///
/// # Errors
/// Returns [`ExportError::Empty`] when there are no drivers.
pub fn settlements_csv(drivers: &[SettlementDriver]) -> Result<String, ExportError> {
    if drivers.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut rows = Vec::with_capacity(drivers.len() + 1);
    rows.push(HEADER.join(","));
    for driver in drivers {
        let fields = [
            csv_escape(driver.name.as_deref().unwrap_or_default()),
            csv_escape(driver.phone.as_deref().unwrap_or_default()),
            format!("{:.2}", driver.pending_settlement),
            driver.state_label().to_string(),
        ];
        rows.push(fields.join(","));
    }

    Ok(format!("{BOM}{}", rows.join("\n")))
}

/// `settlements_<YYYY-MM-DD>.csv`
pub fn settlements_filename(date: NaiveDate) -> String {
    format!("settlements_{}.csv", date.format("%Y-%m-%d"))
}
