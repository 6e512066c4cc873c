//! Display helpers shared by the web tables and the CLI output.

use crate::messages;
use chrono::{DateTime, NaiveDateTime};

/// Currency amount with two decimals.
pub fn money(amount: f64) -> String {
    format!("{amount:.2} د")
}

/// First eight characters of an id.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Filled and empty stars for a 0..=5 rating.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "⭐".repeat(filled), "☆".repeat(5 - filled))
}

/// `YYYY-MM-DD HH:MM` for RFC 3339 or naive ISO timestamps; other values are
/// shown as received.
pub fn display_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return messages::NOT_AVAILABLE.to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_or_else(|_| raw.to_string(), |parsed| parsed.format("%Y-%m-%d %H:%M").to_string())
}

/// The value, or `-` when missing or blank.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|value| !value.trim().is_empty()).unwrap_or("-")
}
