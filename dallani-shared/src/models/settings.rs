use super::lenient;
use serde::{Deserialize, Serialize};

/// Platform-wide switches edited on the settings page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemSettings {
    /// Flat commission per order.
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub commission_amount: f64,
    #[serde(deserialize_with = "lenient::flag")]
    pub stores_enabled: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub points_enabled: bool,
    #[serde(deserialize_with = "lenient::count")]
    pub points_per_order: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub points_for_free_order: u64,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            commission_amount: 1.5,
            stores_enabled: false,
            points_enabled: false,
            points_per_order: 10,
            points_for_free_order: 100,
        }
    }
}

/// Outcome texts of the settings page.
pub mod notices {
    pub const SAVED: &str = "تم تحديث الإعدادات بنجاح";
    pub const SAVE_FAILED: &str = "فشل التحديث";
    pub const LOAD_FAILED: &str = "فشل تحميل الإعدادات";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SystemSettings::default();
        assert!((settings.commission_amount - 1.5).abs() < f64::EPSILON);
        assert!(!settings.stores_enabled);
        assert!(!settings.points_enabled);
        assert_eq!(settings.points_per_order, 10);
        assert_eq!(settings.points_for_free_order, 100);
    }

    #[test]
    fn test_partial_payload_keeps_defaults() {
        let settings: SystemSettings =
            serde_json::from_str(r#"{"commissionAmount":"2.25","pointsEnabled":true}"#).unwrap();
        assert!((settings.commission_amount - 2.25).abs() < f64::EPSILON);
        assert!(settings.points_enabled);
        assert_eq!(settings.points_per_order, 10);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(SystemSettings::default()).unwrap();
        assert_eq!(value["pointsForFreeOrder"], 100);
        assert_eq!(value["storesEnabled"], false);
    }
}
