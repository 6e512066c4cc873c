use super::{contains_term, lenient};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A customer's rating of a completed delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::id")]
    pub order_id: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub customer: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub driver: Option<String>,
    /// Stars, 1 to 5.
    #[serde(deserialize_with = "lenient::count")]
    pub rating: u64,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub comment: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub created_at: Option<String>,
}

impl Rating {
    /// Rating clamped to the 0..=5 star range.
    pub fn stars(&self) -> u8 {
        u8::try_from(self.rating.min(5)).unwrap_or(5)
    }

    pub fn is_positive(&self) -> bool {
        self.stars() >= 4
    }

    pub fn is_negative(&self) -> bool {
        self.stars() <= 2
    }

    /// Driver or customer name search.
    pub fn matches_search(&self, term: &str) -> bool {
        term.is_empty()
            || contains_term(self.driver.as_deref(), term)
            || contains_term(self.customer.as_deref(), term)
    }
}

/// Client-side rating filter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum RatingFilter {
    #[default]
    All,
    Positive,
    Negative,
}

impl RatingFilter {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "جميع التقييمات",
            Self::Positive => "إيجابية (4-5)",
            Self::Negative => "سلبية (1-2)",
        }
    }

    pub fn accepts(self, rating: &Rating) -> bool {
        match self {
            Self::All => true,
            Self::Positive => rating.is_positive(),
            Self::Negative => rating.is_negative(),
        }
    }
}

/// Figures on the ratings summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
}

impl RatingSummary {
    /// Summary over every fetched rating; the average is `0.0` when empty.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let total = ratings.len();
        let sum: u64 = ratings.iter().map(|r| u64::from(r.stars())).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = if total == 0 { 0.0 } else { sum as f64 / total as f64 };
        Self {
            average,
            total,
            positive: ratings.iter().filter(|r| r.is_positive()).count(),
            negative: ratings.iter().filter(|r| r.is_negative()).count(),
        }
    }
}
