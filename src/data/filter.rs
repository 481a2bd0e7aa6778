use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::model::LaunchRecord;
use crate::error::DataError;

/// Selector value meaning "no site restriction".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site filter
// ---------------------------------------------------------------------------

/// Which launch site(s) a query covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Exact, case-sensitive site match. `All` matches everything.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(site) => record.launch_site == *site,
        }
    }

    /// Human-readable label used in chart titles and the selector.
    pub fn label(&self) -> &str {
        match self {
            SiteFilter::All => "All Sites",
            SiteFilter::Site(site) => site,
        }
    }
}

impl FromStr for SiteFilter {
    type Err = std::convert::Infallible;

    /// `"ALL"` is the wildcard; anything else is taken as an exact site id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(s.to_string())
        })
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => write!(f, "{ALL_SITES}"),
            SiteFilter::Site(site) => write!(f, "{site}"),
        }
    }
}

impl From<SiteFilter> for String {
    fn from(filter: SiteFilter) -> Self {
        filter.to_string()
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Closed payload interval `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Build a range. Rejects `low > high` and NaN bounds. Bounds outside the
    /// dataset's extremes are allowed and simply match nothing extra.
    pub fn new(low: f64, high: f64) -> Result<Self, DataError> {
        if low.is_nan() || high.is_nan() || low > high {
            return Err(DataError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_kg: f64) -> bool {
        self.low <= payload_kg && payload_kg <= self.high
    }
}
