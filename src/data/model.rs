use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Encoded as `0` (failure) / `1` (success) in source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value as stored in the dataset.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Interpret a numeric class value. Only exact `0` and `1` are accepted.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    /// Parse a textual class cell (`"0"`, `"1"`, `"1.0"`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<f64>().ok().and_then(Self::from_class)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Always finite and non-negative (checked at load time).
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// PayloadBounds
// ---------------------------------------------------------------------------

/// Extremes of `payload_mass_kg` across the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadBounds {
    /// Exact minimum payload.
    pub min_kg: f64,
    /// Exact maximum payload.
    pub max_kg: f64,
}

impl PayloadBounds {
    /// Integer minimum, truncated toward zero.
    pub fn slider_min(&self) -> i64 {
        self.min_kg.trunc() as i64
    }

    /// Integer maximum, truncated toward zero. May sit below `max_kg` when the
    /// heaviest payload is fractional; use `full_range` to cover every record.
    pub fn slider_max(&self) -> i64 {
        self.max_kg.trunc() as i64
    }

    /// Exact `[min_kg, max_kg]` as a `(low, high)` pair.
    pub fn full_range(&self) -> (f64, f64) {
        (self.min_kg, self.max_kg)
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with indices computed once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    /// Sorted distinct booster version categories.
    booster_categories: BTreeSet<String>,
    payload_bounds: PayloadBounds,
}

impl LaunchDataset {
    /// Build the dataset and its indices. Fails on an empty record list since
    /// the payload bounds would be undefined.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataError> {
        let first = records.first().ok_or(DataError::Empty)?;
        let mut bounds = PayloadBounds {
            min_kg: first.payload_mass_kg,
            max_kg: first.payload_mass_kg,
        };
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            bounds.min_kg = bounds.min_kg.min(rec.payload_mass_kg);
            bounds.max_kg = bounds.max_kg.max(rec.payload_mass_kg);
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_version_category.clone());
        }

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds: bounds,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn payload_bounds(&self) -> PayloadBounds {
        self.payload_bounds
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a successfully built dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, outcome: Outcome, category: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_version_category: category.to_string(),
        }
    }

    #[test]
    fn test_outcome_parse() {
        assert_eq!(Outcome::parse("0"), Some(Outcome::Failure));
        assert_eq!(Outcome::parse(" 1 "), Some(Outcome::Success));
        assert_eq!(Outcome::parse("1.0"), Some(Outcome::Success));
        assert_eq!(Outcome::parse("2"), None);
        assert_eq!(Outcome::parse("yes"), None);
        assert_eq!(Outcome::Success.class(), 1);
    }

    #[test]
    fn test_from_records_indices() {
        let ds = LaunchDataset::from_records(vec![
            record("VAFB SLC-4E", 9600.0, Outcome::Success, "FT"),
            record("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            record("VAFB SLC-4E", 500.5, Outcome::Failure, "B4"),
        ])
        .unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["VAFB SLC-4E", "CCAFS LC-40"]);
        let cats: Vec<&str> = ds.booster_categories().iter().map(String::as_str).collect();
        assert_eq!(cats, ["B4", "FT", "v1.0"]);
        assert_eq!(ds.payload_bounds().min_kg, 0.0);
        assert_eq!(ds.payload_bounds().max_kg, 9600.0);
    }

    #[test]
    fn test_slider_bounds_truncate() {
        let bounds = PayloadBounds {
            min_kg: 362.7,
            max_kg: 9600.2,
        };
        assert_eq!(bounds.slider_min(), 362);
        assert_eq!(bounds.slider_max(), 9600);
        assert_eq!(bounds.full_range(), (362.7, 9600.2));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = LaunchDataset::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, DataError::Empty));
    }
}
