//! Outcome aggregation and payload/outcome projection.
//!
//! Both functions are pure: they read the dataset, never cache and never
//! mutate, so the caller can recompute them on every control change.

use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::{PayloadRange, SiteFilter};
use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Outcome aggregation
// ---------------------------------------------------------------------------

/// Success/failure counts for one site filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub title: String,
    /// Only outcomes that actually occur are present; empty when nothing matched.
    pub counts: BTreeMap<Outcome, usize>,
}

impl OutcomeSummary {
    /// Number of records the counts were taken over.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Fraction of successful launches, `None` when nothing matched.
    pub fn success_ratio(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.count(Outcome::Success) as f64 / total as f64)
    }
}

/// Count records matching `site`, grouped by outcome.
pub fn outcome_counts(dataset: &LaunchDataset, site: &SiteFilter) -> OutcomeSummary {
    let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
    for rec in dataset.records().iter().filter(|r| site.matches(r)) {
        *counts.entry(rec.outcome).or_default() += 1;
    }

    OutcomeSummary {
        title: format!("Success Rate for {}", site.label()),
        counts,
    }
}

// ---------------------------------------------------------------------------
// Payload/outcome projection
// ---------------------------------------------------------------------------

/// One point of the payload-vs-outcome scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

/// Filtered, projected records for the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadScatter {
    pub title: String,
    /// In dataset order.
    pub points: Vec<ScatterPoint>,
}

impl PayloadScatter {
    /// Group points by booster category (one plot series per category).
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&ScatterPoint>> {
        let mut grouped: BTreeMap<&str, Vec<&ScatterPoint>> = BTreeMap::new();
        for p in &self.points {
            grouped
                .entry(p.booster_version_category.as_str())
                .or_default()
                .push(p);
        }
        grouped
    }
}

/// Records matching `site` with payload inside `range`, in dataset order.
pub fn payload_scatter(
    dataset: &LaunchDataset,
    site: &SiteFilter,
    range: PayloadRange,
) -> PayloadScatter {
    let points = dataset
        .records()
        .iter()
        .filter(|r| site.matches(r) && range.contains(r.payload_mass_kg))
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            outcome: r.outcome,
            booster_version_category: r.booster_version_category.clone(),
        })
        .collect();

    PayloadScatter {
        title: format!("Payload vs. Success Rate for {}", site.label()),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::LaunchRecord;

    fn sample() -> LaunchDataset {
        let recs: Vec<LaunchRecord> = vec![
            record("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            record("CCAFS LC-40", 525.0, Outcome::Failure, "v1.0"),
            record("VAFB SLC-4E", 500.0, Outcome::Failure, "v1.1"),
            record("KSC LC-39A", 2490.0, Outcome::Success, "FT"),
            record("CCAFS LC-40", 3600.0, Outcome::Success, "FT"),
            record("KSC LC-39A", 5300.0, Outcome::Failure, "FT"),
            record("VAFB SLC-4E", 9600.0, Outcome::Success, "B4"),
            record("KSC LC-39A", 3600.0, Outcome::Success, "B4"),
        ];
        LaunchDataset::from_records(recs).unwrap()
    }

    #[test]
    fn test_outcome_counts_all_sites() {
        let ds = sample();
        let summary = outcome_counts(&ds, &SiteFilter::All);
        assert_eq!(summary.title, "Success Rate for All Sites");
        assert_eq!(summary.count(Outcome::Success), 4);
        assert_eq!(summary.count(Outcome::Failure), 4);
        assert_eq!(summary.total(), ds.len());
        assert_eq!(summary.success_ratio(), Some(0.5));
    }

    #[test]
    fn test_outcome_counts_single_site() {
        let ds = sample();
        let summary = outcome_counts(&ds, &SiteFilter::Site("KSC LC-39A".into()));
        assert_eq!(summary.title, "Success Rate for KSC LC-39A");
        assert_eq!(summary.count(Outcome::Success), 2);
        assert_eq!(summary.count(Outcome::Failure), 1);
    }

    #[test]
    fn test_outcome_counts_only_present_keys() {
        let ds = LaunchDataset::from_records(vec![record("A", 1.0, Outcome::Success, "FT")]).unwrap();
        let summary = outcome_counts(&ds, &SiteFilter::All);
        assert_eq!(summary.counts.len(), 1);
        assert!(!summary.counts.contains_key(&Outcome::Failure));
    }

    #[test]
    fn test_unknown_site_is_empty_not_error() {
        let ds = sample();
        let site = SiteFilter::Site("Boca Chica".into());
        let summary = outcome_counts(&ds, &site);
        assert!(summary.counts.is_empty());
        assert_eq!(summary.success_ratio(), None);

        let range = PayloadRange::new(0.0, 10_000.0).unwrap();
        let scatter = payload_scatter(&ds, &site, range);
        assert!(scatter.points.is_empty());
        assert_eq!(scatter.title, "Payload vs. Success Rate for Boca Chica");
    }

    #[test]
    fn test_scatter_keeps_dataset_order_and_bounds() {
        let ds = sample();
        let range = PayloadRange::new(500.0, 3600.0).unwrap();
        let scatter = payload_scatter(&ds, &SiteFilter::All, range);
        let payloads: Vec<f64> = scatter.points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(payloads, [525.0, 500.0, 2490.0, 3600.0, 3600.0]);
    }

    #[test]
    fn test_scatter_site_and_range_combined() {
        let ds = sample();
        let range = PayloadRange::new(3000.0, 6000.0).unwrap();
        let scatter = payload_scatter(&ds, &SiteFilter::Site("KSC LC-39A".into()), range);
        assert_eq!(scatter.points.len(), 2);
        assert_eq!(scatter.points[0].payload_mass_kg, 5300.0);
        assert_eq!(scatter.points[0].outcome, Outcome::Failure);
        assert_eq!(scatter.points[1].booster_version_category, "B4");
    }

    #[test]
    fn test_scatter_point_range() {
        let ds = sample();
        let range = PayloadRange::new(2490.0, 2490.0).unwrap();
        let scatter = payload_scatter(&ds, &SiteFilter::All, range);
        assert_eq!(scatter.points.len(), 1);
        assert_eq!(scatter.points[0].booster_version_category, "FT");
    }

    #[test]
    fn test_scatter_range_beyond_bounds_no_clamping() {
        let ds = sample();
        let range = PayloadRange::new(-5000.0, 50_000.0).unwrap();
        assert_eq!(payload_scatter(&ds, &SiteFilter::All, range).points.len(), ds.len());

        let above = PayloadRange::new(10_000.0, 20_000.0).unwrap();
        assert!(payload_scatter(&ds, &SiteFilter::All, above).points.is_empty());
    }

    #[test]
    fn test_by_category_groups_points() {
        let ds = sample();
        let range = PayloadRange::new(0.0, 10_000.0).unwrap();
        let scatter = payload_scatter(&ds, &SiteFilter::All, range);
        let grouped = scatter.by_category();
        assert_eq!(grouped.len(), 4);
        assert_eq!(grouped["FT"].len(), 3);
        assert_eq!(grouped["v1.0"].len(), 2);
    }

    #[test]
    fn test_summary_serializes_outcome_keys() {
        let ds = sample();
        let json = serde_json::to_value(outcome_counts(&ds, &SiteFilter::All)).unwrap();
        assert_eq!(json["counts"]["success"], 4);
        assert_eq!(json["counts"]["failure"], 4);
    }
}
