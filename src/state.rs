use std::path::Path;
use std::sync::Arc;

use launch_dash::data::{
    load_file, outcome_counts, payload_scatter, LaunchDataset, OutcomeSummary, PayloadRange,
    PayloadScatter, SiteFilter,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded). Shared read-only.
    pub dataset: Option<Arc<LaunchDataset>>,

    /// Current site selection.
    pub site: SiteFilter,

    /// Current payload range, always `low <= high`.
    payload_low: f64,
    payload_high: f64,

    /// Step of the range sliders, in kg.
    pub payload_step: f64,

    /// Results of the last recompute.
    pub outcomes: Option<OutcomeSummary>,
    pub scatter: Option<PayloadScatter>,

    /// Booster category colours for the scatter.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(payload_step: f64) -> Self {
        Self {
            dataset: None,
            site: SiteFilter::All,
            payload_low: 0.0,
            payload_high: 0.0,
            payload_step,
            outcomes: None,
            scatter: None,
            color_map: None,
            status_message: None,
        }
    }

    /// Load a dataset from disk. Failures are logged and surfaced in the
    /// status message; the previous dataset is kept.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(Arc::new(dataset)),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset: reset controls to "all sites, full range".
    pub fn set_dataset(&mut self, dataset: Arc<LaunchDataset>) {
        self.color_map = Some(ColorMap::new(dataset.booster_categories()));
        self.site = SiteFilter::All;
        self.dataset = Some(dataset);
        self.status_message = None;
        self.reset_range();
    }

    pub fn payload_low(&self) -> f64 {
        self.payload_low
    }

    pub fn payload_high(&self) -> f64 {
        self.payload_high
    }

    /// Exact payload extremes of the loaded dataset; the sliders span these
    /// so the default range covers every record.
    pub fn slider_bounds(&self) -> Option<(f64, f64)> {
        self.dataset.as_ref().map(|ds| ds.payload_bounds().full_range())
    }

    pub fn set_site(&mut self, site: SiteFilter) {
        if self.site != site {
            self.site = site;
            self.refresh();
        }
    }

    /// Move the lower handle; drags the upper one along if they cross.
    pub fn set_payload_low(&mut self, low: f64) {
        self.payload_low = low;
        if self.payload_high < low {
            self.payload_high = low;
        }
        self.refresh();
    }

    /// Move the upper handle; drags the lower one along if they cross.
    pub fn set_payload_high(&mut self, high: f64) {
        self.payload_high = high;
        if self.payload_low > high {
            self.payload_low = high;
        }
        self.refresh();
    }

    /// Restore the full payload range of the dataset.
    pub fn reset_range(&mut self) {
        if let Some((min, max)) = self.slider_bounds() {
            self.payload_low = min;
            self.payload_high = max;
        }
        self.refresh();
    }

    /// Recompute both charts from scratch for the current controls.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            self.outcomes = None;
            self.scatter = None;
            return;
        };

        let range = match PayloadRange::new(self.payload_low, self.payload_high) {
            Ok(range) => range,
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        };

        let outcomes = outcome_counts(ds, &self.site);
        let scatter = payload_scatter(ds, &self.site, range);
        log::debug!(
            "Recomputed for site={} range=[{}, {}]: {} outcomes, {} points",
            self.site,
            range.low(),
            range.high(),
            outcomes.total(),
            scatter.points.len()
        );
        self.outcomes = Some(outcomes);
        self.scatter = Some(scatter);
    }
}
