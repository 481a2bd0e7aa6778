use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use launch_dash::data::{
    load_file, outcome_counts, payload_scatter, LaunchDataset, OutcomeSummary, PayloadRange,
    PayloadScatter, SiteFilter, ALL_SITES,
};

/// Launch records dashboard: success rate by site and payload vs. outcome.
#[derive(Debug, Parser)]
#[command(name = "launch-dash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Launch records file (.csv, .json or .parquet); overrides the config
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the aggregates as JSON and exit instead of opening a window
    #[arg(long)]
    pub summary: bool,

    /// Site for --summary (`ALL` for every site)
    #[arg(long, default_value = ALL_SITES)]
    pub site: SiteFilter,

    /// Lower payload bound for --summary (defaults to the dataset minimum)
    #[arg(long, allow_negative_numbers = true)]
    pub low: Option<f64>,

    /// Upper payload bound for --summary (defaults to the dataset maximum)
    #[arg(long, allow_negative_numbers = true)]
    pub high: Option<f64>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Both aggregates for one site/range selection.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub site: SiteFilter,
    pub payload_range: PayloadRange,
    pub outcomes: OutcomeSummary,
    pub scatter: PayloadScatter,
}

/// Compute both aggregates. Missing bounds default to the dataset's exact extremes.
pub fn summarize(
    dataset: &LaunchDataset,
    site: SiteFilter,
    low: Option<f64>,
    high: Option<f64>,
) -> Result<Summary> {
    let (min_kg, max_kg) = dataset.payload_bounds().full_range();
    let low = low.unwrap_or(min_kg);
    let high = high.unwrap_or(max_kg);
    let payload_range = PayloadRange::new(low, high)?;

    Ok(Summary {
        outcomes: outcome_counts(dataset, &site),
        scatter: payload_scatter(dataset, &site, payload_range),
        site,
        payload_range,
    })
}

/// Load `path` and render the summary as pretty JSON.
pub fn run_summary(path: &Path, cli: &Cli) -> Result<String> {
    let dataset = load_file(path).with_context(|| format!("loading {}", path.display()))?;
    let summary = summarize(&dataset, cli.site.clone(), cli.low, cli.high)?;
    serde_json::to_string_pretty(&summary).context("serializing summary")
}

#[cfg(test)]
mod tests {
    use super::*;
    use launch_dash::data::Outcome;
    use tempfile::TempDir;

    const CSV: &str = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,0,0.0,v1.0
KSC LC-39A,1,2490.0,FT
KSC LC-39A,0,5300.0,FT
VAFB SLC-4E,1,9600.0,B4
";

    fn write_csv(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("launches.csv");
        std::fs::write(&path, CSV).unwrap();
        path
    }

    #[test]
    fn test_cli_parses_summary_args() {
        let cli = Cli::try_parse_from([
            "launch-dash",
            "--data",
            "launches.csv",
            "--summary",
            "--site",
            "KSC LC-39A",
            "--low",
            "1000",
            "-vv",
        ])
        .unwrap();
        assert!(cli.summary);
        assert_eq!(cli.site, SiteFilter::Site("KSC LC-39A".into()));
        assert_eq!(cli.low, Some(1000.0));
        assert_eq!(cli.high, None);
        assert_eq!(cli.log_filter(), "trace");
    }

    #[test]
    fn test_cli_defaults_to_all_sites() {
        let cli = Cli::try_parse_from(["launch-dash"]).unwrap();
        assert_eq!(cli.site, SiteFilter::All);
        assert!(!cli.summary);
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn test_summarize_defaults_to_full_range() {
        let dir = TempDir::new().unwrap();
        let dataset = load_file(&write_csv(&dir)).unwrap();
        let summary = summarize(&dataset, SiteFilter::All, None, None).unwrap();
        assert_eq!(summary.scatter.points.len(), 4);
        assert_eq!(summary.outcomes.count(Outcome::Success), 2);
    }

    #[test]
    fn test_summarize_default_keeps_fractional_max() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("launches.csv");
        std::fs::write(
            &path,
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
             CCAFS LC-40,0,100.0,v1.0\n\
             KSC LC-39A,1,9600.2,FT\n",
        )
        .unwrap();
        let dataset = load_file(&path).unwrap();
        assert_eq!(dataset.payload_bounds().slider_max(), 9600);

        let summary = summarize(&dataset, SiteFilter::All, None, None).unwrap();
        assert_eq!(summary.payload_range.high(), 9600.2);
        assert_eq!(summary.scatter.points.len(), 2);
    }

    #[test]
    fn test_summarize_rejects_inverted_range() {
        let dir = TempDir::new().unwrap();
        let dataset = load_file(&write_csv(&dir)).unwrap();
        assert!(summarize(&dataset, SiteFilter::All, Some(5000.0), Some(100.0)).is_err());
    }

    #[test]
    fn test_run_summary_json() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir);
        let cli = Cli::try_parse_from(["launch-dash", "--summary", "--site", "KSC LC-39A"]).unwrap();

        let json: serde_json::Value = serde_json::from_str(&run_summary(&path, &cli).unwrap()).unwrap();
        assert_eq!(json["site"], "KSC LC-39A");
        assert_eq!(json["outcomes"]["title"], "Success Rate for KSC LC-39A");
        assert_eq!(json["outcomes"]["counts"]["success"], 1);
        assert_eq!(json["scatter"]["points"].as_array().unwrap().len(), 2);
        assert_eq!(json["payload_range"]["low"], 0.0);
    }

    #[test]
    fn test_run_summary_missing_file() {
        let cli = Cli::try_parse_from(["launch-dash", "--summary"]).unwrap();
        let err = run_summary(Path::new("/no/such.csv"), &cli).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such.csv"));
    }
}
