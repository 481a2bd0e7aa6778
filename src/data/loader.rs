use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{LaunchDataset, LaunchRecord, Outcome};
use crate::error::DataError;

/// Column holding the launch site identifier.
pub const COL_LAUNCH_SITE: &str = "Launch Site";
/// Column holding the payload mass in kilograms.
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
/// Column holding the binary outcome (0 = failure, 1 = success).
pub const COL_CLASS: &str = "class";
/// Column holding the booster version category.
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

type Result<T> = std::result::Result<T, DataError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; the four required columns plus any extras
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – the same column names, string and numeric columns
///
/// The schema is checked once up front: a missing column or a bad cell fails
/// the whole load. Extra columns are ignored.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    let dataset = LaunchDataset::from_records(records)?;
    let bounds = dataset.payload_bounds();
    log::info!(
        "Loaded {} launch records from {} ({} sites, payload {}..{} kg)",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        bounds.min_kg,
        bounds.max_kg
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell validation shared by every format
// ---------------------------------------------------------------------------

fn check_payload(row: usize, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DataError::invalid_value(row, COL_PAYLOAD_MASS, value.to_string()))
    }
}

fn parse_payload(row: usize, s: &str) -> Result<f64> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|_| DataError::invalid_value(row, COL_PAYLOAD_MASS, s))?;
    check_payload(row, value)
}

/// Labels are kept verbatim; only empty or whitespace-only cells are rejected.
fn check_label(row: usize, column: &'static str, s: &str) -> Result<String> {
    if s.trim().is_empty() {
        return Err(DataError::invalid_value(row, column, s));
    }
    Ok(s.to_string())
}

fn check_class(row: usize, value: f64) -> Result<Outcome> {
    Outcome::from_class(value).ok_or_else(|| DataError::invalid_value(row, COL_CLASS, value.to_string()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Positions of the required columns within a header row.
struct ColumnIndex {
    site: usize,
    payload: usize,
    class: usize,
    category: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(DataError::MissingColumn(name))
        };
        let index = ColumnIndex {
            site: find(COL_LAUNCH_SITE)?,
            payload: find(COL_PAYLOAD_MASS)?,
            class: find(COL_CLASS)?,
            category: find(COL_BOOSTER_CATEGORY)?,
        };

        let ignored: Vec<&String> = headers
            .iter()
            .filter(|h| !REQUIRED_COLUMNS.contains(&h.as_str()))
            .collect();
        if !ignored.is_empty() {
            log::debug!("Ignoring extra columns {ignored:?}");
        }
        Ok(index)
    }
}

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let idx = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cell = |i: usize| row.get(i).unwrap_or("");

        let class = cell(idx.class);
        let outcome = Outcome::parse(class)
            .ok_or_else(|| DataError::invalid_value(row_no, COL_CLASS, class))?;

        records.push(LaunchRecord {
            launch_site: check_label(row_no, COL_LAUNCH_SITE, cell(idx.site))?,
            payload_mass_kg: parse_payload(row_no, cell(idx.payload))?,
            outcome,
            booster_version_category: check_label(
                row_no,
                COL_BOOSTER_CATEGORY,
                cell(idx.category),
            )?,
        });
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let rows = root
        .as_array()
        .ok_or_else(|| DataError::Malformed("expected a top-level JSON array".to_string()))?;

    rows.iter()
        .enumerate()
        .map(|(row_no, value)| {
            let obj = value
                .as_object()
                .ok_or_else(|| DataError::Malformed(format!("row {row_no} is not a JSON object")))?;
            json_record(row_no, obj)
        })
        .collect()
}

fn json_field<'a>(obj: &'a Map<String, JsonValue>, column: &'static str) -> Result<&'a JsonValue> {
    obj.get(column).ok_or(DataError::MissingColumn(column))
}

fn json_string(row: usize, obj: &Map<String, JsonValue>, column: &'static str) -> Result<String> {
    match json_field(obj, column)? {
        JsonValue::String(s) => check_label(row, column, s),
        other => Err(DataError::invalid_value(row, column, other.to_string())),
    }
}

fn json_number(row: usize, obj: &Map<String, JsonValue>, column: &'static str) -> Result<f64> {
    let value = json_field(obj, column)?;
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| DataError::invalid_value(row, column, value.to_string()))
}

fn json_record(row: usize, obj: &Map<String, JsonValue>) -> Result<LaunchRecord> {
    Ok(LaunchRecord {
        launch_site: json_string(row, obj, COL_LAUNCH_SITE)?,
        payload_mass_kg: check_payload(row, json_number(row, obj, COL_PAYLOAD_MASS)?)?,
        outcome: check_class(row, json_number(row, obj, COL_CLASS)?)?,
        booster_version_category: json_string(row, obj, COL_BOOSTER_CATEGORY)?,
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// `Launch Site` and `Booster Version Category` must be Utf8 / LargeUtf8;
/// `Payload Mass (kg)` and `class` may be any of Int32, Int64, Float32, Float64.
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let indices = parquet_columns(builder.schema())?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let [site_col, payload_col, class_col, category_col] = indices.map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let payload = numeric_cell(payload_col, row)
                .ok_or_else(|| DataError::invalid_value(row_no, COL_PAYLOAD_MASS, cell_debug(payload_col, row)))?;
            let class = numeric_cell(class_col, row)
                .ok_or_else(|| DataError::invalid_value(row_no, COL_CLASS, cell_debug(class_col, row)))?;

            records.push(LaunchRecord {
                launch_site: string_cell(site_col, row, row_no, COL_LAUNCH_SITE)?,
                payload_mass_kg: check_payload(row_no, payload)?,
                outcome: check_class(row_no, class)?,
                booster_version_category: string_cell(
                    category_col,
                    row,
                    row_no,
                    COL_BOOSTER_CATEGORY,
                )?,
            });
        }
    }
    Ok(records)
}

/// Column positions in `REQUIRED_COLUMNS` order.
fn parquet_columns(schema: &Schema) -> Result<[usize; 4]> {
    let mut indices = [0usize; 4];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = schema
            .index_of(name)
            .map_err(|_| DataError::MissingColumn(name))?;
    }
    Ok(indices)
}

// -- Arrow helpers --

fn numeric_cell(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => Some(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => Some(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Int64 => Some(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Int32 => Some(col.as_primitive::<Int32Type>().value(row) as f64),
        _ => None,
    }
}

fn string_cell(col: &ArrayRef, row: usize, row_no: usize, column: &'static str) -> Result<String> {
    let value = if col.is_null(row) {
        None
    } else if let Some(arr) = col.as_string_opt::<i32>() {
        Some(arr.value(row))
    } else {
        col.as_string_opt::<i64>().map(|arr| arr.value(row))
    };
    match value {
        Some(s) => check_label(row_no, column, s),
        None => Err(DataError::invalid_value(row_no, column, cell_debug(col, row))),
    }
}

fn cell_debug(col: &ArrayRef, row: usize) -> String {
    if col.is_null(row) {
        "<null>".to_string()
    } else {
        format!("<{:?}>", col.data_type())
    }
}
