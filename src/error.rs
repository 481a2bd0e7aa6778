//! Error types for loading launch data, building queries and reading config.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a dataset or validating query input.
#[derive(Error, Debug)]
pub enum DataError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not one we know how to parse.
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A required column is absent from the header/schema.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A cell could not be interpreted for its column.
    #[error("row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The source does not have the expected shape.
    #[error("malformed data: {0}")]
    Malformed(String),

    /// The source parsed but contains no records.
    #[error("dataset contains no launch records")]
    Empty,

    /// A payload range with `low > high` or a NaN bound.
    #[error("invalid payload range [{low}, {high}]")]
    InvalidRange { low: f64, high: f64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl DataError {
    pub(crate) fn invalid_value(row: usize, column: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            row,
            column,
            value: value.into(),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(Box<figment::Error>),

    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = DataError::MissingColumn("class");
        assert_eq!(err.to_string(), "missing required column 'class'");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = DataError::invalid_value(3, "class", "2");
        assert_eq!(err.to_string(), "row 3, column 'class': invalid value '2'");
    }

    #[test]
    fn test_io_error_names_path() {
        let err = DataError::Io {
            path: PathBuf::from("/nope/launches.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/launches.csv"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_config_validation_display() {
        let err = ConfigError::Validation {
            message: "payload_step must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: payload_step must be greater than 0"
        );
    }
}
