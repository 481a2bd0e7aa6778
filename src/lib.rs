//! Launch records dashboard core: dataset loading, site/payload filtering
//! and outcome aggregation, plus configuration shared by the binaries.

pub mod config;
pub mod data;
pub mod error;

pub use config::Config;
pub use error::{ConfigError, DataError};
