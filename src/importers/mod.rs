// Import module - HTS schedule and Section 301 table loaders

pub mod hts_csv;
pub mod sec301;

use anyhow::{anyhow, Result};
use std::path::Path;
use tracing::info;

use crate::duty::{Schedule, Sec301Index};

pub use sec301::Sec301Row;

/// Load the HTS schedule table (CSV) into an immutable Schedule
pub fn load_schedule<P: AsRef<Path>>(file_path: P) -> Result<Schedule> {
    let path = file_path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| anyhow!("File has no extension"))?
        .to_lowercase();

    let entries = match extension.as_str() {
        "csv" | "txt" => hts_csv::parse_hts_csv(path)?,
        _ => {
            return Err(anyhow!(
                "Unsupported schedule format: {}. Supported formats: .csv",
                extension
            ))
        }
    };

    info!("Loaded {} HTS schedule entries", entries.len());
    Ok(Schedule::new(entries))
}

/// Load the Section 301 table (CSV or Excel) into an immutable index.
///
/// Normalization of stored codes happens here, once; queries never touch
/// the table again.
pub fn load_sec301<P: AsRef<Path>>(file_path: P) -> Result<Sec301Index> {
    let path = file_path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| anyhow!("File has no extension"))?
        .to_lowercase();

    info!("Loading Section 301 table: {:?} (type: {})", path, extension);

    let rows = match extension.as_str() {
        "xlsx" | "xls" => sec301::parse_sec301_xlsx(path)?,
        "csv" | "txt" => sec301::parse_sec301_csv(path)?,
        _ => {
            return Err(anyhow!(
                "Unsupported Section 301 format: {}. Supported formats: .xlsx, .xls, .csv",
                extension
            ))
        }
    };

    Ok(Sec301Index::from_rows(rows))
}
