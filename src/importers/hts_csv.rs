use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::duty::ScheduleEntry;
use crate::error::TariffError;

/// Parse an HTS schedule CSV export into schedule entries
pub fn parse_hts_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<ScheduleEntry>> {
    let path = file_path.as_ref();
    info!("Parsing HTS schedule CSV: {:?}", path);

    let mut reader = ReaderBuilder::new()
        .flexible(true) // allow variable number of columns
        .from_path(path)
        .context("Failed to open HTS schedule CSV")?;

    let headers = reader
        .headers()
        .context("Failed to read HTS schedule headers")?
        .clone();

    debug!("HTS schedule headers: {:?}", headers);

    let column_mapping = find_columns(&headers)?;
    debug!("Column mapping: {:?}", column_mapping);

    let mut entries = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping row {}: {}", idx + 2, e);
                continue;
            }
        };

        if let Some(entry) = parse_csv_row(&record, &column_mapping) {
            entries.push(entry);
        }
    }

    info!(
        "Successfully parsed {} schedule entries from CSV",
        entries.len()
    );
    Ok(entries)
}

#[derive(Debug)]
struct CsvColumnMapping {
    hts_number: usize,
    description: Option<usize>,
    general_rate: Option<usize>,
    additional_duties: Option<usize>,
}

fn find_columns(headers: &csv::StringRecord) -> Result<CsvColumnMapping> {
    let mut hts_idx = None;
    let mut description_idx = None;
    let mut general_idx = None;
    let mut additional_idx = None;

    for (idx, header) in headers.iter().enumerate() {
        let text = header.to_lowercase();

        // "HTS Number" / "HTS8" / bare "HTS"
        if text.contains("hts") && hts_idx.is_none() {
            hts_idx = Some(idx);
        }

        if text.contains("description") {
            description_idx = Some(idx);
        }

        // "General Rate of Duty"
        if text.contains("general") && (text.contains("rate") || text.contains("duty")) {
            general_idx = Some(idx);
        }

        // "Additional Duties"
        if text.contains("additional") && text.contains("dut") {
            additional_idx = Some(idx);
        }
    }

    let hts_number = hts_idx.ok_or_else(|| {
        TariffError::ColumnMapping(format!(
            "HTS number column not found in headers: {:?}",
            headers
        ))
    })?;

    Ok(CsvColumnMapping {
        hts_number,
        description: description_idx,
        general_rate: general_idx,
        additional_duties: additional_idx,
    })
}

fn parse_csv_row(record: &csv::StringRecord, mapping: &CsvColumnMapping) -> Option<ScheduleEntry> {
    let hts_number = record.get(mapping.hts_number)?.trim();
    if hts_number.is_empty() {
        // heading and note rows carry no code
        return None;
    }

    let field = |idx: Option<usize>| -> Option<String> {
        idx.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Some(ScheduleEntry::new(
        hts_number.to_string(),
        field(mapping.description).unwrap_or_default(),
        field(mapping.general_rate),
        field(mapping.additional_duties),
    ))
}
