use anyhow::{Context, Result};
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::TariffError;

/// One trade-action row: HS code as written, additional duty as a fraction
pub type Sec301Row = (String, Decimal);

/// Parse a Section 301 XLSX workbook into (code, fraction) rows.
///
/// The combined tranche sheets vary in layout, so the header row is
/// located by scanning for the HS code and duty columns rather than
/// assuming fixed positions.
pub fn parse_sec301_xlsx<P: AsRef<Path>>(file_path: P) -> Result<Vec<Sec301Row>> {
    let path = file_path.as_ref();
    info!("Parsing Section 301 workbook: {:?}", path);

    let mut workbook: Xlsx<_> = open_workbook(path).context("Failed to open Section 301 workbook")?;
    let sheet_names = workbook.sheet_names().to_owned();
    debug!("Section 301 sheets: {:?}", sheet_names);

    let mut rows = Vec::new();

    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .with_context(|| format!("Failed to read sheet {:?}", sheet_name))?;

        let mut mapping: Option<ColumnMapping> = None;

        for (idx, row) in range.rows().enumerate() {
            match &mapping {
                None => {
                    if let Some(found) = ColumnMapping::from_header(row) {
                        debug!("Sheet {:?} column mapping: {:?}", sheet_name, found);
                        mapping = Some(found);
                    }
                }
                Some(mapping) => match parse_xlsx_row(row, mapping) {
                    Ok(Some(parsed)) => rows.push(parsed),
                    Ok(None) => continue,
                    Err(e) => {
                        warn!("Skipping row {} of {:?}: {}", idx + 1, sheet_name, e);
                        continue;
                    }
                },
            }
        }

        if mapping.is_none() {
            warn!("Sheet {:?} has no HS code / duty header, skipped", sheet_name);
        }
    }

    if rows.is_empty() {
        return Err(TariffError::TableLoad(format!(
            "no Section 301 rows found in {:?}",
            path
        ))
        .into());
    }

    info!("Successfully parsed {} Section 301 rows", rows.len());
    Ok(rows)
}

/// Parse a Section 301 CSV file into (code, fraction) rows
pub fn parse_sec301_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<Sec301Row>> {
    let path = file_path.as_ref();
    info!("Parsing Section 301 CSV: {:?}", path);

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("Failed to open Section 301 CSV")?;

    let headers = reader
        .headers()
        .context("Failed to read Section 301 headers")?
        .clone();

    let mut code_idx = None;
    let mut duty_idx = None;
    for (idx, header) in headers.iter().enumerate() {
        let text = header.to_lowercase();
        if text.contains("hscode") || (text.contains("hs") && text.contains("code")) {
            code_idx = Some(idx);
        }
        if text.contains("duty") {
            duty_idx = Some(idx);
        }
    }
    let (code_idx, duty_idx) = match (code_idx, duty_idx) {
        (Some(c), Some(d)) => (c, d),
        _ => {
            return Err(TariffError::ColumnMapping(format!(
                "HSCode / Additional Duty columns not found in headers: {:?}",
                headers
            ))
            .into())
        }
    };

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping row {}: {}", idx + 2, e);
                continue;
            }
        };

        let code = record.get(code_idx).map(str::trim).unwrap_or_default();
        if code.is_empty() {
            continue;
        }
        let duty_text = record.get(duty_idx).map(str::trim).unwrap_or_default();
        match parse_fraction_text(duty_text) {
            Ok(fraction) => rows.push((code.to_string(), fraction)),
            Err(e) => {
                warn!("Skipping row {}: {}", idx + 2, e);
                continue;
            }
        }
    }

    info!("Successfully parsed {} Section 301 rows", rows.len());
    Ok(rows)
}

/// Column positions for a Section 301 sheet
#[derive(Debug, Clone)]
struct ColumnMapping {
    code: usize,
    duty: usize,
}

impl ColumnMapping {
    /// Recognize a header row by its HS code and duty columns
    fn from_header(header: &[Data]) -> Option<Self> {
        let mut code = None;
        let mut duty = None;

        for (idx, cell) in header.iter().enumerate() {
            let text = cell.to_string().to_lowercase();
            if text.contains("hscode") || (text.contains("hs") && text.contains("code")) {
                code = Some(idx);
            }
            if text.contains("duty") {
                duty = Some(idx);
            }
        }

        match (code, duty) {
            (Some(code), Some(duty)) => Some(ColumnMapping { code, duty }),
            _ => None,
        }
    }
}

fn parse_xlsx_row(row: &[Data], mapping: &ColumnMapping) -> Result<Option<Sec301Row>> {
    let code_cell = match row.get(mapping.code) {
        Some(cell) if !cell.is_empty() => cell,
        _ => return Ok(None),
    };
    // numeric cells render "392350", string cells pass through
    let code = code_cell.to_string().trim().to_string();
    if code.is_empty() {
        return Ok(None);
    }

    let duty_cell = row
        .get(mapping.duty)
        .ok_or_else(|| anyhow::anyhow!("missing duty cell"))?;

    let fraction = if let Some(value) = duty_cell.get_float() {
        Decimal::try_from(value).context("duty value out of range")?
    } else {
        parse_fraction_text(duty_cell.to_string().trim())?
    };

    Ok(Some((code, fraction)))
}

/// Parse duty text as a fraction: "0.25" stays a fraction, "25%" becomes
/// 0.25.
fn parse_fraction_text(text: &str) -> Result<Decimal> {
    if text.is_empty() {
        anyhow::bail!("empty duty value");
    }
    if let Some(percent) = text.strip_suffix('%') {
        let rate = Decimal::from_str(percent.trim())
            .with_context(|| format!("invalid duty percentage {:?}", text))?;
        return Ok(rate / Decimal::ONE_HUNDRED);
    }
    Decimal::from_str(text).with_context(|| format!("invalid duty fraction {:?}", text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_parse_fraction_text_plain() {
        assert_eq!(parse_fraction_text("0.25").unwrap(), dec!(0.25));
        assert_eq!(parse_fraction_text("0.075").unwrap(), dec!(0.075));
    }

    #[test]
    fn test_parse_fraction_text_percent() {
        assert_eq!(parse_fraction_text("25%").unwrap(), dec!(0.25));
        assert_eq!(parse_fraction_text("7.5 %").unwrap(), dec!(0.075));
    }

    #[test]
    fn test_parse_fraction_text_rejects_junk() {
        assert!(parse_fraction_text("").is_err());
        assert!(parse_fraction_text("n/a").is_err());
    }

    #[test]
    fn test_parse_sec301_csv() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("failed to create temp csv");
        write!(
            file,
            "HSCode,Additional Duty\n392350,0.25\n847130,0.075\n,\n"
        )
        .unwrap();
        file.flush().unwrap();

        let rows = parse_sec301_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ("392350".to_string(), dec!(0.25)));
        assert_eq!(rows[1], ("847130".to_string(), dec!(0.075)));
    }

    #[test]
    fn test_parse_sec301_csv_skips_bad_rows() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("failed to create temp csv");
        write!(
            file,
            "HSCode,Additional Duty\n392350,0.25\n999999,not-a-rate\n"
        )
        .unwrap();
        file.flush().unwrap();

        let rows = parse_sec301_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_xlsx_header_recognition() {
        let header = vec![
            Data::String("HSCode".to_string()),
            Data::String("Additional Duty".to_string()),
        ];
        let mapping = ColumnMapping::from_header(&header).unwrap();
        assert_eq!(mapping.code, 0);
        assert_eq!(mapping.duty, 1);

        let not_header = vec![
            Data::String("Tranche 1".to_string()),
            Data::Empty,
        ];
        assert!(ColumnMapping::from_header(&not_header).is_none());
    }

    #[test]
    fn test_xlsx_row_parses_numeric_cells() {
        let mapping = ColumnMapping { code: 0, duty: 1 };
        let row = vec![Data::Float(392350.0), Data::Float(0.25)];
        let parsed = parse_xlsx_row(&row, &mapping).unwrap().unwrap();
        assert_eq!(parsed.0, "392350");
        assert_eq!(parsed.1, dec!(0.25));
    }

    #[test]
    fn test_xlsx_blank_rows_skipped() {
        let mapping = ColumnMapping { code: 0, duty: 1 };
        let row = vec![Data::Empty, Data::Empty];
        assert!(parse_xlsx_row(&row, &mapping).unwrap().is_none());
    }
}
