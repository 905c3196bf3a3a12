use crate::error::{MergeError, Result};
use crate::types::{LightsRecord, RawLightsRow, WideRow, WideTable};
use crate::util::{is_calendar_month, parse_f64_cell, parse_i32_cell};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub const EXPOSURE_TABLE: &str = "exposure";
pub const LIGHTS_TABLE: &str = "lights";

/// Columns the lights export must carry. Anything else is ignored.
pub const LIGHTS_COLUMNS: [&str; 4] = ["province", "year", "month", "mean_lights"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub skipped_rows: usize,
    pub blank_values: usize,
}

fn csv_reader<R: Read>(input: R) -> Reader<R> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(input)
}

fn line_of(rec: &StringRecord, idx: usize) -> u64 {
    rec.position().map(|p| p.line()).unwrap_or(idx as u64 + 2)
}

pub fn load_exposure(path: &Path) -> Result<(WideTable, LoadReport)> {
    let file = File::open(path)?;
    let loaded = read_exposure(file)?;
    debug!(path = %path.display(), rows = loaded.1.total_rows, "loaded exposure file");
    Ok(loaded)
}

pub fn load_lights(path: &Path) -> Result<(Vec<LightsRecord>, LoadReport)> {
    let file = File::open(path)?;
    let loaded = read_lights(file)?;
    debug!(path = %path.display(), rows = loaded.1.total_rows, "loaded lights file");
    Ok(loaded)
}

/// Read the wide exposure table: first column names the region, every other
/// column is a period. Period labels are kept verbatim for the reshaper.
pub fn read_exposure<R: Read>(input: R) -> Result<(WideTable, LoadReport)> {
    let mut rdr = csv_reader(input);
    let headers = rdr.headers()?.clone();
    let id_column = match headers.get(0) {
        Some(h) => h.to_string(),
        None => {
            return Err(MergeError::MissingRequiredColumn {
                table: EXPOSURE_TABLE,
                column: "region identifier".to_string(),
            })
        }
    };
    let period_labels: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut report = LoadReport::default();
    let mut rows: Vec<WideRow> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        report.total_rows += 1;
        let region = rec.get(0).unwrap_or("").trim();
        if region.is_empty() {
            report.skipped_rows += 1;
            warn!(line = line_of(&rec, idx), "exposure row without a region name skipped");
            continue;
        }

        let mut cells = Vec::with_capacity(period_labels.len());
        for (col, label) in period_labels.iter().enumerate() {
            let raw = rec.get(col + 1);
            let cell = match parse_f64_cell(raw) {
                None => {
                    report.blank_values += 1;
                    None
                }
                Some(Ok(v)) => Some(v),
                Some(Err(_)) => {
                    return Err(MergeError::InvalidValue {
                        table: EXPOSURE_TABLE,
                        column: label.clone(),
                        line: line_of(&rec, idx),
                        value: raw.unwrap_or("").to_string(),
                    })
                }
            };
            cells.push(cell);
        }
        rows.push(WideRow {
            region: region.to_string(),
            cells,
        });
    }

    Ok((
        WideTable {
            id_column,
            period_labels,
            rows,
        },
        report,
    ))
}

/// Read the long lights table. Rows that cannot be grouped (no province,
/// year or month) are skipped; a blank `mean_lights` counts as 0.0.
pub fn read_lights<R: Read>(input: R) -> Result<(Vec<LightsRecord>, LoadReport)> {
    let mut rdr = csv_reader(input);
    let headers = rdr.headers()?.clone();
    if let Some(missing) = LIGHTS_COLUMNS
        .iter()
        .find(|name| !headers.iter().any(|h| h == **name))
    {
        return Err(MergeError::MissingRequiredColumn {
            table: LIGHTS_TABLE,
            column: missing.to_string(),
        });
    }

    let mut report = LoadReport::default();
    let mut out: Vec<LightsRecord> = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        report.total_rows += 1;
        let line = line_of(&rec, row_idx);
        let row: RawLightsRow = rec.deserialize(Some(&headers))?;
        let invalid = |column: &str, value: Option<&str>| MergeError::InvalidValue {
            table: LIGHTS_TABLE,
            column: column.to_string(),
            line,
            value: value.unwrap_or("").to_string(),
        };

        let province = row.province.as_deref().unwrap_or("").trim();
        let year = parse_i32_cell(row.year.as_deref());
        let month = parse_i32_cell(row.month.as_deref());
        let (year, month) = match (province.is_empty(), year, month) {
            (false, Some(y), Some(m)) => (y, m),
            _ => {
                report.skipped_rows += 1;
                warn!(line, "lights row without province, year or month skipped");
                continue;
            }
        };
        let year = year.map_err(|_| invalid("year", row.year.as_deref()))?;
        let month = month
            .ok()
            .and_then(|m| u32::try_from(m).ok())
            .filter(|&m| is_calendar_month(year, m))
            .ok_or_else(|| invalid("month", row.month.as_deref()))?;
        let mean_lights = match parse_f64_cell(row.mean_lights.as_deref()) {
            None => {
                report.blank_values += 1;
                0.0
            }
            Some(v) => v.map_err(|_| invalid("mean_lights", row.mean_lights.as_deref()))?,
        };

        out.push(LightsRecord {
            region: province.to_string(),
            year,
            month,
            mean_lights,
        });
    }
    Ok((out, report))
}
