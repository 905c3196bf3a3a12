use crate::error::{MergeError, Result};
use crate::types::{ExposureRecord, WideTable};
use crate::util::is_calendar_month;
use tracing::debug;

/// Split a `<year>-<month>` column label into integers.
pub fn parse_period_label(label: &str) -> Result<(i32, u32)> {
    let malformed = || MergeError::MalformedPeriodLabel {
        label: label.to_string(),
    };
    let mut parts = label.trim().split('-');
    let (Some(y), Some(m), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let year = y.trim().parse::<i32>().map_err(|_| malformed())?;
    let month = m.trim().parse::<u32>().map_err(|_| malformed())?;
    if !is_calendar_month(year, month) {
        return Err(malformed());
    }
    Ok((year, month))
}

/// Melt the wide exposure table into one record per non-blank cell.
///
/// Every label is parsed before any row is touched, so a bad header fails
/// the run even if its column is empty.
pub fn reshape_exposure(table: &WideTable) -> Result<Vec<ExposureRecord>> {
    let periods = table
        .period_labels
        .iter()
        .map(String::as_str)
        .map(parse_period_label)
        .collect::<Result<Vec<_>>>()?;

    let mut out = Vec::with_capacity(table.rows.len() * periods.len());
    for row in &table.rows {
        for (&(year, month), cell) in periods.iter().zip(&row.cells) {
            if let Some(exposure) = *cell {
                out.push(ExposureRecord {
                    region: row.region.clone(),
                    year,
                    month,
                    exposure,
                });
            }
        }
    }
    debug!(
        id_column = %table.id_column,
        periods = periods.len(),
        records = out.len(),
        "reshaped exposure table"
    );
    Ok(out)
}
