use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Exposure input as loaded: one row per region, one column per period.
#[derive(Debug, Clone)]
pub struct WideTable {
    pub id_column: String,
    pub period_labels: Vec<String>,
    pub rows: Vec<WideRow>,
}

#[derive(Debug, Clone)]
pub struct WideRow {
    pub region: String,
    /// Aligned with `WideTable::period_labels`; `None` is a blank cell.
    pub cells: Vec<Option<f64>>,
}

/// One lights export row before cleaning. Extra export columns are ignored.
#[derive(Debug, Deserialize)]
pub struct RawLightsRow {
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub mean_lights: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExposureRecord {
    pub region: String,
    pub year: i32,
    pub month: u32,
    pub exposure: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightsRecord {
    pub region: String,
    pub year: i32,
    pub month: u32,
    pub mean_lights: f64,
}

/// One exported row. Field order is the CSV column order.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct MergedRecord {
    pub region: String,
    pub year: i32,
    pub month: u32,
    pub exposure: f64,
    pub mean_lights: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    pub exposure_records: usize,
    pub metro_periods: usize,
    pub lights_raw: usize,
    pub lights_aggregated: usize,
    pub matched: usize,
    pub lights_only: usize,
    pub exposure_only_dropped: usize,
    pub first_period: Option<(i32, u32)>,
    pub last_period: Option<(i32, u32)>,
}
