//! The four merge stages wired together over loaded tables.
//!
//! Every stage borrows its input and returns a fresh table; nothing here
//! touches the filesystem.

use crate::aggregate::{aggregate_exposure, aggregate_lights};
use crate::error::Result;
use crate::join::right_join;
use crate::regions::{apply_lights_aliases, check_canonical_conflicts, collapse_metro_districts};
use crate::reshape::reshape_exposure;
use crate::types::{LightsRecord, MergedRecord, PipelineReport, WideTable};
use tracing::{info, info_span, warn};

pub fn run(
    exposure: &WideTable,
    lights: &[LightsRecord],
) -> Result<(Vec<MergedRecord>, PipelineReport)> {
    let _span = info_span!("merge").entered();

    let long = reshape_exposure(exposure)?;
    info!(records = long.len(), "reshape complete");

    let (collapsed, metro_periods) = collapse_metro_districts(&long);
    let renamed = apply_lights_aliases(lights);

    let exposure_agg = aggregate_exposure(&collapsed);
    let lights_agg = aggregate_lights(&renamed);
    info!(
        exposure = exposure_agg.len(),
        lights_raw = lights.len(),
        lights = lights_agg.len(),
        "aggregation complete"
    );

    check_canonical_conflicts("exposure", exposure_agg.iter().map(|r| r.region.as_str()))?;
    check_canonical_conflicts("lights", lights_agg.iter().map(|r| r.region.as_str()))?;

    let joined = right_join(&exposure_agg, &lights_agg);
    if joined.exposure_only > 0 {
        // Lights coverage defines the output universe; worth revisiting if
        // exposure-only provinces start to matter.
        warn!(
            dropped = joined.exposure_only,
            "exposure records without a lights counterpart were dropped"
        );
    }
    info!(
        rows = joined.rows.len(),
        matched = joined.matched,
        lights_only = joined.lights_only,
        "join complete"
    );

    let periods = joined.rows.iter().map(|r| (r.year, r.month));
    let report = PipelineReport {
        exposure_records: long.len(),
        metro_periods,
        lights_raw: lights.len(),
        lights_aggregated: lights_agg.len(),
        matched: joined.matched,
        lights_only: joined.lights_only,
        exposure_only_dropped: joined.exposure_only,
        first_period: periods.clone().min(),
        last_period: periods.max(),
    };
    Ok((joined.rows, report))
}
