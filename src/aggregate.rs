use crate::types::{ExposureRecord, LightsRecord};
use std::collections::BTreeMap;

type RawKey = (String, i32, u32);

/// Sum values sharing (region, year, month). Output is ordered by that key.
fn sum_by_key<'a, I>(rows: I) -> BTreeMap<RawKey, f64>
where
    I: IntoIterator<Item = (&'a str, i32, u32, f64)>,
{
    let mut groups: BTreeMap<RawKey, f64> = BTreeMap::new();
    for (region, year, month, value) in rows {
        *groups.entry((region.to_string(), year, month)).or_insert(0.0) += value;
    }
    groups
}

/// Lights values are additive luminosity from sub-areas, so split provinces
/// and post-alias duplicates are summed, never averaged.
pub fn aggregate_lights(records: &[LightsRecord]) -> Vec<LightsRecord> {
    sum_by_key(
        records
            .iter()
            .map(|r| (r.region.as_str(), r.year, r.month, r.mean_lights)),
    )
    .into_iter()
    .map(|((region, year, month), mean_lights)| LightsRecord {
        region,
        year,
        month,
        mean_lights,
    })
    .collect()
}

pub fn aggregate_exposure(records: &[ExposureRecord]) -> Vec<ExposureRecord> {
    sum_by_key(
        records
            .iter()
            .map(|r| (r.region.as_str(), r.year, r.month, r.exposure)),
    )
    .into_iter()
    .map(|((region, year, month), exposure)| ExposureRecord {
        region,
        year,
        month,
        exposure,
    })
    .collect()
}
