use crate::regions::canonical_key;
use crate::types::{ExposureRecord, LightsRecord, MergedRecord};
use std::collections::{HashMap, HashSet};

type JoinKey = (String, i32, u32);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinOutcome {
    pub rows: Vec<MergedRecord>,
    pub matched: usize,
    pub lights_only: usize,
    /// Exposure keys with no lights counterpart. They are not in `rows`.
    pub exposure_only: usize,
}

/// Right join on (canonical key, year, month), keeping every lights record.
///
/// Both inputs must already be unique per join key. Missing exposure is
/// filled with 0.0 and the exposure-side name wins when both sides match.
pub fn right_join(exposure: &[ExposureRecord], lights: &[LightsRecord]) -> JoinOutcome {
    let by_key: HashMap<JoinKey, &ExposureRecord> = exposure
        .iter()
        .map(|r| ((canonical_key(&r.region), r.year, r.month), r))
        .collect();

    let mut out = JoinOutcome::default();
    let mut lights_keys: HashSet<JoinKey> = HashSet::with_capacity(lights.len());
    for l in lights {
        let key = (canonical_key(&l.region), l.year, l.month);
        let row = match by_key.get(&key) {
            Some(e) => {
                out.matched += 1;
                MergedRecord {
                    region: e.region.clone(),
                    year: l.year,
                    month: l.month,
                    exposure: e.exposure,
                    mean_lights: l.mean_lights,
                }
            }
            None => {
                out.lights_only += 1;
                MergedRecord {
                    region: l.region.clone(),
                    year: l.year,
                    month: l.month,
                    exposure: 0.0,
                    mean_lights: l.mean_lights,
                }
            }
        };
        out.rows.push(row);
        lights_keys.insert(key);
    }
    out.exposure_only = by_key.keys().filter(|k| !lights_keys.contains(*k)).count();
    out
}
