// Region name handling: canonical match keys, the lights alias table, the
// Metro Manila district collapse and the canonical-key conflict check.
use crate::error::{MergeError, Result};
use crate::types::{ExposureRecord, LightsRecord};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

pub const METRO_MANILA: &str = "Metropolitan Manila";

/// Exposure reports Metro Manila by district; lights reports it whole.
pub const METRO_MANILA_DISTRICTS: [&str; 4] = [
    "Metropolitan Manila - 1st District",
    "Metropolitan Manila - 2nd District",
    "Metropolitan Manila - 3rd District",
    "Metropolitan Manila - 4th District",
];

/// Historical or misspelled province names in the lights source.
pub static LIGHTS_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Shariff Kabunsuan", "Maguindanao"),
        ("Saranggani", "Sarangani"),
    ])
});

/// Match key for a raw region name. Never shown to users.
///
/// Lower-cases, turns `-` and `–` into spaces and collapses whitespace, so
/// `"Metropolitan Manila – 1st District "` and
/// `"metropolitan manila-1st district"` agree. Applying it twice is a no-op.
pub fn canonical_key(raw: &str) -> String {
    let spaced: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '\u{2013}' { ' ' } else { c })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Corrected name for a lights province, or the name itself.
pub fn correct_alias(raw: &str) -> &str {
    LIGHTS_ALIASES.get(raw).copied().unwrap_or(raw)
}

pub fn apply_lights_aliases(records: &[LightsRecord]) -> Vec<LightsRecord> {
    let mut renamed = 0usize;
    let out = records
        .iter()
        .map(|r| {
            let name = correct_alias(&r.region);
            if name != r.region {
                renamed += 1;
            }
            LightsRecord {
                region: name.to_string(),
                ..r.clone()
            }
        })
        .collect();
    debug!(renamed, "applied lights alias table");
    out
}

pub fn is_metro_district(raw: &str) -> bool {
    METRO_MANILA_DISTRICTS.contains(&raw.trim())
}

/// Replace the four district records of each period with one summed
/// `Metropolitan Manila` record. Returns the new table and how many periods
/// were synthesized.
pub fn collapse_metro_districts(records: &[ExposureRecord]) -> (Vec<ExposureRecord>, usize) {
    let mut by_period: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    let mut out: Vec<ExposureRecord> = Vec::with_capacity(records.len());
    for r in records {
        if is_metro_district(&r.region) {
            *by_period.entry((r.year, r.month)).or_insert(0.0) += r.exposure;
        } else {
            out.push(r.clone());
        }
    }
    let periods = by_period.len();
    out.extend(
        by_period
            .into_iter()
            .map(|((year, month), exposure)| ExposureRecord {
                region: METRO_MANILA.to_string(),
                year,
                month,
                exposure,
            }),
    );
    debug!(periods, "collapsed Metro Manila districts");
    (out, periods)
}

/// Fail when two distinct raw names in one table share a canonical key.
///
/// Names the alias table and district collapse already merged are gone by
/// the time this runs, so any clash left is between unrelated regions.
pub fn check_canonical_conflicts<'a, I>(table: &'static str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, &'a str> = HashMap::new();
    for name in names {
        let key = canonical_key(name);
        match seen.get(&key) {
            Some(&first) if first != name => {
                return Err(MergeError::DuplicateCanonicalKeyConflict {
                    table,
                    key,
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
            Some(_) => {}
            None => {
                seen.insert(key, name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exposure(region: &str, year: i32, month: u32, exposure: f64) -> ExposureRecord {
        ExposureRecord { region: region.into(), year, month, exposure }
    }

    #[test]
    fn canonical_key_normalizes_case_space_and_dashes() {
        assert_eq!(canonical_key("  Abra "), "abra");
        assert_eq!(canonical_key("Lanao del Norte"), "lanao del norte");
        assert_eq!(
            canonical_key("Metropolitan Manila – 1st District"),
            canonical_key("metropolitan manila-1st district")
        );
        assert_eq!(canonical_key(""), "");
        assert_eq!(canonical_key("--"), "");
    }

    #[test]
    fn canonical_key_is_idempotent() {
        for raw in [" a-", "Cotabato City – ", "MOUNTAIN  PROVINCE", "x - y", "\u{2013}z"] {
            let once = canonical_key(raw);
            assert_eq!(canonical_key(&once), once, "{raw:?}");
        }
    }

    #[test]
    fn aliases_rewrite_known_names_only() {
        assert_eq!(correct_alias("Shariff Kabunsuan"), "Maguindanao");
        assert_eq!(correct_alias("Saranggani"), "Sarangani");
        assert_eq!(correct_alias("Bukidnon"), "Bukidnon");
    }

    #[test]
    fn alias_makes_records_indistinguishable() {
        let recs = vec![
            LightsRecord { region: "Shariff Kabunsuan".into(), year: 2015, month: 4, mean_lights: 0.5 },
            LightsRecord { region: "Maguindanao".into(), year: 2015, month: 4, mean_lights: 1.0 },
        ];
        let fixed = apply_lights_aliases(&recs);
        assert_eq!(fixed[0].region, fixed[1].region);
        assert_eq!(canonical_key(&fixed[0].region), canonical_key(&fixed[1].region));
        // input untouched
        assert_eq!(recs[0].region, "Shariff Kabunsuan");
    }

    #[test]
    fn metro_districts_sum_into_one_record() {
        let recs = vec![
            exposure(METRO_MANILA_DISTRICTS[0], 2020, 1, 10.0),
            exposure(METRO_MANILA_DISTRICTS[1], 2020, 1, 20.0),
            exposure(METRO_MANILA_DISTRICTS[2], 2020, 1, 30.0),
            exposure(METRO_MANILA_DISTRICTS[3], 2020, 1, 40.0),
            exposure("Cavite", 2020, 1, 5.0),
        ];
        let (out, periods) = collapse_metro_districts(&recs);
        assert_eq!(periods, 1);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| !is_metro_district(&r.region)));
        let metro: Vec<_> = out.iter().filter(|r| r.region == METRO_MANILA).collect();
        assert_eq!(metro.len(), 1);
        assert_eq!(metro[0].exposure, 100.0);
        assert_eq!((metro[0].year, metro[0].month), (2020, 1));
    }

    #[test]
    fn metro_collapse_is_per_period() {
        let recs = vec![
            exposure(METRO_MANILA_DISTRICTS[0], 2020, 1, 1.0),
            exposure(METRO_MANILA_DISTRICTS[1], 2020, 2, 2.0),
            exposure(METRO_MANILA_DISTRICTS[2], 2020, 2, 3.0),
        ];
        let (out, periods) = collapse_metro_districts(&recs);
        assert_eq!(periods, 2);
        assert_eq!(out, vec![
            exposure(METRO_MANILA, 2020, 1, 1.0),
            exposure(METRO_MANILA, 2020, 2, 5.0),
        ]);
    }

    #[test]
    fn conflicting_names_are_reported() {
        let err = check_canonical_conflicts("lights", ["Abra", "Cebu", "ABRA "]).unwrap_err();
        match err {
            MergeError::DuplicateCanonicalKeyConflict { table, key, first, second } => {
                assert_eq!(table, "lights");
                assert_eq!(key, "abra");
                assert_eq!(first, "Abra");
                assert_eq!(second, "ABRA ");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn repeated_identical_names_are_fine() {
        assert!(check_canonical_conflicts("exposure", ["Abra", "Abra", "Cebu"]).is_ok());
    }
}
