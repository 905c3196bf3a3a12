use crate::error::Result;
use crate::types::MergedRecord;
use std::path::Path;
use tabled::{settings::Style, Table};
use tempfile::NamedTempFile;

/// Exported column order, written even when there are no rows.
pub const OUTPUT_COLUMNS: [&str; 5] = ["region", "year", "month", "exposure", "mean_lights"];

/// Mode for a freshly created panel; an existing target keeps its own.
#[cfg(unix)]
const DEFAULT_MODE: u32 = 0o644;

/// Write the merged panel as CSV. The file only appears at `path` once every
/// row has been written, so a failed run leaves whatever was there before.
pub fn write_csv(path: &Path, rows: &[MergedRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file());
        wtr.write_record(OUTPUT_COLUMNS)?;
        for r in rows {
            wtr.serialize(r)?;
        }
        wtr.flush()?;
    }
    set_output_permissions(&tmp, path)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// Temp files are created owner-only; give the panel a normal mode instead.
#[cfg(unix)]
fn set_output_permissions(tmp: &NamedTempFile, target: &Path) -> Result<()> {
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    let perms = match fs::metadata(target) {
        Ok(meta) => meta.permissions(),
        Err(_) => Permissions::from_mode(DEFAULT_MODE),
    };
    tmp.as_file().set_permissions(perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn set_output_permissions(_tmp: &NamedTempFile, _target: &Path) -> Result<()> {
    Ok(())
}

pub fn preview_table_rows(rows: &[MergedRecord], max_rows: usize) {
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(rows.iter().take(max_rows))
        .with(Style::markdown())
        .to_string();
    println!("{}\n", table_str);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(region: &str, exposure: f64) -> MergedRecord {
        MergedRecord {
            region: region.into(),
            year: 2020,
            month: 1,
            exposure,
            mean_lights: 0.5,
        }
    }

    #[test]
    fn csv_has_fixed_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final_merged.csv");
        write_csv(&path, &[row("Abra", 3.0), row("Batanes", 0.0)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("region,year,month,exposure,mean_lights"));
        assert_eq!(lines.next(), Some("Abra,2020,1,3.0,0.5"));
        assert_eq!(lines.next(), Some("Batanes,2020,1,0.0,0.5"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn existing_file_is_replaced_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale\nstale\nstale\n").unwrap();
        write_csv(&path, &[row("Abra", 1.0)]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn missing_directory_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");
        assert!(write_csv(&path, &[row("Abra", 1.0)]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn zero_rows_still_write_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final_merged.csv");
        write_csv(&path, &[]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "region,year,month,exposure,mean_lights\n");
    }

    #[cfg(unix)]
    #[test]
    fn new_output_is_readable_by_others() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final_merged.csv");
        write_csv(&path, &[row("Abra", 1.0)]).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn replaced_output_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("final_merged.csv");
        std::fs::write(&path, "old\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o664)).unwrap();
        write_csv(&path, &[row("Abra", 1.0)]).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
    }
}
