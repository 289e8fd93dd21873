use crate::models::{RegionObservation, SeriesPoint};
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

/// Load series observations from CSV (`series_id,year,value` with header)
/// or a JSON array, chosen by file extension. Empty CSV value fields load
/// as missing observations.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<Vec<SeriesPoint>> {
    let path = path.as_ref();
    if has_extension(path, "json") {
        let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
        serde_json::from_reader(f).with_context(|| format!("parse {}", path.display()))
    } else {
        let mut rdr =
            csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
        rdr.deserialize()
            .collect::<csv::Result<Vec<SeriesPoint>>>()
            .with_context(|| format!("parse {}", path.display()))
    }
}

/// Load region observations from CSV (`region,category,value` with header)
/// or a JSON array. Empty CSV category/value fields load as `None`.
pub fn load_regions<P: AsRef<Path>>(path: P) -> Result<Vec<RegionObservation>> {
    let path = path.as_ref();
    if has_extension(path, "json") {
        let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
        serde_json::from_reader(f).with_context(|| format!("parse {}", path.display()))
    } else {
        let mut rdr =
            csv::Reader::from_path(path).with_context(|| format!("open {}", path.display()))?;
        rdr.deserialize()
            .collect::<csv::Result<Vec<RegionObservation>>>()
            .with_context(|| format!("parse {}", path.display()))
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn load_series_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("s.csv");
        let jsonp = dir.path().join("s.json");

        let mut f = File::create(&csvp).unwrap();
        writeln!(f, "series_id,year,value").unwrap();
        writeln!(f, "gdp,2020,1.5").unwrap();
        writeln!(f, "gdp,2021,").unwrap();

        let pts = load_series(&csvp).unwrap();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].value, Some(1.5));
        assert_eq!(pts[1].value, None);

        let mut f = File::create(&jsonp).unwrap();
        f.write_all(serde_json::to_string(&pts).unwrap().as_bytes())
            .unwrap();
        assert_eq!(load_series(&jsonp).unwrap(), pts);
    }

    #[test]
    fn load_regions_csv_handles_missing_category() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("r.csv");
        let mut f = File::create(&csvp).unwrap();
        writeln!(f, "region,category,value").unwrap();
        writeln!(f, "CA,US,12.0").unwrap();
        writeln!(f, "XX,,").unwrap();

        let obs = load_regions(&csvp).unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].category.as_deref(), Some("US"));
        assert_eq!(obs[1].category, None);
        assert_eq!(obs[1].value, None);
    }
}
