//! Common routines for handling input data.
use crate::catalog::{check_scenario_ids_unique, group_by_year};
use crate::scenario::ScenarioGroup;
use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub mod run;
pub use run::RunParameters;
pub mod scenario;
use scenario::read_scenarios;

/// Read a series of type `T`s from a CSV file.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
///
/// # Returns
///
/// The records in file order, or an error if the file could not be read or parsed.
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(file_path).with_context(|| input_err_msg(file_path))?;
    reader
        .deserialize()
        .map(|record| record.with_context(|| input_err_msg(file_path)))
        .try_collect()
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Load a scenario catalog from the specified directory.
///
/// # Arguments
///
/// * `catalog_dir` - Folder containing the catalog's `run.toml` and `scenarios.csv`
///
/// # Returns
///
/// The run parameters and one group of enabled scenarios per analysis year, in the order the years
/// are declared.
pub fn load_catalog(catalog_dir: &Path) -> Result<(RunParameters, Vec<ScenarioGroup>)> {
    let params = RunParameters::from_path(catalog_dir)?;
    let groups = load_scenario_groups(catalog_dir, &params.years)?;

    Ok((params, groups))
}

/// Read the scenarios for a catalog and group them by year.
///
/// Disabled scenarios are dropped here, before any catalog is built from the groups.
///
/// # Arguments
///
/// * `catalog_dir` - Folder containing the catalog's `scenarios.csv`
/// * `years` - The catalog's analysis years, in order
pub fn load_scenario_groups(catalog_dir: &Path, years: &[u32]) -> Result<Vec<ScenarioGroup>> {
    let records = read_scenarios(catalog_dir)?;
    let mut groups = group_by_year(records, years)?;

    for group in &mut groups {
        for record in group.retain_enabled() {
            debug!(
                "Scenario {} ({}) for {} is disabled",
                record.id,
                record.slug,
                group.year()
            );
        }

        if group.is_empty() {
            warn!("No enabled scenarios for year {}", group.year());
        }
    }

    check_scenario_ids_unique(groups.iter().flat_map(ScenarioGroup::iter))?;

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use itertools::assert_equal;
    use serde::Deserialize;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Record {
        id: String,
        value: u32,
    }

    /// Create an example CSV file in dir_path
    fn create_csv_file(dir_path: &Path, contents: &str) -> std::path::PathBuf {
        let file_path = dir_path.join("test.csv");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "{contents}").unwrap();
        file_path
    }

    #[test]
    fn test_read_csv() {
        let dir = tempdir().unwrap();
        let file_path = create_csv_file(dir.path(), "id,value\nhello,1\nworld,2\n");
        let records: Vec<Record> = read_csv(&file_path).unwrap();
        assert_equal(
            records,
            [
                Record {
                    id: "hello".to_string(),
                    value: 1,
                },
                Record {
                    id: "world".to_string(),
                    value: 2,
                },
            ],
        );
    }

    #[test]
    fn test_read_csv_header_only() {
        let dir = tempdir().unwrap();
        let file_path = create_csv_file(dir.path(), "id,value");
        let records: Vec<Record> = read_csv(&file_path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_csv_bad_value() {
        let dir = tempdir().unwrap();
        let file_path = create_csv_file(dir.path(), "id,value\nhello,world");
        assert_error!(read_csv::<Record>(&file_path), input_err_msg(&file_path));
    }

    #[test]
    fn test_read_csv_missing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("missing.csv");
        assert_error!(read_csv::<Record>(&file_path), input_err_msg(&file_path));
    }

    #[test]
    fn test_read_toml() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Settings {
            value: u32,
        }

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "value = 1").unwrap();
        }
        assert_eq!(
            read_toml::<Settings>(&file_path).unwrap(),
            Settings { value: 1 }
        );

        // Invalid contents
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "bad toml file").unwrap();
        }
        assert!(read_toml::<Settings>(&file_path).is_err());
    }

    /// Create a catalog with the given years and scenario rows in dir_path
    fn create_catalog(dir_path: &Path, years: &str, rows: &str) {
        let mut file = File::create(dir_path.join("run.toml")).unwrap();
        writeln!(file, "run_name = \"test\"\nyears = {years}").unwrap();
        let mut file = File::create(dir_path.join("scenarios.csv")).unwrap();
        writeln!(
            file,
            "id,year,horizon_span,group,tech_label,slug,source_uri,enabled\n{rows}"
        )
        .unwrap();
    }

    #[test]
    fn test_load_catalog() {
        let dir = tempdir().unwrap();
        create_catalog(
            dir.path(),
            "[2010, 2025, 2040]",
            "1,2040,15,base,Base,baseline,uri40,true
1,2010,15,base,Base,baseline,uri10,true
2,2010,15,base,2030 Low Tech,base_fleet_2030_lt,uri,false
6,2010,15,a,Low Tech,a_lt,uri10a,true",
        );

        let (params, groups) = load_catalog(dir.path()).unwrap();
        assert_eq!(params.run_name, "test");
        let summary = groups
            .iter()
            .map(|g| (g.year(), g.iter().map(|r| r.id).collect_vec()))
            .collect_vec();
        let expected: Vec<(u32, Vec<u32>)> =
            vec![(2010, vec![1, 6]), (2025, vec![]), (2040, vec![1])];
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_load_catalog_duplicate_id() {
        let dir = tempdir().unwrap();
        create_catalog(
            dir.path(),
            "[2010]",
            "1,2010,15,base,Base,baseline,uri,true
1,2010,15,a,Low Tech,a_lt,uri,true",
        );
        assert_error!(load_catalog(dir.path()), "Duplicate scenario ID 1 for year 2010");
    }

    #[test]
    fn test_load_catalog_duplicate_id_disabled() {
        // A disabled record doesn't clash with an enabled one
        let dir = tempdir().unwrap();
        create_catalog(
            dir.path(),
            "[2010]",
            "1,2010,15,base,Base,baseline,uri,true
1,2010,15,a,Low Tech,a_lt,uri,false",
        );
        let (_, groups) = load_catalog(dir.path()).unwrap();
        assert_eq!(groups[0].len(), 1);
    }

    #[test]
    fn test_load_catalog_undeclared_year() {
        let dir = tempdir().unwrap();
        create_catalog(dir.path(), "[2010]", "1,2025,15,base,Base,baseline,uri,true");
        assert!(load_catalog(dir.path()).is_err());
    }

    #[test]
    fn test_load_catalog_declared_year_order() {
        // Groups follow the order of `years`, even if it isn't ascending
        let dir = tempdir().unwrap();
        create_catalog(
            dir.path(),
            "[2040, 2010]",
            "1,2010,15,base,Base,baseline,uri10,true
1,2040,15,base,Base,baseline,uri40,true",
        );

        let (_, groups) = load_catalog(dir.path()).unwrap();
        assert_eq!(groups.iter().map(ScenarioGroup::year).collect_vec(), [2040, 2010]);
    }
}
