//! The module responsible for writing run output to disk.
use crate::collaborator::Collaborator;
use crate::run_config::RunConfig;
use crate::scenario::{PolicyGroup, ScenarioRecord, ScenarioSlug};
use anyhow::{Context, Result, ensure};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod metadata;
use metadata::write_metadata;

/// The folder in which run folders are created if no home directory is given
pub const DEFAULT_HOME_DIR: &str = "smartdata_results";

/// The output file name for the scenario manifest
const SCENARIOS_FILE_NAME: &str = "scenarios.csv";

/// Choose the home directory for a run.
///
/// The first of the given options to be set is used, falling back on [`DEFAULT_HOME_DIR`].
pub fn resolve_home_dir(candidates: &[Option<&Path>]) -> PathBuf {
    candidates
        .iter()
        .flatten()
        .next()
        .map_or_else(|| PathBuf::from(DEFAULT_HOME_DIR), |path| path.to_path_buf())
}

/// Create a new output directory, if it doesn't already exist.
///
/// # Arguments
///
/// * `output_dir` - The folder to create
/// * `allow_overwrite` - Whether an existing, non-empty folder may be reused
///
/// # Returns
///
/// True if the folder already existed and its contents may be overwritten, otherwise false.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    if output_dir.is_dir() {
        if output_dir.read_dir()?.next().is_none() {
            // Empty folder
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Use --overwrite to replace its contents."
        );

        return Ok(true);
    }

    fs::create_dir_all(output_dir)?;

    Ok(false)
}

/// Represents a scenario in the manifest CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct ScenarioRow {
    id: u32,
    year: u32,
    horizon_span: u32,
    group: PolicyGroup,
    tech_label: String,
    slug: ScenarioSlug,
    source_uri: String,
}

impl ScenarioRow {
    /// Create a new [`ScenarioRow`]
    fn new(record: &ScenarioRecord) -> Self {
        Self {
            id: record.id,
            year: record.year,
            horizon_span: record.horizon_span,
            group: record.group,
            tech_label: record.tech_label.clone(),
            slug: record.slug.clone(),
            source_uri: record.source_uri.clone(),
        }
    }
}

/// Write the scenarios of a run to a CSV file, in catalog order
fn write_scenarios(run_dir: &Path, config: &RunConfig) -> Result<()> {
    let mut writer = csv::Writer::from_path(run_dir.join(SCENARIOS_FILE_NAME))?;
    for record in &config.scenarios {
        writer.serialize(ScenarioRow::new(record))?;
    }
    writer.flush()?;

    Ok(())
}

/// Records the run handed to it in the run's folder under the home directory.
///
/// The folder gets a CSV manifest of the scenarios and a metadata file describing the run. This is
/// what a plotting routine would be given; it doesn't fetch any simulation outputs.
pub struct ManifestWriter {
    catalog_path: PathBuf,
}

impl ManifestWriter {
    /// Create a new [`ManifestWriter`].
    ///
    /// # Arguments
    ///
    /// * `catalog_path` - Where the catalog was loaded from (recorded in the metadata)
    pub fn new(catalog_path: &Path) -> Self {
        Self {
            catalog_path: catalog_path.to_path_buf(),
        }
    }
}

impl Collaborator for ManifestWriter {
    fn make_plots(&mut self, config: RunConfig) -> Result<()> {
        let run_dir = config.run_dir();
        fs::create_dir_all(&run_dir).with_context(|| {
            format!("Failed to create output directory: {}", run_dir.display())
        })?;

        for record in &config.scenarios {
            info!(
                "Scenario {} ({}, {} {}): {}",
                record.id, record.slug, record.year, record.tech_label, record.source_uri
            );
        }

        write_scenarios(&run_dir, &config)?;
        write_metadata(&run_dir, &self.catalog_path, &config)?;
        info!("Run manifest written to {}", run_dir.display());

        Ok(())
    }
}
