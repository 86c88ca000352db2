//! Defines the `RunParameters` struct, which represents the contents of `run.toml`.
use super::{input_err_msg, read_toml};
use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

const RUN_PARAMETERS_FILE_NAME: &str = "run.toml";

/// Represents the contents of the entire run file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct RunParameters {
    /// A label for the run
    pub run_name: String,
    /// Analysis years.
    ///
    /// Scenarios are grouped by year and the groups appear in the catalog in this order, which
    /// need not be ascending.
    pub years: Vec<u32>,
    /// Where outputs for the run are written.
    ///
    /// Can be overridden on the command line.
    #[serde(default)]
    pub home_dir: Option<PathBuf>,
}

/// Check that a run name is valid.
///
/// The run name is used as the name of the run folder inside the home directory, so it must be a
/// single, ordinary path component.
pub fn check_run_name(run_name: &str) -> Result<()> {
    ensure!(!run_name.trim().is_empty(), "`run_name` cannot be empty");

    let mut components = Path::new(run_name).components();
    ensure!(
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ),
        "`run_name` must be a plain folder name: {run_name}"
    );

    Ok(())
}

/// Check that the `years` parameter is valid
fn check_years(years: &[u32]) -> Result<()> {
    ensure!(!years.is_empty(), "`years` is empty");

    ensure!(
        years.iter().all_unique(),
        "`years` must be composed of unique values"
    );

    Ok(())
}

impl RunParameters {
    /// Read a run file from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `catalog_dir` - Folder containing catalog files
    ///
    /// # Returns
    ///
    /// The file contents as a [`RunParameters`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(catalog_dir: P) -> Result<RunParameters> {
        let file_path = catalog_dir.as_ref().join(RUN_PARAMETERS_FILE_NAME);
        let params: RunParameters = read_toml(&file_path)?;

        params
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(params)
    }

    /// Validate parameters after reading in file
    fn validate(&self) -> Result<()> {
        check_run_name(&self.run_name)?;
        check_years(&self.years)?;

        Ok(())
    }
}
