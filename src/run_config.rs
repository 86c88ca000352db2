//! The configuration handed to the plotting routine for a single run.
use crate::catalog::Catalog;
use std::path::{Path, PathBuf};

/// Everything the plotting routine needs to know about a run.
///
/// A `RunConfig` is built once and then consumed by [`crate::collaborator::execute`].
#[derive(Debug, PartialEq)]
pub struct RunConfig {
    /// A label for this run (e.g. "20thSep2019")
    pub run_name: String,
    /// Where outputs and plots are written or cached
    pub home_dir: PathBuf,
    /// The scenarios to analyse
    pub scenarios: Catalog,
}

impl RunConfig {
    /// The folder within `home_dir` which belongs to this run
    pub fn run_dir(&self) -> PathBuf {
        self.home_dir.join(&self.run_name)
    }
}

/// Assemble a [`RunConfig`].
///
/// No checks are performed: deciding whether the values make sense is up to the consumer.
pub fn build_run_config(run_name: &str, home_dir: &Path, catalog: Catalog) -> RunConfig {
    RunConfig {
        run_name: run_name.to_string(),
        home_dir: home_dir.to_path_buf(),
        scenarios: catalog,
    }
}
