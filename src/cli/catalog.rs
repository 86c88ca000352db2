//! Code related to the bundled catalogs and the CLI commands for interacting with them.
use super::{RunOpts, handle_run_command};
use crate::settings::Settings;
use anyhow::{Context, Result, bail, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The directory containing the bundled catalogs.
static CATALOGS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/catalogs");

/// The available subcommands for managing bundled catalogs.
#[derive(Subcommand)]
pub enum CatalogSubcommands {
    /// List bundled catalogs.
    List,
    /// Provide information about the specified catalog.
    Info {
        /// The name of the catalog.
        name: String,
    },
    /// Extract a bundled catalog to a new directory.
    Extract {
        /// The name of the catalog to extract.
        name: String,
        /// The destination folder for the catalog.
        new_path: Option<PathBuf>,
    },
    /// Run a bundled catalog.
    Run {
        /// The name of the catalog to run.
        name: String,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
}

impl CatalogSubcommands {
    /// Execute the supplied catalog subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_catalog_list_command(),
            Self::Info { name } => handle_catalog_info_command(&name)?,
            Self::Extract {
                name,
                new_path: dest,
            } => handle_catalog_extract_command(&name, dest.as_deref())?,
            Self::Run { name, opts } => handle_catalog_run_command(&name, &opts, None)?,
        }

        Ok(())
    }
}

/// Get the names of the bundled catalogs
pub fn catalog_names() -> impl Iterator<Item = &'static str> {
    CATALOGS_DIR
        .dirs()
        .filter_map(|dir| dir.path().file_name()?.to_str())
}

/// Handle the `catalog list` command.
fn handle_catalog_list_command() {
    for name in catalog_names() {
        println!("{name}");
    }
}

/// Get the README text for a bundled catalog
fn catalog_readme(name: &str) -> Result<&'static str> {
    let path: PathBuf = [name, "README.txt"].iter().collect();
    CATALOGS_DIR
        .get_file(path)
        .context("Catalog not found.")?
        .contents_utf8()
        .context("README.txt is not UTF-8 encoded")
}

/// Handle the `catalog info` command.
fn handle_catalog_info_command(name: &str) -> Result<()> {
    println!("{}", catalog_readme(name)?);

    Ok(())
}

/// Handle the `catalog extract` command
fn handle_catalog_extract_command(name: &str, dest: Option<&Path>) -> Result<()> {
    let dest = dest.unwrap_or(Path::new(name));
    extract_catalog(name, dest)
}

/// Extract the specified catalog to a new directory
pub fn extract_catalog(name: &str, new_path: &Path) -> Result<()> {
    let sub_dir = CATALOGS_DIR.get_dir(name).context("Catalog not found.")?;
    extract_dir(sub_dir, new_path)
}

/// Write the files in `dir` to a new directory at `new_path`
fn extract_dir(dir: &Dir, new_path: &Path) -> Result<()> {
    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    fs::create_dir(new_path)?;
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(_) => bail!("Subdirectories in catalogs not supported"),
            DirEntry::File(f) => {
                let file_name = f.path().file_name().context("Invalid file name")?;
                fs::write(new_path.join(file_name), f.contents())?;
            }
        }
    }

    Ok(())
}

/// Handle the `catalog run` command.
pub fn handle_catalog_run_command(
    name: &str,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let catalog_path = temp_dir.path().join(name);
    extract_catalog(name, &catalog_path)?;
    handle_run_command(&catalog_path, opts, settings)
}
