//! Common functionality for smartdata.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod catalog;
pub mod cli;
pub mod collaborator;
pub mod input;
pub mod log;
pub mod output;
pub mod run_config;
pub mod scenario;
pub mod settings;

#[cfg(test)]
mod fixture;

/// Get the path to the folder where smartdata's program-wide config files live
pub fn get_smartdata_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().expect("Could not determine config directory");
    path.push("smartdata");

    path
}
