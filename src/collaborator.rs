//! The boundary between the catalog builder and the routine which plots the scenarios.
use crate::run_config::RunConfig;
use anyhow::Result;
use log::info;

/// Something which consumes a run configuration, e.g. to analyse and plot its scenarios.
///
/// Implementations are responsible for resolving each scenario's `source_uri` and for reporting
/// any problem they have with the configuration.
pub trait Collaborator {
    /// Process the run described by `config`
    fn make_plots(&mut self, config: RunConfig) -> Result<()>;
}

/// Hand the run configuration over to the collaborator.
///
/// The collaborator is called exactly once, even if the catalog is empty. Any error it returns is
/// passed back unchanged.
pub fn execute<C: Collaborator + ?Sized>(config: RunConfig, collaborator: &mut C) -> Result<()> {
    info!(
        "Handing {} scenario(s) for run '{}' to collaborator",
        config.scenarios.len(),
        config.run_name
    );
    collaborator.make_plots(config)
}
