//! The command line interface for the program.
use crate::catalog::build_catalog;
use crate::collaborator::{Collaborator, execute};
use crate::input::run::check_run_name;
use crate::input::{RunParameters, load_catalog, load_scenario_groups};
use crate::log;
use crate::output::{ManifestWriter, create_output_directory, resolve_home_dir};
use crate::run_config::{RunConfig, build_run_config};
use crate::settings::Settings;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use itertools::Itertools;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod catalog;
use catalog::CatalogSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the program.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the run command
#[derive(Args, Default)]
pub struct RunOpts {
    /// Directory in which the run folder is created
    #[arg(long)]
    pub home_dir: Option<PathBuf>,
    /// Label for the run, overriding the one in run.toml
    #[arg(long)]
    pub run_name: Option<String>,
    /// Whether to overwrite the run folder if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Build a scenario catalog and hand it over for plotting.
    Run {
        /// Path to the catalog directory.
        catalog_dir: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Validate a scenario catalog.
    Validate {
        /// Path to the catalog directory.
        catalog_dir: PathBuf,
    },
    /// Manage bundled catalogs.
    Catalog {
        /// The available subcommands for managing bundled catalogs.
        #[command(subcommand)]
        subcommand: CatalogSubcommands,
    },
    /// Manage program settings.
    Settings {
        /// The subcommands for managing settings.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { catalog_dir, opts } => handle_run_command(&catalog_dir, &opts, None),
            Self::Validate { catalog_dir } => handle_validate_command(&catalog_dir, None),
            Self::Catalog { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start the program
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ smartdata --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Handle the `run` command.
///
/// Prints `END` once the catalog has been handed over successfully.
pub fn handle_run_command(
    catalog_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // We need the run parameters to know where the run folder goes
    let params = RunParameters::from_path(catalog_path).context("Failed to load catalog.")?;
    let run_name = match opts.run_name.as_deref() {
        Some(run_name) => {
            check_run_name(run_name).context("Invalid value for --run-name.")?;
            run_name
        }
        None => &params.run_name,
    };
    let home_dir = resolve_home_dir(&[
        opts.home_dir.as_deref(),
        params.home_dir.as_deref(),
        settings.home_dir.as_deref(),
    ]);
    let run_dir = home_dir.join(run_name);

    let overwrite = create_output_directory(&run_dir, opts.overwrite || settings.overwrite)
        .with_context(|| format!("Failed to create output directory: {}", run_dir.display()))?;

    // Initialise program logger
    log::init(Some(settings.log_level.as_str()), Some(&run_dir))
        .context("Failed to initialise logging.")?;

    let groups =
        load_scenario_groups(catalog_path, &params.years).context("Failed to load catalog.")?;
    info!("Loaded catalog from {}", catalog_path.display());
    info!("Output folder: {}", run_dir.display());

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let catalog = build_catalog(groups);
    info!(
        "Catalog contains {} scenario(s) for years: {}",
        catalog.len(),
        catalog.years().iter().join(", ")
    );

    let config = build_run_config(run_name, &home_dir, catalog);
    run_catalog(
        config,
        &mut ManifestWriter::new(catalog_path),
        &mut io::stdout(),
    )
}

/// Hand `config` over to `collaborator`, then write `END` to `out`.
///
/// `END` is only written if the collaborator succeeds. Its errors are returned unchanged.
pub fn run_catalog<C, W>(config: RunConfig, collaborator: &mut C, out: &mut W) -> Result<()>
where
    C: Collaborator + ?Sized,
    W: Write,
{
    execute(config, collaborator)?;
    writeln!(out, "END")?;

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(catalog_path: &Path, settings: Option<Settings>) -> Result<()> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // Initialise program logger (we won't save log files when running the validate command)
    log::init(Some(settings.log_level.as_str()), None).context("Failed to initialise logging.")?;

    let (params, groups) = load_catalog(catalog_path).context("Failed to validate catalog.")?;
    for group in &groups {
        info!("{}: {} scenario(s)", group.year(), group.len());
    }

    let catalog = build_catalog(groups);
    for (group, count) in catalog.count_by_group() {
        info!("Group {group}: {count} scenario(s)");
    }
    info!(
        "Catalog for run '{}' is valid ({} scenario(s))",
        params.run_name,
        catalog.len()
    );

    Ok(())
}
