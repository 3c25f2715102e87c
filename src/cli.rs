//! The command line interface for the simulator.
use crate::history::ComparisonHistory;
use crate::input::{Scenario, load_scenarios, params_to_scenario_toml};
use crate::log;
use crate::output::metadata::write_metadata;
use crate::output::{DataWriter, create_output_directory, get_output_dir};
use crate::settings::Settings;
use crate::simulation::Simulator;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the simulator.
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
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run every scenario in a scenario file.
    Run {
        /// Path to the scenario file.
        scenario_file: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Check that the scenarios in a file are valid.
    Validate {
        /// Path to the scenario file.
        scenario_file: PathBuf,
    },
    /// Print a set of parameters as a scenario.
    Params {
        /// Which parameters to print.
        #[command(subcommand)]
        subcommand: ParamsSubcommands,
    },
    /// Manage example scenario files.
    Example {
        /// The available subcommands for managing example scenario files.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

/// Sets of parameters which can be printed
#[derive(Subcommand)]
enum ParamsSubcommands {
    /// The parameters for a fresh scenario.
    Default,
    /// A balanced preset with moderate irrigation, fertiliser and pesticides.
    Balanced,
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run {
                scenario_file,
                opts,
            } => handle_run_command(&scenario_file, &opts, None),
            Self::Validate { scenario_file } => handle_validate_command(&scenario_file, None),
            Self::Params { subcommand } => handle_params_command(&subcommand),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start AgriSim
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ agrisim --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, if not provided
fn load_settings(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// Handle the `run` command.
pub fn handle_run_command(
    scenario_file: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = load_settings(settings)?;

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir(&settings.results_dir, scenario_file)?;
        &pathbuf
    };

    // This setting can be overridden by command-line argument
    let allow_overwrite = opts.overwrite || settings.overwrite;
    let overwrite = create_output_directory(output_path, allow_overwrite).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_path.display()
        )
    })?;

    // Initialise program logger
    log::init(&settings.log_level, Some(output_path)).context("Failed to initialise logging.")?;

    // Load the scenarios to run
    let scenarios = load_scenarios(scenario_file).context("Failed to load scenarios.")?;
    info!(
        "Loaded {} scenario(s) from {}",
        scenarios.len(),
        scenario_file.display()
    );
    info!("Output folder: {}", output_path.display());

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let history = run_scenarios(&scenarios, output_path)?;
    write_metadata(output_path, scenario_file, scenarios.len())
        .context("Failed to save metadata.")?;
    info!(
        "Simulation complete! {} run(s) kept in comparison history.",
        history.len()
    );

    Ok(())
}

/// Simulate each scenario in turn, writing the results to `output_path`.
///
/// # Returns
///
/// The comparison history after the final scenario
fn run_scenarios(scenarios: &[Scenario], output_path: &Path) -> Result<ComparisonHistory> {
    let mut writer = DataWriter::create(output_path).context("Failed to create output files.")?;
    let mut simulator = Simulator::new();
    for (idx, scenario) in scenarios.iter().enumerate() {
        let label = scenario
            .label
            .clone()
            .unwrap_or_else(|| format!("Scenario {}", idx + 1));
        let result = simulator
            .run_labelled(label.clone(), scenario.params)
            .with_context(|| format!("Failed to simulate {label}"))?;
        info!(
            "{label}: yield {:.2} t, profit {:.2}, risk {}",
            result.expected_yield.value(),
            result.profit.value(),
            result.risk_level
        );
        writer.write_result(
            &label,
            scenario.params.crop_type,
            scenario.params.season,
            result,
        )?;
    }

    writer.flush()?;
    writer.write_history(simulator.history())?;

    Ok(simulator.history().clone())
}

/// Handle the `validate` command.
pub fn handle_validate_command(scenario_file: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = load_settings(settings)?;

    // Initialise program logger (we won't save log files when running the validate command)
    log::init(&settings.log_level, None).context("Failed to initialise logging.")?;

    // Load/validate the scenarios
    let scenarios = load_scenarios(scenario_file).context("Failed to validate scenarios.")?;
    info!("Validation successful for {} scenario(s)!", scenarios.len());

    Ok(())
}

/// Handle the `params` command.
fn handle_params_command(subcommand: &ParamsSubcommands) -> Result<()> {
    let (label, params) = match subcommand {
        ParamsSubcommands::Default => ("Default", Simulator::reset_parameters()),
        ParamsSubcommands::Balanced => ("Balanced", Simulator::new().optimize_parameters()),
    };
    print!("{}", params_to_scenario_toml(label, &params)?);

    Ok(())
}
