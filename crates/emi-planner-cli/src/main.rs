mod commands;
mod config;
mod input;
mod output;
mod storage;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::export::ExportArgs;
use commands::plan::{EditArgs, SimulateArgs, SummaryArgs, ValidateArgs};
use commands::plans::PlansCommand;
use commands::CommandResult;
use config::{PlannerPaths, DATA_DIR_ENV};
use storage::PlanStore;

/// Loan and EMI planning with blended bank and own-funds financing
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan and EMI planning with blended bank and own-funds financing",
    long_about = "A CLI for planning a loan funded partly by a bank and partly by own \
                  funds. Validates plans, simulates straight-line amortisation month \
                  by month, summarises repayments and profit/loss, and exports \
                  LaTeX or CSV reports. Plans can be kept in a local store."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Directory holding saved plans
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a plan and report the first rule it breaks
    Validate(ValidateArgs),
    /// Run the monthly amortisation simulation
    Simulate(SimulateArgs),
    /// Summarise repayments, interest and profit/loss
    Summary(SummaryArgs),
    /// Apply a list of edits to a plan and print the result
    Edit(EditArgs),
    /// Export a LaTeX report or a CSV schedule
    Export(ExportArgs),
    /// Manage saved plans
    #[command(subcommand)]
    Plans(PlansCommand),
    /// Print a blank plan template
    New,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("emi=debug,emi_planner_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> CommandResult {
    let paths = PlannerPaths::resolve(cli.data_dir.as_deref())?;
    tracing::debug!(data_dir = %paths.data_dir().display(), "resolved data directory");
    let store = PlanStore::new(&paths);

    match cli.command {
        Commands::Validate(args) => commands::plan::run_validate(args, &store),
        Commands::Simulate(args) => commands::plan::run_simulate(args, &store),
        Commands::Summary(args) => commands::plan::run_summary(args, &store),
        Commands::Edit(args) => commands::plan::run_edit(args, &store),
        Commands::Export(args) => commands::export::run_export(args, &store),
        Commands::Plans(command) => commands::plans::run_plans(command, &store),
        Commands::New => commands::plan::run_new(),
        Commands::Version => Ok(commands::CommandOutput::Text(format!(
            "emi {}",
            env!("CARGO_PKG_VERSION")
        ))),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = cli.output.clone();

    match run(cli) {
        Ok(out) => {
            output::emit(&format, &out);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
