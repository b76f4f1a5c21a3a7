mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// modforge - build configuration for library modules
#[derive(Parser)]
#[command(name = "forge")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(flatten)]
  module: ModuleArgs,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

/// Where the module description comes from.
#[derive(Args, Debug, Clone)]
pub struct ModuleArgs {
  /// Module description file (default: module.toml, if present)
  #[arg(short, long, global = true)]
  pub file: Option<PathBuf>,

  /// Properties file providing conventions and build flags
  #[arg(long, global = true, default_value = "gradle.properties")]
  pub properties: PathBuf,

  /// Set a property (`key=value`, or a bare `key` for flags such as `release` and to enable a toggle)
  #[arg(short = 'P', global = true, value_name = "KEY[=VALUE]")]
  pub props: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
  /// Finalize the module and summarize its build model
  Plan,

  /// Show the derived publish identity
  Identity,

  /// Print the POM of the release publication
  Pom,

  /// Show the order in which the requested actions would run
  Order {
    /// Actions to resolve
    #[arg(required = true)]
    actions: Vec<String>,
  },

  /// Run the requested actions and everything they depend on
  Run {
    /// Actions to run
    #[arg(required = true)]
    actions: Vec<String>,

    /// Resolve every command without running it
    #[arg(long)]
    dry_run: bool,

    /// Maximum number of actions to run in parallel
    #[arg(short, long)]
    jobs: Option<usize>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Plan => cmd::cmd_plan(&cli.module, cli.format, cli.verbose),
    Commands::Identity => cmd::cmd_identity(&cli.module, cli.format),
    Commands::Pom => cmd::cmd_pom(&cli.module),
    Commands::Order { actions } => cmd::cmd_order(&cli.module, &actions, cli.format),
    Commands::Run {
      actions,
      dry_run,
      jobs,
    } => cmd::cmd_run(&cli.module, &actions, dry_run, jobs, cli.format),
  };

  if let Err(e) = &result {
    output::print_error(&format!("{:#}", e));
    std::process::exit(1);
  }

  Ok(())
}
