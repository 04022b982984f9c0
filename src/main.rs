mod repository;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Enable and disable package repositories while building StarlingX images
#[derive(Parser, Debug)]
#[command(name = "stx-repos", author, version, about, long_about = None)]
struct Cli {
    /// Repositories to toggle, e.g. "-STX +OS -updates"
    #[arg(long, env = "DIST_REPOS", default_value = "", global = true, allow_hyphen_values = true)]
    repos: String,

    /// Image root to operate on instead of the running system
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the actions instead of performing them
    #[arg(short, long, global = true)]
    pretend: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Toggle the repositories named by DIST_REPOS (default)
    Apply,
    /// Show the actions DIST_REPOS resolves to
    Plan,
    /// Show the group aliases of the detected distro
    Groups,
    /// Show the detected distro
    Detect,
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = repository::load_settings(cli.config.as_deref(), cli.root.as_deref())?;

    match cli.command.unwrap_or(Commands::Apply) {
        Commands::Apply if !cli.pretend => {
            repository::apply(&settings, &cli.repos)?;
        }
        Commands::Apply | Commands::Plan => {
            for action in repository::plan(&settings, &cli.repos)? {
                println!("{}", action);
            }
        }
        Commands::Groups => {
            let distro = repository::detect(&settings)?;
            for (name, names) in config::GroupTable::for_distro(distro).iter() {
                println!("{} = {}", name, names.join(" "));
            }
        }
        Commands::Detect => {
            println!("{}", repository::detect(&settings)?);
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
