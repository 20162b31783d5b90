use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use linkwarp::commands::config_cmd::ConfigOptions;
use linkwarp::commands::scan::ScanRequest;
use linkwarp::commands::sync::SyncOptions;
use linkwarp::commands::{execute_config, execute_scan, execute_sync};
use linkwarp::error::AppError;
use linkwarp::path::resolve_roots;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(AppError::Usage(String::new()).exit_code());
        }
        Err(err) => err.exit(),
    };

    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("linkwarp: error: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Some(Commands::Sync(args)) => sync(args),
        None => sync(cli.sync),
        Some(Commands::Scan(args)) => {
            let roots = resolve_roots(&args.roots)?;
            execute_scan(ScanRequest { root: roots.search, verbose: cli.verbose })?;
            Ok(())
        }
        Some(Commands::Config(args)) => {
            execute_config(ConfigOptions { show_path: args.path, init: args.init })
        }
    }
}

fn sync(args: SyncArgs) -> Result<(), AppError> {
    let roots = resolve_roots(&args.roots)?.with_app_root(args.app_root);
    execute_sync(SyncOptions { roots })?;
    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose` when set.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("linkwarp={level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(
    name = "linkwarp",
    version,
    about = "Link every application's executables into one shared bin directory.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    sync: SyncArgs,

    /// Log every discovery and decision.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for applications and reconcile links (the default).
    Sync(SyncArgs),
    /// List discovered applications and executables without linking.
    Scan(ScanArgs),
    /// Show or create the configuration file.
    Config(ConfigArgs),
}

#[derive(Args)]
struct SyncArgs {
    /// Base for link targets (defaults to `../apps` for a prefix, else the search root).
    #[arg(long = "app-root", value_name = "PATH")]
    app_root: Option<PathBuf>,

    /// A prefix containing `apps/` and `bin/`, or a search root and a bin root.
    /// Without any, the prefix is located relative to this binary.
    #[arg(value_name = "ROOT", num_args = 0..)]
    roots: Vec<PathBuf>,
}

#[derive(Args)]
struct ScanArgs {
    /// A prefix containing `apps/`, or a search root followed by a bin root.
    #[arg(value_name = "ROOT", num_args = 0..)]
    roots: Vec<PathBuf>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Show the configuration file path.
    #[arg(long = "path", action = ArgAction::SetTrue)]
    path: bool,

    /// Write a default configuration file if none exists.
    #[arg(long = "init", action = ArgAction::SetTrue)]
    init: bool,
}
