mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "preflight",
    about = "Salesforce metadata pre-deployment checker — validate a metadata tree before it ships",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .preflight.yaml, sfdx-project.json, or .git/)
    #[arg(long, global = true, env = "PREFLIGHT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a .preflight.yaml config in the project root
    Init,

    /// Run the pre-deployment checks and report findings
    Check {
        /// List the registered checks instead of running them
        #[arg(long)]
        list: bool,
    },

    /// Parse and display the package manifest
    Manifest {
        /// Manifest path (default: the configured one)
        path: Option<PathBuf>,
    },

    /// Analyze an Apex trigger for bulkification anti-patterns
    Trigger {
        /// Path to a .trigger file
        file: PathBuf,
    },

    /// Inspect and validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Check { list } => cmd::check::run(&root, list, cli.json),
        Commands::Manifest { path } => cmd::manifest::run(&root, path.as_deref(), cli.json),
        Commands::Trigger { file } => cmd::trigger::run(&file, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
