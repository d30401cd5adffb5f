use anyhow::Result;
use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

// CLI Commands (cmd_ prefix)
mod cmd_create;
mod cmd_ls;
mod cmd_purge;
mod cmd_serve;

// Helper modules (no cmd_ prefix)
mod logger;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(bin_name = "supportbundle")]
#[command(version = VERSION)]
#[command(about = concat!(
    "supportbundle v",
    env!("CARGO_PKG_VERSION"),
    " - Support Bundle Lifecycle Management"
))]
#[command(long_about = concat!(
    "supportbundle v", env!("CARGO_PKG_VERSION"), " - Support Bundle Lifecycle Management\n\n",
    "Creates, serves and reaps tar.gz support bundles tracked through\n",
    "pending, done and purge states via filename conventions."
))]
#[command(propagate_version = true)]
pub struct Cli {
    /// Bundle storage directory
    #[arg(short = 'C', long = "dir", global = true, default_value = ".", value_hint = ValueHint::DirPath)]
    dir: PathBuf,

    /// Suppress progress output
    #[arg(long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(cmd_serve::ServeCommand),
    /// List bundles and their states (machine-readable)
    Ls(cmd_ls::LsCommand),
    /// Create a new bundle
    Create(cmd_create::CreateCommand),
    /// Remove bundles whose archive is gone but whose marker lingers
    Purge(cmd_purge::PurgeCommand),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Serve(cmd) => cmd_serve::run(cmd, cli.dir, cli.verbose),
        Commands::Ls(cmd) => cmd_ls::run(cmd, cli.dir),
        Commands::Create(cmd) => cmd_create::run(cmd, cli.dir),
        Commands::Purge(cmd) => cmd_purge::run(cmd, cli.dir),
    }
}
