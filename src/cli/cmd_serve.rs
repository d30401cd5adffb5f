// Serve command - start HTTP server
use anyhow::Result;
use clap::{Args, ValueHint};
use std::path::PathBuf;

use supportbundle::constants;

#[derive(Args)]
#[command(
    about = "Start HTTP server",
    long_about = "Start an HTTP server exposing the bundle lifecycle API: fetch an archive
(optionally marking it done), list bundles with their processed flag, create
new bundles, and schedule background removal of single bundles or of every
orphaned marker.

Deletions are fire-and-forget: the DELETE endpoints return as soon as the
removal job is queued, and a background worker deletes the files."
)]
pub struct ServeCommand {
    /// HTTP server port
    #[arg(long, default_value_t = constants::DEFAULT_PORT)]
    pub port: u16,

    /// HTTP server host
    #[arg(long, default_value = constants::DEFAULT_HOST)]
    pub host: String,

    /// Endpoint to notify after each bundle creation
    #[arg(long, value_hint = ValueHint::Url)]
    pub notify: Option<String>,
}

pub fn run(cmd: ServeCommand, dir: PathBuf, global_verbose: bool) -> Result<()> {
    #[cfg(not(feature = "server"))]
    {
        let _ = (cmd, dir, global_verbose);
        anyhow::bail!("Server feature is not enabled. Rebuild with --features server");
    }

    #[cfg(feature = "server")]
    {
        run_server(cmd, dir, global_verbose)
    }
}

#[cfg(feature = "server")]
fn run_server(cmd: ServeCommand, dir: PathBuf, global_verbose: bool) -> Result<()> {
    use anyhow::Context;
    use supportbundle::server::{StartupConfig, start_server};
    use tokio::runtime::Runtime;

    let rt = Runtime::new().context("Failed to create tokio runtime")?;

    let startup_config = StartupConfig {
        dir,
        host: cmd.host,
        port: cmd.port,
        notify_url: cmd.notify,
        verbose: global_verbose,
    };

    rt.block_on(start_server(startup_config))
}
