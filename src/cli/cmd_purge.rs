// Purge command - reap orphaned markers
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use supportbundle::BundleManager;

#[derive(Args)]
#[command(
    about = "Remove orphaned bundle markers",
    long_about = "Remove bundles classified for purge: a done marker is present but the
archive was removed out-of-band. Runs synchronously, unlike the server's
DELETE endpoint which queues removal in the background."
)]
pub struct PurgeCommand {
    /// Show what would be removed without removing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(cmd: PurgeCommand, dir: PathBuf) -> Result<()> {
    let manager = BundleManager::new(dir)?;
    let targets = manager.purge_targets()?;

    if targets.is_empty() {
        println!("Nothing to purge");
        return Ok(());
    }

    for uuid in &targets {
        if cmd.dry_run {
            println!("would remove {}", uuid);
        } else {
            manager.remove_bundle(uuid)?;
            println!("removed {}", uuid);
        }
    }
    Ok(())
}
