// Ls command - list bundles and their states
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use supportbundle::BundleManager;

#[derive(Args)]
#[command(about = "List bundles (machine-readable)")]
pub struct LsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(cmd: LsCommand, dir: PathBuf) -> Result<()> {
    let manager = BundleManager::new(dir)?;
    let mut statuses = manager.list_bundles()?;
    statuses.sort_by(|a, b| a.uuid.cmp(&b.uuid));

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for status in statuses {
        let state = if status.processed {
            "processed"
        } else {
            "pending"
        };
        println!("{}\t{}", status.uuid, state);
    }
    Ok(())
}
