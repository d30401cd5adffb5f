// Create command - create a new bundle
use anyhow::Result;
use clap::{Args, ValueHint};
use std::path::PathBuf;
use std::sync::Arc;

use supportbundle::{BundleConfig, BundleManager, HttpNotifier};

#[derive(Args)]
#[command(about = "Create a new bundle")]
pub struct CreateCommand {
    /// Installation identifier embedded in the bundle config
    #[arg(long, default_value = "")]
    pub install_uuid: String,

    /// Base URL embedded in the bundle config
    #[arg(long, default_value = "", value_hint = ValueHint::Url)]
    pub base_url: String,

    /// Instance identifier embedded in the bundle config
    #[arg(long, default_value = "")]
    pub instance_uuid: String,

    /// Endpoint to notify once the bundle is created
    #[arg(long, value_hint = ValueHint::Url)]
    pub notify: Option<String>,

    /// Skip the upload notification
    #[arg(long)]
    pub no_process: bool,
}

pub fn run(cmd: CreateCommand, dir: PathBuf) -> Result<()> {
    let mut manager = BundleManager::new(dir)?;
    if let Some(url) = &cmd.notify {
        manager = manager.with_notifier(Arc::new(HttpNotifier::new(url.clone())?));
    }

    let config = BundleConfig {
        bundle_uuid: None,
        install_uuid: cmd.install_uuid,
        base_url: cmd.base_url,
        instance_uuid: cmd.instance_uuid,
    };

    let created = manager.create_bundle(config, !cmd.no_process)?;
    // bundle_uuid is always assigned by create_bundle
    println!("{}", created.bundle_uuid.unwrap_or_default());
    Ok(())
}
