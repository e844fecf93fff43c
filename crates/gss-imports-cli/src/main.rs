mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Cli;
use gss_imports_core::{run, FsSourceTree};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let Some(root_dir) = cli.root_dir.as_deref() else {
        bail!("Missing root directory path");
    };

    let config = cli.load_config().context("Failed to load config")?;
    log::debug!("namespace: {}, policy: {:?}", config.namespace, config.policy);

    let report = run(root_dir, &config, &FsSourceTree)
        .with_context(|| format!("Failed to rewrite imports under {}", root_dir.display()))?;

    if !report.is_success() {
        bail!(
            "{} of {} stylesheet(s) could not be rewritten",
            report.failed.len(),
            report.failed.len() + report.rewritten.len()
        );
    }
    log::info!("rewrote {} stylesheet(s)", report.rewritten.len());
    Ok(())
}
