use clap::Parser;
use gss_imports_core::error::ConfigError;
use gss_imports_core::{Config, FailurePolicy};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gss-imports")]
#[command(about = "Rewrite package-style SCSS @import paths into file-relative paths")]
pub struct Cli {
    /// Root directory holding one sub-directory per package
    #[arg(value_name = "ROOT_DIR")]
    pub root_dir: Option<PathBuf>,

    /// Import prefix that marks an internal package (default: @material)
    #[arg(long, value_name = "NAME")]
    pub namespace: Option<String>,

    /// Keep rewriting the remaining files after one fails
    #[arg(long)]
    pub keep_going: bool,

    /// JSON config file; flags given on the command line win
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
        if self.keep_going {
            config.policy = FailurePolicy::KeepGoing;
        }
        Ok(config)
    }
}
