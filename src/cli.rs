use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::{Config, UnitErrorPolicy};
use crate::discovery::profiles_named;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "srcscan")]
#[command(about = "Find source units (packages, modules, projects) in directory trees", long_about = None)]
pub struct Args {
    /// Directories to scan
    #[arg(value_name = "DIR", default_value = ".")]
    pub dirs: Vec<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (JSON or YAML)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report unit paths relative to this directory (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// Directory name to skip. Can be specified multiple times; replaces the defaults.
    #[arg(long = "skip-dir", value_name = "NAME")]
    pub skip_dirs: Vec<String>,

    /// Only scan with this profile (e.g. "Go package"). Can be specified multiple times.
    #[arg(long = "profile", value_name = "NAME")]
    pub profiles: Vec<String>,

    /// Omit machine-specific Go root fields
    #[arg(long)]
    pub path_independent: bool,

    /// Skip units that fail to build instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        for dir in &self.dirs {
            validate_dir(dir)?;
        }
        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                anyhow::bail!("Config file does not exist: {}", config_path.display());
            }
        }
        Ok(())
    }

    /// The config file, if any, with command-line flags applied on top.
    pub fn build_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Cannot load config: {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(base) = &self.base {
            config.base = Some(base.clone());
        }
        if !self.skip_dirs.is_empty() {
            config.skip_dirs = self.skip_dirs.clone();
        }
        if !self.profiles.is_empty() {
            config.profiles = Some(profiles_named(&self.profiles)?);
        }
        if self.path_independent {
            config.path_independent = true;
        }
        if self.keep_going {
            config.unit_errors = UnitErrorPolicy::Skip;
        }

        Ok(config)
    }
}

pub fn validate_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }
    if !path.is_dir() {
        anyhow::bail!("Not a directory: {}", path.display());
    }
    std::fs::read_dir(path).with_context(|| format!("Cannot read directory: {}", path.display()))?;
    Ok(())
}
