use crate::config::toml_config::MANIFEST_FILE;
use crate::config::ProjectConfig;
use crate::utils::error::{Result, VersionError};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "live-version")]
#[command(version, about = "Resolve a project's version from git tags or installed metadata")]
pub struct CliConfig {
    /// Path to live-version.toml (searched upward from --directory by default)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory to start the manifest search from
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub directory: PathBuf,

    /// Package name, overriding the manifest
    #[arg(short, long, global = true)]
    pub package: Option<String>,

    /// Fail instead of falling back when live resolution is enabled but unavailable
    #[arg(long, global = true)]
    pub require_live: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the resolved version (default)
    Show {
        /// Print the version and its source as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve the live version and store it as installed metadata
    Record,
    /// Probe every version source and report what each one yields
    Sources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Show { json: false })
    }

    /// Loads the manifest named by `--config`, or the nearest one above `--directory`.
    /// Without a manifest, `--package` alone is enough to read installed metadata,
    /// which then lives under `--directory`.
    pub fn project_config(&self) -> Result<ProjectConfig> {
        let (config, start) = match &self.config {
            Some(path) => (Some(ProjectConfig::load(path)?), None),
            None => {
                let start = std::fs::canonicalize(&self.directory)?;
                (ProjectConfig::discover(&start)?, Some(start))
            }
        };

        let config = match (config, &self.package) {
            (Some(config), Some(package)) => config.with_package(package.clone()),
            (Some(config), None) => config,
            (None, Some(package)) => {
                tracing::debug!("No manifest found, using package '{}' without a project root", package);
                let config = ProjectConfig::without_manifest(package.clone());
                match start {
                    Some(start) => config.with_base_dir(start),
                    None => config,
                }
            }
            (None, None) => {
                return Err(VersionError::MissingConfigError {
                    field: format!(
                        "package.name (no {} found; pass --package or --config)",
                        MANIFEST_FILE
                    ),
                })
            }
        };

        Ok(config.with_require_live(self.require_live))
    }
}
