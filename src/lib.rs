pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod version;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{GitSource, MapEnv, MetadataStore, ProcessEnv, RecordStore, VersionFile};
pub use config::ProjectConfig;
pub use crate::core::{resolver::VersionResolver, scheme::VersionScheme};
pub use domain::model::{ResolvedVersion, SourceKind, VersionString};
pub use utils::error::{Result, VersionError};
