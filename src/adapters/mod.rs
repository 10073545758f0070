// Adapters layer: concrete version sources and environment access.

pub mod env;
pub mod git;
pub mod record;
pub mod version_file;

pub use env::{MapEnv, ProcessEnv};
pub use git::GitSource;
pub use record::RecordStore;
pub use version_file::VersionFile;

use crate::domain::model::{InstallRecord, MetadataKind, ResolvedVersion, SourceKind, VersionString};
use crate::domain::ports::{Environment, ResolverSettings, VersionSource};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub const METADATA_DIR_ENV: &str = "LIVE_VERSION_METADATA_DIR";
pub const DEFAULT_RECORD_DIR: &str = ".live-version/installed";
pub const DEFAULT_VERSION_FILE: &str = "_version.txt";

/// The store that acts as "installed metadata" for a project.
#[derive(Debug, Clone)]
pub enum MetadataStore {
    Record(RecordStore),
    File(VersionFile),
}

impl MetadataStore {
    /// Record directory: explicit setting, then `LIVE_VERSION_METADATA_DIR`, then
    /// `.live-version/installed` under the metadata base (project root, else cwd).
    pub fn for_settings<S: ResolverSettings + ?Sized>(settings: &S, env: &dyn Environment) -> Self {
        let base = settings.metadata_base().unwrap_or_else(|| Path::new("."));
        match settings.metadata_kind() {
            MetadataKind::Record => {
                let dir = settings
                    .metadata_dir()
                    .map(Path::to_path_buf)
                    .or_else(|| {
                        env.var(METADATA_DIR_ENV)
                            .filter(|v| !v.trim().is_empty())
                            .map(PathBuf::from)
                    })
                    .unwrap_or_else(|| base.join(DEFAULT_RECORD_DIR));
                MetadataStore::Record(RecordStore::new(dir, settings.package_name()))
            }
            MetadataKind::VersionFile => {
                let path = settings
                    .version_file()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| base.join(DEFAULT_VERSION_FILE));
                MetadataStore::File(VersionFile::new(path))
            }
        }
    }

    pub fn location(&self) -> PathBuf {
        match self {
            MetadataStore::Record(store) => store.record_path(),
            MetadataStore::File(file) => file.path().to_path_buf(),
        }
    }

    /// Simulates the install step: persists the given version.
    pub fn write(&self, package: &str, resolved: &ResolvedVersion) -> Result<PathBuf> {
        match self {
            MetadataStore::Record(store) => {
                store.write(&InstallRecord::new(package, resolved.clone()))
            }
            MetadataStore::File(file) => {
                file.write(&resolved.version)?;
                Ok(file.path().to_path_buf())
            }
        }
    }
}

impl VersionSource for MetadataStore {
    fn kind(&self) -> SourceKind {
        match self {
            MetadataStore::Record(store) => store.kind(),
            MetadataStore::File(file) => file.kind(),
        }
    }

    fn version(&self) -> Result<VersionString> {
        match self {
            MetadataStore::Record(store) => store.version(),
            MetadataStore::File(file) => file.version(),
        }
    }
}
