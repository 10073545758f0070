use crate::domain::model::{MetadataKind, SourceKind, VersionString};
use crate::utils::error::Result;
use std::path::Path;

/// 版本來源：能產生版本字串，或回報 `SourceUnavailable`
pub trait VersionSource {
    fn kind(&self) -> SourceKind;
    fn version(&self) -> Result<VersionString>;
}

impl<T: VersionSource + ?Sized> VersionSource for Box<T> {
    fn kind(&self) -> SourceKind {
        (**self).kind()
    }

    fn version(&self) -> Result<VersionString> {
        (**self).version()
    }
}

/// Read-only view of environment variables.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

pub trait ResolverSettings {
    fn package_name(&self) -> &str;
    fn runtime_env_var(&self) -> &str;
    fn project_root(&self) -> Option<&Path>;
    /// Directory the default metadata locations hang off.
    fn metadata_base(&self) -> Option<&Path> {
        self.project_root()
    }
    fn tag_pattern(&self) -> &str;
    fn static_version(&self) -> Option<&str>;
    fn metadata_kind(&self) -> MetadataKind;
    fn metadata_dir(&self) -> Option<&Path>;
    fn version_file(&self) -> Option<&Path>;
    fn require_live(&self) -> bool;
}
