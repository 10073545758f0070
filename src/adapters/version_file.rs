use crate::domain::model::{SourceKind, VersionString};
use crate::domain::ports::VersionSource;
use crate::utils::error::{Result, VersionError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Version file written at build time, holding one version string.
#[derive(Debug, Clone)]
pub struct VersionFile {
    path: PathBuf,
}

impl VersionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, version: &VersionString) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{}\n", version))?;
        tracing::info!("📝 Wrote version {} to {}", version, self.path.display());
        Ok(())
    }
}

impl VersionSource for VersionFile {
    fn kind(&self) -> SourceKind {
        SourceKind::VersionFile
    }

    fn version(&self) -> Result<VersionString> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::NotFound => format!("{} does not exist", self.path.display()),
                _ => format!("cannot read {}: {}", self.path.display(), e),
            };
            VersionError::unavailable(SourceKind::VersionFile, reason)
        })?;

        let value = content.trim();
        if value.is_empty() {
            return Err(VersionError::unavailable(
                SourceKind::VersionFile,
                format!("{} is empty", self.path.display()),
            ));
        }

        VersionString::new(value).map_err(|_| {
            VersionError::unavailable(
                SourceKind::VersionFile,
                format!("{} does not hold a single version", self.path.display()),
            )
        })
    }
}
