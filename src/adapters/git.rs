use crate::core::scheme::VersionScheme;
use crate::domain::model::{GitDescription, SourceKind, VersionString};
use crate::domain::ports::VersionSource;
use crate::utils::error::{Result, VersionError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Live version source: the project manifest's static version, or `git describe`.
#[derive(Debug, Clone)]
pub struct GitSource {
    root: Option<PathBuf>,
    scheme: VersionScheme,
    static_version: Option<String>,
    program: String,
}

impl GitSource {
    pub fn new(root: Option<PathBuf>, scheme: VersionScheme) -> Self {
        Self {
            root,
            scheme,
            static_version: None,
            program: "git".to_string(),
        }
    }

    /// Checked only when the live source is queried.
    pub fn with_static_version(mut self, version: Option<String>) -> Self {
        self.static_version = version;
        self
    }

    /// Overrides the git executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn describe(&self, root: &Path) -> Result<GitDescription> {
        tracing::debug!("Running {} describe in {}", self.program, root.display());

        let output = Command::new(&self.program)
            .args(["describe", "--tags", "--long", "--dirty", "--abbrev=7"])
            .current_dir(root)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => VersionError::unavailable(
                    SourceKind::Vcs,
                    format!("'{}' executable not found", self.program),
                ),
                _ => VersionError::unavailable(
                    SourceKind::Vcs,
                    format!("failed to run '{}': {}", self.program, e),
                ),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("git describe failed")
                .trim()
                .to_string();
            return Err(VersionError::unavailable(SourceKind::Vcs, reason));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        GitDescription::parse(&stdout).ok_or_else(|| {
            VersionError::unavailable(
                SourceKind::Vcs,
                format!("unexpected git describe output: '{}'", stdout.trim()),
            )
        })
    }
}

impl VersionSource for GitSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Vcs
    }

    fn version(&self) -> Result<VersionString> {
        if let Some(value) = &self.static_version {
            let version = VersionString::new(value.as_str()).map_err(|e| {
                VersionError::unavailable(
                    SourceKind::Vcs,
                    format!("invalid static version '{}' in the project manifest: {}", value, e),
                )
            })?;
            tracing::debug!("Using static version {} from the project manifest", version);
            return Ok(version);
        }

        let root = self.root.as_deref().ok_or_else(|| {
            VersionError::unavailable(SourceKind::Vcs, "project manifest not found")
        })?;

        let description = self.describe(root)?;
        tracing::debug!(?description, "git describe");
        self.scheme.format(&description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheme::DEFAULT_TAG_PATTERN;
    use tempfile::TempDir;

    fn scheme() -> VersionScheme {
        VersionScheme::new(DEFAULT_TAG_PATTERN).unwrap()
    }

    #[test]
    fn test_static_version_wins() {
        let source = GitSource::new(None, scheme())
            .with_static_version(Some("9.9.9".to_string()));
        assert_eq!(source.version().unwrap().as_str(), "9.9.9");
    }

    #[test]
    fn test_malformed_static_version_is_unavailable() {
        let source = GitSource::new(None, scheme()).with_static_version(Some("1.0 beta".to_string()));
        let err = source.version().unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("invalid static version '1.0 beta'"));
    }

    #[test]
    fn test_missing_root_is_unavailable() {
        let err = GitSource::new(None, scheme()).version().unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("project manifest not found"));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = GitSource::new(Some(dir.path().to_path_buf()), scheme())
            .with_program("git-binary-that-does-not-exist");
        let err = source.version().unwrap_err();
        assert!(matches!(
            err,
            VersionError::SourceUnavailable {
                kind: SourceKind::Vcs,
                ..
            }
        ));
        assert!(err.to_string().contains("executable not found"));
    }
}
