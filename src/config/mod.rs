#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::MetadataKind;
use crate::domain::ports::ResolverSettings;
use crate::utils::error::{Result, VersionError};
use crate::utils::validation::Validate;
use std::path::{Path, PathBuf};
use toml_config::ProjectManifest;

/// Manifest plus everything resolved against the project root.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    root: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    manifest: ProjectManifest,
    metadata_dir: Option<PathBuf>,
    version_file: Option<PathBuf>,
    require_live: bool,
}

impl ProjectConfig {
    /// Loads a manifest; its directory becomes the project root.
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let manifest = ProjectManifest::from_file(manifest_path)?;
        let root = manifest_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        tracing::debug!("Loaded {} (root {})", manifest_path.display(), root.display());
        Ok(Self::from_manifest(Some(root), manifest))
    }

    /// Searches upward from `start`; `Ok(None)` when no manifest exists.
    pub fn discover(start: &Path) -> Result<Option<Self>> {
        match ProjectManifest::locate(start) {
            Some(path) => Self::load(&path).map(Some),
            None => {
                tracing::debug!("No {} above {}", toml_config::MANIFEST_FILE, start.display());
                Ok(None)
            }
        }
    }

    /// A project known only by name: no root, so no live source.
    pub fn without_manifest(package: impl Into<String>) -> Self {
        let mut manifest = ProjectManifest::default();
        manifest.package.name = package.into();
        Self::from_manifest(None, manifest)
    }

    pub fn from_manifest(root: Option<PathBuf>, manifest: ProjectManifest) -> Self {
        let anchor = |p: &PathBuf| match &root {
            Some(root) if p.is_relative() => root.join(p),
            _ => p.clone(),
        };
        let metadata_dir = manifest.metadata.dir.as_ref().map(anchor);
        let version_file = manifest.metadata.file.as_ref().map(anchor);
        let require_live = manifest.runtime.require_live.unwrap_or(false);

        Self {
            root,
            base_dir: None,
            manifest,
            metadata_dir,
            version_file,
            require_live,
        }
    }

    /// Where default metadata paths live when there is no project root.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_package(mut self, name: impl Into<String>) -> Self {
        self.manifest.package.name = name.into();
        self
    }

    pub fn with_require_live(mut self, require: bool) -> Self {
        self.require_live = self.require_live || require;
        self
    }

    pub fn manifest(&self) -> &ProjectManifest {
        &self.manifest
    }
}

impl ResolverSettings for ProjectConfig {
    fn package_name(&self) -> &str {
        &self.manifest.package.name
    }

    fn runtime_env_var(&self) -> &str {
        self.manifest.runtime_env_var()
    }

    fn project_root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn metadata_base(&self) -> Option<&Path> {
        self.root.as_deref().or(self.base_dir.as_deref())
    }

    fn tag_pattern(&self) -> &str {
        self.manifest.tag_pattern()
    }

    fn static_version(&self) -> Option<&str> {
        self.manifest.version.value.as_deref()
    }

    fn metadata_kind(&self) -> MetadataKind {
        self.manifest.metadata_kind()
    }

    fn metadata_dir(&self) -> Option<&Path> {
        self.metadata_dir.as_deref()
    }

    fn version_file(&self) -> Option<&Path> {
        self.version_file.as_deref()
    }

    fn require_live(&self) -> bool {
        self.require_live
    }
}

impl Validate for ProjectConfig {
    fn validate(&self) -> Result<()> {
        self.manifest.validate()?;
        if let Some(root) = &self.root {
            if !root.is_dir() {
                return Err(VersionError::InvalidConfigValueError {
                    field: "project_root".to_string(),
                    value: root.display().to_string(),
                    reason: "Project root is not a directory".to_string(),
                });
            }
        }
        Ok(())
    }
}
