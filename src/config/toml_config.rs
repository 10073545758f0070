use crate::core::resolver::DEFAULT_RUNTIME_ENV_VAR;
use crate::core::scheme::DEFAULT_TAG_PATTERN;
use crate::domain::model::{MetadataKind, VersionString};
use crate::utils::error::{Result, VersionError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const MANIFEST_FILE: &str = "live-version.toml";

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// `live-version.toml`: marks the project root and configures resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub package: PackageConfig,
    #[serde(default)]
    pub version: VersionConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionConfig {
    /// 靜態版本；設定時優先於 git 計算
    pub value: Option<String>,
    pub tag_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub env_var: Option<String>,
    pub require_live: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub kind: Option<MetadataKind>,
    pub dir: Option<PathBuf>,
    pub file: Option<PathBuf>,
}

impl ProjectManifest {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VersionError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| VersionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PACKAGE_NAME})
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// Walks upward from `start` until a directory holding `live-version.toml` is found.
    pub fn locate(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(MANIFEST_FILE))
            .find(|candidate| candidate.is_file())
    }

    pub fn runtime_env_var(&self) -> &str {
        self.runtime
            .env_var
            .as_deref()
            .unwrap_or(DEFAULT_RUNTIME_ENV_VAR)
    }

    pub fn tag_pattern(&self) -> &str {
        self.version
            .tag_pattern
            .as_deref()
            .unwrap_or(DEFAULT_TAG_PATTERN)
    }

    pub fn metadata_kind(&self) -> MetadataKind {
        self.metadata.kind.unwrap_or_default()
    }
}

impl Validate for ProjectManifest {
    fn validate(&self) -> Result<()> {
        validation::validate_package_name("package.name", &self.package.name)?;
        validation::validate_env_var_name("runtime.env_var", self.runtime_env_var())?;
        validation::validate_regex("version.tag_pattern", self.tag_pattern())?;

        if let Some(value) = &self.version.value {
            VersionString::new(value.as_str()).map_err(|e| match e {
                VersionError::InvalidConfigValueError { reason, .. } => {
                    VersionError::InvalidConfigValueError {
                        field: "version.value".to_string(),
                        value: value.clone(),
                        reason,
                    }
                }
                other => other,
            })?;
        }
        if let Some(dir) = &self.metadata.dir {
            validation::validate_path("metadata.dir", &dir.to_string_lossy())?;
        }
        if let Some(file) = &self.metadata.file {
            validation::validate_path("metadata.file", &file.to_string_lossy())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = ProjectManifest::from_toml_str(
            r#"
[package]
name = "demo"
"#,
        )
        .unwrap();

        assert_eq!(manifest.package.name, "demo");
        assert_eq!(manifest.runtime_env_var(), DEFAULT_RUNTIME_ENV_VAR);
        assert_eq!(manifest.tag_pattern(), DEFAULT_TAG_PATTERN);
        assert_eq!(manifest.metadata_kind(), MetadataKind::Record);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_parse_full_manifest() {
        let manifest = ProjectManifest::from_toml_str(
            r#"
[package]
name = "demo"
description = "Demo project"

[version]
tag_pattern = '^release-(?P<version>.+)$'

[runtime]
env_var = "DEMO_RUNTIME_VERSION"
require_live = true

[metadata]
kind = "version-file"
file = "src/_version.txt"
"#,
        )
        .unwrap();

        assert_eq!(manifest.runtime_env_var(), "DEMO_RUNTIME_VERSION");
        assert_eq!(manifest.runtime.require_live, Some(true));
        assert_eq!(manifest.metadata_kind(), MetadataKind::VersionFile);
        assert_eq!(manifest.metadata.file, Some(PathBuf::from("src/_version.txt")));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LIVE_VERSION_TEST_PACKAGE", "substituted");

        let manifest = ProjectManifest::from_toml_str(
            r#"
[package]
name = "${LIVE_VERSION_TEST_PACKAGE}"
"#,
        )
        .unwrap();
        assert_eq!(manifest.package.name, "substituted");

        std::env::remove_var("LIVE_VERSION_TEST_PACKAGE");
    }

    #[test]
    fn test_manifest_validation() {
        let manifest = ProjectManifest::from_toml_str(
            r#"
[package]
name = "demo"

[runtime]
env_var = "NOT A VAR"
"#,
        )
        .unwrap();
        assert!(manifest.validate().is_err());

        let unnamed = ProjectManifest::from_toml_str("[package]\nname = \"\"\n").unwrap();
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_static_version_with_whitespace_is_rejected() {
        let manifest = ProjectManifest::from_toml_str(
            r#"
[package]
name = "demo"

[version]
value = "1.0 beta"
"#,
        )
        .unwrap();

        match manifest.validate() {
            Err(VersionError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "version.value");
                assert_eq!(value, "1.0 beta");
            }
            other => panic!("unexpected validation result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_package_table_is_parse_error() {
        let err = ProjectManifest::from_toml_str("[runtime]\n").unwrap_err();
        assert!(matches!(err, VersionError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_manifest_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[package]\nname = \"file-test\"\n").unwrap();

        let manifest = ProjectManifest::from_file(temp_file.path()).unwrap();
        assert_eq!(manifest.package.name, "file-test");
    }

    #[test]
    fn test_locate_walks_upward() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "[package]\nname = \"demo\"\n").unwrap();
        let nested = dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let found = ProjectManifest::locate(&nested).unwrap();
        assert_eq!(found, dir.path().join(MANIFEST_FILE));
    }
}
