use crate::utils::error::{Result, VersionError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized, tag-derived version such as `1.2.3` or `1.2.4.dev3+gabc1234`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionString(String);

impl VersionString {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(VersionError::InvalidConfigValueError {
                field: "version".to_string(),
                value,
                reason: "Version cannot be empty".to_string(),
            });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(VersionError::InvalidConfigValueError {
                field: "version".to_string(),
                value,
                reason: "Version cannot contain whitespace".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VersionString {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<VersionString> for String {
    fn from(value: VersionString) -> Self {
        value.0
    }
}

impl AsRef<str> for VersionString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a version value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Vcs,
    InstalledRecord,
    VersionFile,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SourceKind::Vcs => "vcs",
            SourceKind::InstalledRecord => "installed record",
            SourceKind::VersionFile => "version file",
        };
        f.write_str(label)
    }
}

/// Which store plays the role of "installed metadata" for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataKind {
    #[default]
    Record,
    VersionFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVersion {
    pub version: VersionString,
    pub source: SourceKind,
}

/// 安裝時寫入的中繼資料紀錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRecord {
    pub name: String,
    pub version: VersionString,
    pub source: SourceKind,
    pub recorded_at: DateTime<Utc>,
}

impl InstallRecord {
    pub fn new(name: impl Into<String>, resolved: ResolvedVersion) -> Self {
        Self {
            name: name.into(),
            version: resolved.version,
            source: resolved.source,
            recorded_at: Utc::now(),
        }
    }
}

/// Parsed output of `git describe --tags --long --dirty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitDescription {
    pub tag: String,
    pub distance: u32,
    pub node: String,
    pub dirty: bool,
}

impl GitDescription {
    /// Parses `<tag>-<distance>-g<node>[-dirty]`. Tags may themselves contain `-`.
    pub fn parse(output: &str) -> Option<Self> {
        let trimmed = output.trim();
        let (rest, dirty) = match trimmed.strip_suffix("-dirty") {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };

        let (rest, node) = rest.rsplit_once('-')?;
        let node = node.strip_prefix('g')?;
        if node.is_empty() || !node.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let (tag, distance) = rest.rsplit_once('-')?;
        let distance = distance.parse().ok()?;
        if tag.is_empty() {
            return None;
        }

        Some(Self {
            tag: tag.to_string(),
            distance,
            node: node.to_string(),
            dirty,
        })
    }

    pub fn is_exact(&self) -> bool {
        self.distance == 0 && !self.dirty
    }
}
