use crate::domain::model::{InstallRecord, SourceKind, VersionString};
use crate::domain::ports::VersionSource;
use crate::utils::error::{Result, VersionError};
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Installed metadata store: one JSON record per package under a directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
    package: String,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            package: package.into(),
        }
    }

    pub fn record_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.json", normalize_package_name(&self.package)))
    }

    pub fn read(&self) -> Result<InstallRecord> {
        let path = self.record_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(VersionError::unavailable(
                    SourceKind::InstalledRecord,
                    format!("no installed record for '{}'", self.package),
                ));
            }
            Err(e) => {
                return Err(VersionError::unavailable(
                    SourceKind::InstalledRecord,
                    format!("cannot read {}: {}", path.display(), e),
                ));
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            tracing::warn!("⚠️ Ignoring corrupt install record {}: {}", path.display(), e);
            VersionError::unavailable(
                SourceKind::InstalledRecord,
                format!("corrupt record {}: {}", path.display(), e),
            )
        })
    }

    pub fn write(&self, record: &InstallRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.record_path();
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        tracing::info!("📝 Recorded {} {} at {}", record.name, record.version, path.display());
        Ok(path)
    }
}

impl VersionSource for RecordStore {
    fn kind(&self) -> SourceKind {
        SourceKind::InstalledRecord
    }

    fn version(&self) -> Result<VersionString> {
        let record = self.read()?;
        if normalize_package_name(&record.name) != normalize_package_name(&self.package) {
            tracing::warn!(
                "Install record names '{}' but was looked up for '{}'",
                record.name,
                self.package
            );
        }
        Ok(record.version)
    }
}

static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

/// Lowercase, with runs of `-`, `_` and `.` collapsed into a single `-`.
pub fn normalize_package_name(name: &str) -> String {
    SEPARATOR_RUNS.replace_all(name.trim(), "-").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ResolvedVersion;
    use tempfile::TempDir;

    fn record(name: &str, version: &str) -> InstallRecord {
        InstallRecord::new(
            name,
            ResolvedVersion {
                version: VersionString::new(version).unwrap(),
                source: SourceKind::Vcs,
            },
        )
    }

    #[test]
    fn test_normalize_package_name() {
        assert_eq!(normalize_package_name("My_Package.Name"), "my-package-name");
        assert_eq!(normalize_package_name("a--b__c"), "a-b-c");
    }

    #[test]
    fn test_missing_record_is_package_not_found() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path(), "demo");
        let err = store.version().unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("no installed record for 'demo'"));
    }

    #[test]
    fn test_write_then_read_by_normalized_name() {
        let dir = TempDir::new().unwrap();
        let writer = RecordStore::new(dir.path().join("installed"), "Demo_Pkg");
        let path = writer.write(&record("Demo_Pkg", "1.0.0")).unwrap();
        assert!(path.ends_with("demo-pkg.json"));

        let reader = RecordStore::new(dir.path().join("installed"), "demo-pkg");
        assert_eq!(reader.version().unwrap().as_str(), "1.0.0");
    }

    #[test]
    fn test_corrupt_record_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path(), "demo");
        fs::write(store.record_path(), "{ not json").unwrap();
        let err = store.version().unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("corrupt record"));
    }
}
