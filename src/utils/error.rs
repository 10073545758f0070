use crate::domain::model::SourceKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("{kind} source unavailable: {reason}")]
    SourceUnavailable { kind: SourceKind, reason: String },

    #[error("package '{package}' not found: it is not installed and no live version could be determined ({})", .attempts.join("; "))]
    NoVersionDeterminable {
        package: String,
        attempts: Vec<String>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Resolution,
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VersionError {
    pub fn unavailable(kind: SourceKind, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            kind,
            reason: reason.into(),
        }
    }

    /// 是否可由下一個來源接手
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceUnavailable { .. } => ErrorCategory::Source,
            Self::NoVersionDeterminable { .. } => ErrorCategory::Resolution,
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SourceUnavailable { .. } => ErrorSeverity::Medium,
            Self::NoVersionDeterminable { .. } => ErrorSeverity::High,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::SourceUnavailable { kind, .. } => match kind {
                SourceKind::Vcs => {
                    "Check that git is installed and the project has at least one release tag"
                        .to_string()
                }
                SourceKind::InstalledRecord => {
                    "Install the project first, e.g. `live-version record`".to_string()
                }
                SourceKind::VersionFile => {
                    "Regenerate the version file with `live-version record`".to_string()
                }
            },
            Self::NoVersionDeterminable { .. } => {
                "Run `live-version record` to install the project, or set the runtime version variable inside a tagged git checkout"
                    .to_string()
            }
            Self::IoError(_) => "Check file permissions and that the paths exist".to_string(),
            Self::SerializationError(_) => {
                "The installed record is corrupt; re-record it with `live-version record`"
                    .to_string()
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Fix the project manifest (live-version.toml) and try again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NoVersionDeterminable { package, .. } => {
                format!("Package not found: no version could be determined for '{}'", package)
            }
            Self::SourceUnavailable { kind, reason } => {
                format!("Could not read the version from {}: {}", kind, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VersionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_source_errors_are_recoverable() {
        assert!(VersionError::unavailable(SourceKind::Vcs, "git not found").is_recoverable());
        let terminal = VersionError::NoVersionDeterminable {
            package: "demo".to_string(),
            attempts: vec![],
        };
        assert!(!terminal.is_recoverable());
        assert_eq!(terminal.category(), ErrorCategory::Resolution);
        assert_eq!(terminal.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_no_version_message_mentions_package() {
        let err = VersionError::NoVersionDeterminable {
            package: "demo".to_string(),
            attempts: vec!["installed record: no record for 'demo'".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("package 'demo' not found"));
        assert!(message.contains("no record for 'demo'"));
        assert!(err.user_friendly_message().contains("Package not found"));
    }
}
