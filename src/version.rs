//! Process-wide version, resolved at most once.
//!
//! Nothing else in the crate imports this module, so it can be pulled in from
//! anywhere (including the crate root) without creating an initialisation cycle.

use crate::adapters::ProcessEnv;
use crate::config::ProjectConfig;
use crate::core::VersionResolver;
use crate::domain::model::ResolvedVersion;
use crate::utils::error::{Result, VersionError};
use std::sync::OnceLock;

/// Version of this tool itself, fixed at build time.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

static RESOLVED: OnceLock<Result<ResolvedVersion>> = OnceLock::new();

/// Runs `resolve` on the first call only; later calls return the cached outcome.
pub fn resolve_once<F>(resolve: F) -> std::result::Result<&'static ResolvedVersion, &'static VersionError>
where
    F: FnOnce() -> Result<ResolvedVersion>,
{
    RESOLVED.get_or_init(resolve).as_ref()
}

/// Resolves the project around the current directory against the process environment.
pub fn current() -> std::result::Result<&'static ResolvedVersion, &'static VersionError> {
    resolve_once(|| {
        let cwd = std::env::current_dir()?;
        let config = ProjectConfig::discover(&cwd)?.ok_or_else(|| VersionError::MissingConfigError {
            field: "package.name".to_string(),
        })?;
        VersionResolver::from_settings(&config, ProcessEnv)?.resolve()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SourceKind, VersionString};

    #[test]
    fn test_resolve_once_caches_first_outcome() {
        let first = resolve_once(|| {
            Ok(ResolvedVersion {
                version: VersionString::new("1.0.0")?,
                source: SourceKind::InstalledRecord,
            })
        })
        .unwrap();
        assert_eq!(first.version.as_str(), "1.0.0");

        let second = resolve_once(|| panic!("resolution must not run twice")).unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(current().unwrap(), first));
    }
}
