use crate::adapters::env::flag_enabled;
use crate::adapters::{GitSource, MetadataStore};
use crate::core::scheme::VersionScheme;
use crate::domain::model::{ResolvedVersion, SourceKind, VersionString};
use crate::domain::ports::{Environment, ResolverSettings, VersionSource};
use crate::utils::error::{Result, VersionError};

pub const DEFAULT_RUNTIME_ENV_VAR: &str = "LIVE_VERSION_RUNTIME_VERSION";

/// Outcome of probing a single source, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub kind: SourceKind,
    pub outcome: std::result::Result<VersionString, String>,
}

/// Picks a version from the live source (only when the runtime toggle is set)
/// and then from installed metadata. First success wins.
pub struct VersionResolver<E: Environment> {
    package: String,
    env: E,
    runtime_env_var: String,
    live: Option<Box<dyn VersionSource>>,
    metadata: Option<Box<dyn VersionSource>>,
    require_live: bool,
}

impl<E: Environment> VersionResolver<E> {
    pub fn new(package: impl Into<String>, env: E) -> Self {
        Self {
            package: package.into(),
            env,
            runtime_env_var: DEFAULT_RUNTIME_ENV_VAR.to_string(),
            live: None,
            metadata: None,
            require_live: false,
        }
    }

    /// Wires the git live source and the configured metadata store.
    pub fn from_settings<S: ResolverSettings + ?Sized>(settings: &S, env: E) -> Result<Self> {
        let scheme = VersionScheme::new(settings.tag_pattern())?;
        let live = GitSource::new(settings.project_root().map(|p| p.to_path_buf()), scheme)
            .with_static_version(settings.static_version().map(str::to_string));
        let metadata = MetadataStore::for_settings(settings, &env);

        Ok(Self::new(settings.package_name(), env)
            .with_runtime_env_var(settings.runtime_env_var())
            .with_live_source(live)
            .with_metadata_source(metadata)
            .require_live(settings.require_live()))
    }

    pub fn with_runtime_env_var(mut self, name: impl Into<String>) -> Self {
        self.runtime_env_var = name.into();
        self
    }

    pub fn with_live_source(mut self, source: impl VersionSource + 'static) -> Self {
        self.live = Some(Box::new(source));
        self
    }

    pub fn with_metadata_source(mut self, source: impl VersionSource + 'static) -> Self {
        self.metadata = Some(Box::new(source));
        self
    }

    /// When set, a failing live source is an error instead of a fallback.
    pub fn require_live(mut self, require: bool) -> Self {
        self.require_live = require;
        self
    }

    pub fn runtime_env_var(&self) -> &str {
        &self.runtime_env_var
    }

    pub fn live_requested(&self) -> bool {
        flag_enabled(&self.env, &self.runtime_env_var)
    }

    pub fn resolve(&self) -> Result<ResolvedVersion> {
        let mut attempts = Vec::new();

        if self.live_requested() {
            tracing::debug!("{} is set, attempting live resolution", self.runtime_env_var);
            match self.resolve_live() {
                Ok(resolved) => return Ok(resolved),
                Err(e) if e.is_recoverable() && !self.require_live => {
                    tracing::warn!("⚠️ Live version unavailable, falling back to installed metadata: {}", e);
                    attempts.push(e.to_string());
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::debug!("{} not set, skipping live resolution", self.runtime_env_var);
        }

        match &self.metadata {
            Some(source) => match source.version() {
                Ok(version) => {
                    tracing::debug!("Resolved {} from {}", version, source.kind());
                    return Ok(ResolvedVersion {
                        version,
                        source: source.kind(),
                    });
                }
                Err(e) if e.is_recoverable() => attempts.push(e.to_string()),
                Err(e) => return Err(e),
            },
            None => attempts.push("installed metadata: no source configured".to_string()),
        }

        Err(VersionError::NoVersionDeterminable {
            package: self.package.clone(),
            attempts,
        })
    }

    /// Live source only, regardless of the runtime toggle.
    pub fn resolve_live(&self) -> Result<ResolvedVersion> {
        let source = self.live.as_ref().ok_or_else(|| {
            VersionError::unavailable(SourceKind::Vcs, "no live source configured")
        })?;
        let version = source.version()?;
        tracing::debug!("Resolved {} from {}", version, source.kind());
        Ok(ResolvedVersion {
            version,
            source: source.kind(),
        })
    }

    /// Queries every configured source, ignoring the runtime toggle.
    pub fn probe(&self) -> Vec<SourceReport> {
        self.live
            .iter()
            .chain(self.metadata.iter())
            .map(|source| SourceReport {
                kind: source.kind(),
                outcome: source.version().map_err(|e| e.to_string()),
            })
            .collect()
    }
}
