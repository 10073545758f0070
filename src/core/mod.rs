pub mod resolver;
pub mod scheme;

pub use crate::domain::model::{ResolvedVersion, SourceKind, VersionString};
pub use crate::domain::ports::{Environment, ResolverSettings, VersionSource};
pub use crate::utils::error::Result;
pub use resolver::{SourceReport, VersionResolver};
