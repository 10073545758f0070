use crate::domain::model::{GitDescription, SourceKind, VersionString};
use crate::utils::error::{Result, VersionError};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

pub const DEFAULT_TAG_PATTERN: &str = r"^v?(?P<version>.+)$";

/// Guess-next-dev versioning with a node-and-date local segment.
///
/// * exact tag, clean tree: `1.0.1`
/// * commits after the tag: `1.0.2.dev3+g1a2b3c4`
/// * uncommitted changes: `...+d20240131` (combined with the node when both apply)
#[derive(Debug, Clone)]
pub struct VersionScheme {
    tag_regex: Regex,
}

impl VersionScheme {
    pub fn new(tag_pattern: &str) -> Result<Self> {
        let tag_regex =
            Regex::new(tag_pattern).map_err(|e| VersionError::InvalidConfigValueError {
                field: "version.tag_pattern".to_string(),
                value: tag_pattern.to_string(),
                reason: format!("Invalid regular expression: {}", e),
            })?;
        Ok(Self { tag_regex })
    }

    /// Extracts the release part of a tag, or `None` if the tag is not a release tag.
    pub fn release_from_tag<'t>(&self, tag: &'t str) -> Option<&'t str> {
        let caps = self.tag_regex.captures(tag)?;
        let release = caps
            .name("version")
            .or_else(|| caps.get(0))
            .map(|m| m.as_str())?;
        if release.is_empty() {
            None
        } else {
            Some(release)
        }
    }

    pub fn format(&self, description: &GitDescription) -> Result<VersionString> {
        let today = build_date(std::env::var("SOURCE_DATE_EPOCH").ok().as_deref());
        self.format_on(description, today)
    }

    pub fn format_on(&self, description: &GitDescription, today: NaiveDate) -> Result<VersionString> {
        let release = self.release_from_tag(&description.tag).ok_or_else(|| {
            VersionError::unavailable(
                SourceKind::Vcs,
                format!(
                    "tag '{}' does not match the pattern '{}'",
                    description.tag,
                    self.tag_regex.as_str()
                ),
            )
        })?;

        if description.is_exact() {
            return VersionString::new(release);
        }

        let mut version = format!("{}.dev{}", bump_last(release), description.distance);

        let mut local = Vec::new();
        if description.distance > 0 {
            local.push(format!("g{}", description.node));
        }
        if description.dirty {
            local.push(format!("d{}", today.format("%Y%m%d")));
        }
        if !local.is_empty() {
            version.push('+');
            version.push_str(&local.join("."));
        }

        VersionString::new(version)
    }
}

/// UTC date for the dirty suffix; `SOURCE_DATE_EPOCH` pins it for reproducible builds.
fn build_date(source_date_epoch: Option<&str>) -> NaiveDate {
    source_date_epoch
        .and_then(|epoch| epoch.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
        .date_naive()
}

/// `1.0.1` -> `1.0.2`. Non-numeric or overflowing trailing components are left alone.
fn bump_last(release: &str) -> String {
    let (head, last) = match release.rsplit_once('.') {
        Some((head, last)) => (Some(head), last),
        None => (None, release),
    };
    match last.parse::<u64>().ok().and_then(|n| n.checked_add(1)) {
        Some(next) => match head {
            Some(head) => format!("{}.{}", head, next),
            None => next.to_string(),
        },
        None => release.to_string(),
    }
}
