use crate::utils::error::{Result, VersionError};
use regex::Regex;
use std::sync::LazyLock;

static PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9._-]*[A-Za-z0-9])?$").unwrap());
static ENV_VAR_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(VersionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(VersionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Letters, digits, `-`, `_` and `.`; must start and end with a letter or digit.
pub fn validate_package_name(field_name: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(VersionError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    if !PACKAGE_NAME.is_match(name) {
        return Err(VersionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Package names may only contain letters, digits, '-', '_' and '.'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_env_var_name(field_name: &str, name: &str) -> Result<()> {
    if !ENV_VAR_NAME.is_match(name) {
        return Err(VersionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Not a valid environment variable name".to_string(),
        });
    }
    Ok(())
}

pub fn validate_regex(field_name: &str, pattern: &str) -> Result<()> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| VersionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: pattern.to_string(),
            reason: format!("Invalid regular expression: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_package_name() {
        assert!(validate_package_name("package.name", "demo").is_ok());
        assert!(validate_package_name("package.name", "my_pkg-2.0").is_ok());
        assert!(matches!(
            validate_package_name("package.name", " "),
            Err(VersionError::MissingConfigError { .. })
        ));
        assert!(validate_package_name("package.name", "-leading").is_err());
        assert!(validate_package_name("package.name", "has space").is_err());
    }

    #[test]
    fn test_validate_env_var_name() {
        assert!(validate_env_var_name("runtime.env_var", "MYPROJECT_RUNTIME_VERSION").is_ok());
        assert!(validate_env_var_name("runtime.env_var", "_X1").is_ok());
        assert!(validate_env_var_name("runtime.env_var", "1X").is_err());
        assert!(validate_env_var_name("runtime.env_var", "A-B").is_err());
    }

    #[test]
    fn test_validate_regex_and_path() {
        assert!(validate_regex("version.tag_pattern", r"^v(?P<version>.+)$").is_ok());
        assert!(validate_regex("version.tag_pattern", "(").is_err());
        assert!(validate_path("metadata.dir", "").is_err());
        assert!(validate_path("metadata.dir", "a\0b").is_err());
        assert!(validate_path("metadata.dir", "var/installed").is_ok());
    }
}
