use crate::utils::error::{ForecastError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> ForecastError {
    ForecastError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(field_name, url_str, format!("Invalid URL format: {}", e))),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

/// Store paths are `/`-separated keys; Realtime Database forbids `.`, `#`, `$`, `[` and `]`.
pub fn validate_store_path(field_name: &str, path: &str) -> Result<()> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(invalid(field_name, path, "Store path cannot be empty"));
    }
    if let Some(c) = trimmed.chars().find(|c| matches!(c, '.' | '#' | '$' | '[' | ']')) {
        return Err(invalid(
            field_name,
            path,
            format!("Store path cannot contain '{}'", c),
        ));
    }
    if trimmed.split('/').any(str::is_empty) {
        return Err(invalid(field_name, path, "Store path has an empty segment"));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("database.url", "https://example.firebaseio.com").is_ok());
        assert!(validate_url("database.url", "http://127.0.0.1:9000").is_ok());
        assert!(validate_url("database.url", "").is_err());
        assert!(validate_url("database.url", "invalid-url").is_err());
        assert!(validate_url("database.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_store_path() {
        assert!(validate_store_path("station.source_path", "aws_02").is_ok());
        assert!(validate_store_path("station.source_path", "/stations/aws_02/").is_ok());
        assert!(validate_store_path("station.source_path", "").is_err());
        assert!(validate_store_path("station.source_path", "aws.02").is_err());
        assert!(validate_store_path("station.source_path", "a//b").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("schedule.utc_offset_hours", 7, -12, 14).is_ok());
        assert!(validate_range("schedule.utc_offset_hours", 15, -12, 14).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("database.timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("database.timeout_seconds", 0, 1).is_err());
    }
}
