use crate::utils::error::{ImportError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> ImportError {
    ImportError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 只接受 http/https
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

/// 上傳檔案只接受特定副檔名 (大小寫不拘)
pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let extension = std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| invalid(field_name, file, "File has no extension or invalid filename"))?;

    if allowed_extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    {
        return Ok(());
    }

    Err(invalid(
        field_name,
        file,
        format!(
            "Unsupported file extension: {}. Allowed extensions: {}",
            extension,
            allowed_extensions.join(", ")
        ),
    ))
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ImportError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("store.endpoint", "https://db.example.com").is_ok());
        assert!(validate_url("store.endpoint", "http://localhost:54321").is_ok());
        assert!(validate_url("store.endpoint", "").is_err());
        assert!(validate_url("store.endpoint", "invalid-url").is_err());
        assert!(validate_url("store.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("file", "members.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("file", "MEMBERS.CSV", &["csv"]).is_ok());
        assert!(validate_file_extension("file", "members.xlsx", &["csv"]).is_err());
        assert!(validate_file_extension("file", "members", &["csv"]).is_err());
    }

    #[test]
    fn test_validate_required_and_range() {
        let missing: Option<String> = None;
        assert!(validate_required_field("store.api_key", &missing).is_err());
        assert!(validate_non_empty_string("store.table", "  ").is_err());
        assert!(validate_range("store.timeout_seconds", 30, 1, 300).is_ok());
        assert!(validate_range("store.timeout_seconds", 0, 1, 300).is_err());
    }
}
