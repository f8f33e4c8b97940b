use crate::utils::error::{LaunchError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();

    if display.is_empty() {
        return Err(LaunchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(LaunchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 產物路徑必須位於專案根目錄之內
pub fn validate_relative_path(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, path)?;

    let escapes_root = path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));

    if escapes_root {
        return Err(LaunchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string_lossy().to_string(),
            reason: "Path must be relative to the project root".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LaunchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
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
        return Err(LaunchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("port", 8000u16, 1, 65535).is_ok());
        assert!(validate_range("port", 0u16, 1, 65535).is_err());
        assert!(validate_range("port", 65535u16, 1, 65535).is_ok());
    }

    #[test]
    fn test_validate_relative_path() {
        assert!(validate_relative_path("build.output_dir", Path::new("dist")).is_ok());
        assert!(validate_relative_path("build.output_dir", Path::new("")).is_err());
        assert!(validate_relative_path("build.output_dir", Path::new("../dist")).is_err());
        assert!(validate_relative_path("build.output_dir", Path::new("/tmp/dist")).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("toolchain.build.program", "npm").is_ok());
        assert!(validate_non_empty_string("toolchain.build.program", "  ").is_err());
    }
}
