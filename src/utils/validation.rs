use crate::domain::model::Impact;
use crate::utils::error::{Result, TopsisError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses a comma-separated weight list. Every weight must be a positive finite number.
pub fn parse_weights(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            let weight: f64 = part.parse().map_err(|_| TopsisError::InvalidWeight {
                value: part.to_string(),
                reason: "not a number".to_string(),
            })?;
            if !weight.is_finite() || weight <= 0.0 {
                return Err(TopsisError::InvalidWeight {
                    value: part.to_string(),
                    reason: "weights must be positive finite numbers".to_string(),
                });
            }
            Ok(weight)
        })
        .collect()
}

/// Splits a comma-separated impact list without interpreting the symbols.
pub fn split_impacts(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

pub fn parse_impacts(symbols: &[String]) -> Result<Vec<Impact>> {
    symbols.iter().map(|s| s.parse()).collect()
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TopsisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TopsisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TopsisError::InvalidConfigValueError {
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
        return Err(TopsisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// The csv reader only accepts single-byte delimiters.
pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        return Err(TopsisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter must be a single ASCII character other than a quote or newline"
                .to_string(),
        });
    }
    Ok(delimiter as u8)
}
