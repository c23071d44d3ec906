//! Utilidades de validación
//!
//! Funciones helper usadas por los `#[validate(custom = ...)]` de los DTOs.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Validar y convertir string a datetime (RFC 3339)
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

pub fn validate_datetime(value: &str) -> Result<(), ValidationError> {
    parse_datetime(value).map(|_| ())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_datetime() {
        assert_eq!(
            parse_datetime("2024-01-01T10:00:00Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
        );
        // offsets se normalizan a UTC
        assert_eq!(
            parse_datetime("2024-01-01T12:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
        );
        assert!(parse_datetime("10:00").is_err());
        assert!(parse_datetime("").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Sam").is_ok());
        assert!(validate_not_blank("  ").is_err());
        assert!(validate_not_blank("").is_err());
    }
}
