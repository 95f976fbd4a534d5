//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para normalizar placas y validar
//! los datos que viajan en los drafts antes de enviarlos.

use chrono::{DateTime, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Longitud de una placa sin separadores (ABC1234 / ABC1D23)
pub const LICENSE_PLATE_LEN: usize = 7;

lazy_static! {
    // Formato antiguo (ABC1234) y Mercosul (ABC1D23)
    static ref LICENSE_PLATE_RE: Regex = Regex::new(r"^[A-Z]{3}[0-9][A-Z0-9][0-9]{2}$").unwrap();
}

/// Quitar separadores, pasar a mayúsculas y recortar a 7 caracteres
pub fn normalize_license_plate(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(LICENSE_PLATE_LEN)
        .collect()
}

/// Forma de presentación `ABC-1234`
pub fn format_license_plate(raw: &str) -> String {
    let cleaned = normalize_license_plate(raw);
    if cleaned.len() <= 3 {
        cleaned
    } else {
        format!("{}-{}", &cleaned[..3], &cleaned[3..])
    }
}

/// Validar una placa ya normalizada
pub fn validate_license_plate(value: &String) -> Result<(), ValidationError> {
    if LICENSE_PLATE_RE.is_match(value) {
        return Ok(());
    }
    let mut error = ValidationError::new("license_plate");
    error.add_param("value".into(), value);
    error.add_param("format".into(), &"ABC1234".to_string());
    Err(error)
}

/// Parsear la fecha de un histórico
///
/// Acepta `YYYY-MM-DD`, RFC 3339 y `DD/MM/YYYY`.
pub fn parse_history_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(value, "%d/%m/%Y").ok())
}

/// Validar la fecha de un histórico de mantenimiento
pub fn validate_history_date(value: &String) -> Result<(), ValidationError> {
    if parse_history_date(value).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("date");
    error.add_param("value".into(), value);
    error.add_param("format".into(), &"YYYY-MM-DD | DD/MM/YYYY".to_string());
    Err(error)
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_license_plate() {
        assert_eq!(normalize_license_plate("abc-1234"), "ABC1234");
        assert_eq!(normalize_license_plate(" aw3 5678 "), "AW35678");
        assert_eq!(normalize_license_plate("ABC-1234-XYZ"), "ABC1234");
        assert_eq!(normalize_license_plate(""), "");
    }

    #[test]
    fn test_format_license_plate() {
        assert_eq!(format_license_plate("ab"), "AB");
        assert_eq!(format_license_plate("abc1"), "ABC-1");
        assert_eq!(format_license_plate("abc1234"), "ABC-1234");
        assert_eq!(format_license_plate("ABC123456"), "ABC-1234");
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate(&"ABC1234".to_string()).is_ok());
        assert!(validate_license_plate(&"BRA2E19".to_string()).is_ok());
        assert!(validate_license_plate(&"ABC-1234".to_string()).is_err());
        assert!(validate_license_plate(&"AB1234".to_string()).is_err());
    }

    #[test]
    fn test_history_dates() {
        assert!(validate_history_date(&"2024-05-10".to_string()).is_ok());
        assert!(validate_history_date(&"10/05/2024".to_string()).is_ok());
        assert!(validate_history_date(&"2024-05-10T08:30:00Z".to_string()).is_ok());
        assert!(validate_history_date(&"31/02/2024".to_string()).is_err());
        assert_eq!(
            parse_history_date("10/05/2024"),
            NaiveDate::from_ymd_opt(2024, 5, 10)
        );
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty(&"x".to_string()).is_ok());
        assert!(validate_not_empty(&"   ".to_string()).is_err());
    }
}
