//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! específicos del dominio de flota.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // Matrícula en formato Mercosur: AAA0A00 (acepta también el formato viejo AAA0000)
    static ref PLATE_REGEX: Regex = Regex::new(r"^[A-Z]{3}[0-9][A-Z0-9][0-9]{2}$").unwrap();
}

/// Validar formato de matrícula
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_REGEX.is_match(value) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"AAA0A00".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor numérico no sea negativo
pub fn validate_non_negative<T>(value: &T) -> Result<(), ValidationError>
where
    T: num_traits::Zero + PartialOrd + std::fmt::Display,
{
    if *value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("actual".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Convertir un mes "YYYY-MM" al rango [inicio, fin) en UTC
pub fn parse_year_month(value: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    let invalid = |value: &str| {
        let mut error = ValidationError::new("year_month");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM".to_string());
        error
    };

    let first_day = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .map_err(|_| invalid(value))?;

    let (next_year, next_month) = if first_day.month0() == 11 {
        (first_day.year() + 1, 1)
    } else {
        (first_day.year(), first_day.month() + 1)
    };
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(|| invalid(value))?;

    let start = first_day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| invalid(value))?;
    let end = next_first
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| invalid(value))?;

    Ok((
        DateTime::<Utc>::from_naive_utc_and_offset(start, Utc),
        DateTime::<Utc>::from_naive_utc_and_offset(end, Utc),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_plate_mercosur() {
        assert!(validate_plate("ABC1D23").is_ok());
        assert!(validate_plate("XYZ9Z99").is_ok());
    }

    #[test]
    fn test_validate_plate_old_format() {
        assert!(validate_plate("ABC1234").is_ok());
    }

    #[test]
    fn test_validate_plate_invalid() {
        assert!(validate_plate("abc1d23").is_err());
        assert!(validate_plate("AB1D23").is_err());
        assert!(validate_plate("ABCD123").is_err());
        assert!(validate_plate("ABC1D234").is_err());
        assert!(validate_plate("").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(1050, 2)).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_parse_year_month() {
        let (start, end) = parse_year_month("2025-03").expect("mes válido");
        assert_eq!(start.month(), 3);
        assert_eq!(end.month(), 4);
        assert_eq!(start.day(), 1);
    }

    #[test]
    fn test_parse_year_month_december_rolls_over() {
        let (start, end) = parse_year_month("2025-12").expect("mes válido");
        assert_eq!(start.year(), 2025);
        assert_eq!(end.year(), 2026);
        assert_eq!(end.month(), 1);
    }

    #[test]
    fn test_parse_year_month_invalid() {
        assert!(parse_year_month("2025").is_err());
        assert!(parse_year_month("2025-13").is_err());
        assert!(parse_year_month("marzo").is_err());
    }
}
