use chrono::NaiveDate;
use thiserror::Error;

/// Ошибка валидации данных агрегата или DTO
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    Required(&'static str),

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    #[error("Unknown value '{value}' for field '{field}'")]
    UnknownValue { field: &'static str, value: String },

    #[error("Field name '{0}' is not in the fillable field registry")]
    UnknownFillableField(String),

    #[error("Field path '{field_path}' is not registered for entity '{entity}'")]
    UnknownRegistryField { entity: String, field_path: String },
}

impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }
}

/// Проверка обязательного строкового поля
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Код в формате lowercase snake_case: `[a-z][a-z0-9_]*`, без `__` и `_` в конце
pub fn is_snake_case(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    if value.ends_with('_') || value.contains("__") {
        return false;
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Цвет в формате `#RRGGBB`
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Разбор даты ISO (`YYYY-MM-DD`)
pub fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| ValidationError::invalid(field, format!("expected YYYY-MM-DD ({})", e)))
}

/// Проверка необязательной даты ISO
pub fn validate_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_iso_date(field, v).map(Some),
        None => Ok(None),
    }
}

/// Количество цифр в строке (маски вроде `12.345.678/0001-90` допустимы)
pub fn digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Проверка необязательного UUID-идентификатора ссылки
pub fn validate_optional_ref(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        uuid::Uuid::parse_str(v)
            .map_err(|e| ValidationError::invalid(field, format!("invalid UUID: {}", e)))?;
    }
    Ok(())
}

/// Проверка обязательного UUID-идентификатора ссылки
pub fn validate_ref(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    validate_optional_ref(field, Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert!(is_snake_case("pending_documents"));
        assert!(is_snake_case("rnm"));
        assert!(is_snake_case("step_2"));
        assert!(!is_snake_case("Pending"));
        assert!(!is_snake_case("pending-documents"));
        assert!(!is_snake_case("_pending"));
        assert!(!is_snake_case("pending_"));
        assert!(!is_snake_case("a__b"));
        assert!(!is_snake_case("2step"));
        assert!(!is_snake_case(""));
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#1A2b3C"));
        assert!(!is_hex_color("1A2B3C"));
        assert!(!is_hex_color("#1A2B3"));
        assert!(!is_hex_color("#GGGGGG"));
    }

    #[test]
    fn test_dates() {
        assert!(parse_iso_date("date", "2025-02-28").is_ok());
        assert!(parse_iso_date("date", "2025-02-30").is_err());
        assert!(parse_iso_date("date", "28/02/2025").is_err());
        assert_eq!(validate_optional_date("date", None), Ok(None));
        assert_eq!(validate_optional_date("date", Some("  ")), Ok(None));
    }

    #[test]
    fn test_refs() {
        assert!(validate_ref("person_id", "").is_err());
        assert!(validate_ref("person_id", "not-a-uuid").is_err());
        assert!(validate_ref("person_id", &uuid::Uuid::new_v4().to_string()).is_ok());
        assert!(validate_optional_ref("passport_id", None).is_ok());
    }
}
