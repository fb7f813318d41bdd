//! Per-field validation primitives.
//!
//! Each API endpoint enumerates its field constraints through these typed
//! helpers, accumulating failures into a [`FieldErrors`] map that is
//! serialized verbatim into 422 response bodies. Constraints that pass
//! leave the map untouched; a non-empty map means the request must not
//! reach the persistence layer.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::CalendarDate;

/// Default maximum length for short string columns (VARCHAR(255)).
pub const MAX_STRING_LEN: usize = 255;
/// Maximum length for phone numbers.
pub const MAX_PHONE_LEN: usize = 20;
/// Maximum length for hex color codes (`#RRGGBB`).
pub const MAX_COLOR_CODE_LEN: usize = 7;

/// Accumulated validation failures, keyed by field name.
///
/// Ordered (BTreeMap) so error payloads are deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure message for a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Convert into a `Result`: `Ok(())` when no failures were recorded,
    /// otherwise `Err(CoreError::Validation)`.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

/// A required string field: present, non-blank, within `max_len`.
pub fn require_string(errors: &mut FieldErrors, field: &str, value: Option<&str>, max_len: usize) {
    match value {
        None => errors.push(field, format!("The {field} field is required")),
        Some(v) if v.trim().is_empty() => {
            errors.push(field, format!("The {field} field is required"));
        }
        Some(v) if v.chars().count() > max_len => {
            errors.push(
                field,
                format!("The {field} field must not exceed {max_len} characters"),
            );
        }
        Some(_) => {}
    }
}

/// An optional string field: when present, within `max_len`.
pub fn optional_string(errors: &mut FieldErrors, field: &str, value: Option<&str>, max_len: usize) {
    if let Some(v) = value {
        if v.chars().count() > max_len {
            errors.push(
                field,
                format!("The {field} field must not exceed {max_len} characters"),
            );
        }
    }
}

/// A required monetary amount: present and non-negative.
pub fn require_amount(errors: &mut FieldErrors, field: &str, value: Option<Decimal>) {
    match value {
        None => errors.push(field, format!("The {field} field is required")),
        Some(v) if v.is_sign_negative() => {
            errors.push(field, format!("The {field} field must not be negative"));
        }
        Some(_) => {}
    }
}

/// An optional monetary amount: when present, non-negative.
pub fn optional_amount(errors: &mut FieldErrors, field: &str, value: Option<Decimal>) {
    if let Some(v) = value {
        if v.is_sign_negative() {
            errors.push(field, format!("The {field} field must not be negative"));
        }
    }
}

/// A required date field.
pub fn require_date(errors: &mut FieldErrors, field: &str, value: Option<CalendarDate>) {
    if value.is_none() {
        errors.push(field, format!("The {field} field is required"));
    }
}

/// A required reference to another entity (foreign key id).
pub fn require_id(errors: &mut FieldErrors, field: &str, value: Option<i64>) {
    if value.is_none() {
        errors.push(field, format!("The {field} field is required"));
    }
}

/// Record a missing-referent failure for a foreign key field.
///
/// Referencing a non-existent parent is a validation error (422), not a
/// 404: the path resource exists, the payload is wrong.
pub fn missing_referent(errors: &mut FieldErrors, field: &str) {
    errors.push(field, format!("The selected {field} is invalid"));
}

/// A structurally valid email address: one `@` with non-empty local and
/// domain parts, the domain containing a dot.
pub fn email_format(errors: &mut FieldErrors, field: &str, value: &str) {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    let valid = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace);
    if !valid {
        errors.push(field, format!("The {field} field must be a valid email address"));
    }
}

/// An optional hex color code (`#RRGGBB` or `#RGB`).
pub fn optional_color_code(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if let Some(v) = value {
        let hex_ok = v.starts_with('#')
            && matches!(v.len(), 4 | 7)
            && v[1..].chars().all(|c| c.is_ascii_hexdigit());
        if v.chars().count() > MAX_COLOR_CODE_LEN || !hex_ok {
            errors.push(field, format!("The {field} field must be a hex color code"));
        }
    }
}

/// `end` must be strictly after `start` when both are present.
pub fn date_after(
    errors: &mut FieldErrors,
    field: &str,
    start: Option<CalendarDate>,
    end: Option<CalendarDate>,
) {
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            errors.push(field, format!("The {field} field must be after the start date"));
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn empty_errors_convert_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn require_string_rejects_missing_and_blank() {
        let mut errors = FieldErrors::new();
        require_string(&mut errors, "name", None, MAX_STRING_LEN);
        require_string(&mut errors, "location", Some("   "), MAX_STRING_LEN);
        assert!(errors.get("name").is_some());
        assert!(errors.get("location").is_some());
    }

    #[test]
    fn require_string_rejects_overlong() {
        let mut errors = FieldErrors::new();
        let long = "x".repeat(MAX_STRING_LEN + 1);
        require_string(&mut errors, "name", Some(&long), MAX_STRING_LEN);
        assert!(errors.get("name").is_some());
    }

    #[test]
    fn require_amount_rejects_negative() {
        let mut errors = FieldErrors::new();
        require_amount(&mut errors, "amount", Some(Decimal::from(-1)));
        assert!(errors.get("amount").is_some());

        let mut errors = FieldErrors::new();
        require_amount(&mut errors, "amount", Some(Decimal::ZERO));
        assert!(errors.is_empty());
    }

    #[test]
    fn email_format_accepts_plain_addresses() {
        let mut errors = FieldErrors::new();
        email_format(&mut errors, "email", "investor@example.com");
        assert!(errors.is_empty());
    }

    #[test]
    fn email_format_rejects_malformed() {
        for bad in ["no-at-sign", "@missing-local.com", "local@", "a@b", "a b@c.com"] {
            let mut errors = FieldErrors::new();
            email_format(&mut errors, "email", bad);
            assert!(errors.get("email").is_some(), "accepted: {bad}");
        }
    }

    #[test]
    fn color_code_accepts_hex_and_rejects_junk() {
        let mut errors = FieldErrors::new();
        optional_color_code(&mut errors, "color_code", Some("#FFA500"));
        optional_color_code(&mut errors, "color_code", None);
        assert!(errors.is_empty());

        let mut errors = FieldErrors::new();
        optional_color_code(&mut errors, "color_code", Some("orange"));
        assert!(errors.get("color_code").is_some());
    }

    #[test]
    fn date_after_rejects_end_before_start() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1);
        let end = NaiveDate::from_ymd_opt(2025, 2, 1);
        let mut errors = FieldErrors::new();
        date_after(&mut errors, "end_date", start, end);
        assert!(errors.get("end_date").is_some());

        let mut errors = FieldErrors::new();
        date_after(&mut errors, "end_date", end, start);
        assert!(errors.is_empty());
    }

    #[test]
    fn field_errors_serialize_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.push("name", "The name field is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"][0], "The name field is required");
    }
}
