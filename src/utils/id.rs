//! Path identifier parsing.

use crate::error::AppError;
use serde_json::json;

/// Parses a record id taken from a URL path segment.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with `"Malformatted id"` if the segment is
/// not a positive integer.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::bad_request(
            "Malformatted id",
            json!({ "id": raw }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = parse_id("5a422a851b54a676234d17f7").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Malformatted id");
    }

    #[test]
    fn test_parse_rejects_zero_and_negative() {
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_id("").is_err());
    }
}
