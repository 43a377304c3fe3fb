use crate::error::{ApiError, ApiResult};
use regex::Regex;
use std::sync::OnceLock;

/// Pulls a required body field out of its `Option`, or answers 400.
pub fn require<T>(value: Option<T>, field: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}

/// Required string field; whitespace-only counts as missing.
pub fn require_str(value: &Option<String>, field: &str) -> ApiResult<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ApiError::BadRequest(format!("{} is required", field))),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
    re.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_none() {
        let err = require::<i32>(None, "userId").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.to_string(), "userId is required");
    }

    #[test]
    fn require_str_rejects_blank() {
        assert!(require_str(&Some("   ".to_string()), "name").is_err());
        assert_eq!(require_str(&Some("Ada".to_string()), "name").unwrap(), "Ada");
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing@tld"));
    }
}
