use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::models::Id;
use crate::serde_helpers::parse_clock_time;

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first message for a field wins.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Drop the error for a field the user just edited.
    pub fn clear_field(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    // Helpers used by the form validators.

    pub fn require(&mut self, field: &str, value: &str, label: &str) -> bool {
        if value.trim().is_empty() {
            self.insert(field, format!("{label} is required"));
            false
        } else {
            true
        }
    }

    pub fn require_id(&mut self, field: &str, value: &str, label: &str) -> Option<Id> {
        if !self.require(field, value, label) {
            return None;
        }
        match parse_id(value) {
            Some(id) => Some(id),
            None => {
                self.insert(field, format!("Select a valid {}", label.to_lowercase()));
                None
            }
        }
    }

    pub fn require_date(&mut self, field: &str, value: &str, label: &str) -> Option<NaiveDate> {
        if !self.require(field, value, label) {
            return None;
        }
        self.optional_date(field, value)
    }

    pub fn optional_date(&mut self, field: &str, value: &str) -> Option<NaiveDate> {
        if value.trim().is_empty() {
            return None;
        }
        let parsed = parse_date(value);
        if parsed.is_none() {
            self.insert(field, "Enter a date as YYYY-MM-DD");
        }
        parsed
    }

    pub fn require_time(&mut self, field: &str, value: &str, label: &str) -> Option<NaiveTime> {
        if !self.require(field, value, label) {
            return None;
        }
        self.optional_time(field, value)
    }

    pub fn optional_time(&mut self, field: &str, value: &str) -> Option<NaiveTime> {
        if value.trim().is_empty() {
            return None;
        }
        let parsed = parse_clock_time(value);
        if parsed.is_none() {
            self.insert(field, "Enter a time as HH:MM");
        }
        parsed
    }

    /// Optional whole number within `min..=max`.
    pub fn optional_number(&mut self, field: &str, value: &str, min: u32, max: u32) -> Option<u32> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match value.parse::<u32>() {
            Ok(n) if (min..=max).contains(&n) => Some(n),
            _ => {
                self.insert(field, format!("Enter a whole number between {min} and {max}"));
                None
            }
        }
    }

    pub fn check_email(&mut self, field: &str, value: &str) {
        if !value.trim().is_empty() && !is_valid_email(value) {
            self.insert(field, "Enter a valid email address");
        }
    }

    pub fn check_phone(&mut self, field: &str, value: &str) {
        if !value.trim().is_empty() && !is_valid_phone(value) {
            self.insert(field, "Enter a valid phone number");
        }
    }
}

/// `user@domain.tld`: one `@`, non-empty local part, dotted domain with
/// non-empty labels, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Digits with optional `+`, spaces, dashes and parentheses; 7 to 15 digits.
pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();
    allowed && (7..=15).contains(&digits)
}

/// Blank input becomes `None` so it is left out of the request body.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Comma-separated input to a list of trimmed, non-empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn parse_id(value: &str) -> Option<Id> {
    value.trim().parse::<Id>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_blank_and_non_positive() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
    }

    #[test]
    fn test_parse_date_is_iso_only() {
        assert_eq!(parse_date("2025-03-09"), NaiveDate::from_ymd_opt(2025, 3, 9));
        assert_eq!(parse_date("09/03/2025"), None);
    }

    #[test]
    fn test_email_validator() {
        for ok in ["user@domain.tld", "first.last@care.co.zw", "a+b@x.io"] {
            assert!(is_valid_email(ok), "{ok} should be accepted");
        }
        for bad in [
            "",
            "userdomain.tld",
            "user@",
            "@domain.tld",
            "user@domain",
            "user@domain.",
            "user@.tld",
            "us er@domain.tld",
            "a@b@c.tld",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_phone_validator() {
        assert!(is_valid_phone("+263 77 123 4567"));
        assert!(is_valid_phone("(04) 123-456"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me"));
    }

    #[test]
    fn test_optional_text_and_lists() {
        assert_eq!(optional_text("   "), None);
        assert_eq!(optional_text(" Harare "), Some("Harare".to_string()));
        assert_eq!(
            split_list("loud noises, , crowds ,bright lights"),
            vec!["loud noises", "crowds", "bright lights"]
        );
        assert_eq!(join_list(&split_list("a,b")), "a, b");
    }

    #[test]
    fn test_field_errors_first_message_wins_and_clears() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email is required");
        errors.insert("email", "Enter a valid email address");
        assert_eq!(errors.get("email"), Some("Email is required"));
        errors.clear_field("email");
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn test_require_helpers() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.require_id("carer", "", "Carer"), None);
        assert_eq!(errors.require_id("client", "abc", "Client"), None);
        assert_eq!(errors.require_date("date", "2025-02-30", "Date"), None);
        assert_eq!(errors.optional_number("rating", "9", 1, 5), None);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("client"), Some("Select a valid client"));
        assert_eq!(errors.get("carer"), Some("Carer is required"));
    }
}
