//! Input validation utilities
//!
//! Every rule runs at the request boundary, before any service or storage
//! component is invoked. Rules are enumerated per field: presence, length
//! bounds, email syntax, ISO-8601 date format.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const MAX_USERNAME_LEN: usize = 64;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MIN_PASSWORD_LEN: usize = 6;
/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_LEN: usize = 72;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_CATEGORY_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Collapse into an `ApiError::Validation` carrying all field errors
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_valid {
            Ok(())
        } else {
            let joined = self
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            Err(ApiError::Validation(joined))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates email syntax (local part, @, domain with a dot)
pub fn validate_email(email: &str) -> bool {
    use regex::Regex;

    let re = match Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$") {
        Ok(re) => re,
        Err(_) => return false,
    };
    email.len() <= MAX_EMAIL_LEN && re.is_match(email)
}

/// Parse an ISO-8601 deadline: RFC 3339 datetime or bare `YYYY-MM-DD` date
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc));
    }
    None
}

/// Rules for POST /api/auth/register
pub fn validate_registration(username: &str, email: &str, password: &str) -> ValidationResult {
    let mut result = ValidationResult::new();

    if username.trim().is_empty() {
        result.add_error("username", "Username is required");
    } else if username.trim().len() > MAX_USERNAME_LEN {
        result.add_error("username", "Username is too long");
    }

    if !validate_email(email.trim()) {
        result.add_error("email", "Please provide a valid email");
    }

    if password.len() < MIN_PASSWORD_LEN {
        result.add_error("password", "Password must be at least 6 characters");
    } else if password.len() > MAX_PASSWORD_LEN {
        result.add_error("password", "Password is too long");
    }

    result
}

/// Rules for POST /api/auth/login
pub fn validate_login(email: &str, password: &str) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !validate_email(email.trim()) {
        result.add_error("email", "Please provide a valid email");
    }
    if password.is_empty() {
        result.add_error("password", "Password is required");
    }

    result
}

/// Rules for POST /api/tasks
pub fn validate_new_task(
    title: &str,
    description: Option<&str>,
    category: &str,
    deadline: Option<&str>,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_title(&mut result, Some(title), true);
    check_description(&mut result, description);
    check_category(&mut result, Some(category), true);
    check_deadline(&mut result, deadline);

    result
}

/// Rules for PUT /api/tasks/{id}: title is required, the rest optional
pub fn validate_task_update(
    title: Option<&str>,
    description: Option<&str>,
    category: Option<&str>,
    deadline: Option<&str>,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_title(&mut result, title, true);
    check_description(&mut result, description);
    check_category(&mut result, category, false);
    check_deadline(&mut result, deadline);

    result
}

fn check_title(result: &mut ValidationResult, title: Option<&str>, required: bool) {
    match title {
        Some(t) if t.trim().is_empty() => result.add_error("title", "Title is required"),
        Some(t) if t.len() > MAX_TITLE_LEN => result.add_error("title", "Title is too long"),
        Some(_) => {}
        None if required => result.add_error("title", "Title is required"),
        None => {}
    }
}

fn check_description(result: &mut ValidationResult, description: Option<&str>) {
    if let Some(d) = description {
        if d.len() > MAX_DESCRIPTION_LEN {
            result.add_error("description", "Description is too long");
        }
    }
}

fn check_category(result: &mut ValidationResult, category: Option<&str>, required: bool) {
    match category {
        Some(c) if c.trim().is_empty() => result.add_error("category", "Category is required"),
        Some(c) if c.len() > MAX_CATEGORY_LEN => {
            result.add_error("category", "Category is too long")
        }
        Some(_) => {}
        None if required => result.add_error("category", "Category is required"),
        None => {}
    }
}

fn check_deadline(result: &mut ValidationResult, deadline: Option<&str>) {
    if let Some(d) = deadline {
        if parse_deadline(d).is_none() {
            result.add_error("deadline", "Invalid date");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_syntax() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("first.last@sub.example.org"));
        assert!(!validate_email("user"));
        assert!(!validate_email("user@nodot"));
        assert!(!validate_email("user name@example.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn deadline_accepts_dates_and_datetimes() {
        assert!(parse_deadline("2026-09-01").is_some());
        assert!(parse_deadline("2026-09-01T12:30:00Z").is_some());
        assert!(parse_deadline("2026-09-01T12:30:00+02:00").is_some());
        assert!(parse_deadline("not-a-date").is_none());
        assert!(parse_deadline("2026-13-40").is_none());
    }

    #[test]
    fn registration_rules() {
        assert!(validate_registration("alice", "alice@example.com", "secret1").is_valid);

        let missing_name = validate_registration("", "alice@example.com", "secret1");
        assert!(!missing_name.is_valid);
        assert_eq!(missing_name.errors[0].field, "username");

        let short_password = validate_registration("alice", "alice@example.com", "abc");
        assert!(!short_password.is_valid);
        assert_eq!(short_password.errors[0].field, "password");

        let bad_email = validate_registration("alice", "nope", "secret1");
        assert!(!bad_email.is_valid);
        assert_eq!(bad_email.errors[0].field, "email");
    }

    #[test]
    fn new_task_requires_title_and_category() {
        let result = validate_new_task("", None, "", None);
        assert!(!result.is_valid);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"category"));
    }

    #[test]
    fn update_requires_title_but_not_category() {
        let result = validate_task_update(Some("t"), None, None, Some("2026-01-01"));
        assert!(result.is_valid);

        let result = validate_task_update(None, None, None, None);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "title");
    }
}
