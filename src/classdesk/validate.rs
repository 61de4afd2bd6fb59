//! Form validation shared by the directory and the session.
//!
//! Every check collects all failing fields instead of stopping at the first one, so a
//! client can show each message next to its field.

use crate::model::{StudentFields, StudentInput};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Validates raw student input. Name and email are trimmed; attendance must be a whole
/// number and is not range-checked.
pub fn student_fields(input: &StudentInput) -> Result<StudentFields, ValidationError> {
    let mut err = ValidationError::default();
    let name = input.name.trim();
    let email = input.email.trim();

    if name.is_empty() {
        err.push("name", "Name is required");
    }
    if email.is_empty() {
        err.push("email", "Email is required");
    }
    let attendance = match input.attendance.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            err.push("attendance", "Attendance must be a whole number");
            None
        }
    };

    match attendance {
        Some(attendance) if err.is_empty() => Ok(StudentFields {
            name: name.to_string(),
            email: email.to_string(),
            attendance,
        }),
        _ => Err(err),
    }
}

/// `local@domain.tld` shape: no whitespace, a single `@`, and a dot inside the domain
/// with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn check_email(err: &mut ValidationError, email: &str) {
    if email.is_empty() {
        err.push("email", "Email is required");
    } else if !is_valid_email(email) {
        err.push("email", "Please enter a valid email");
    }
}

fn check_password(err: &mut ValidationError, password: &str, min_len: usize) {
    if password.is_empty() {
        err.push("password", "Password is required");
    } else if password.chars().count() < min_len {
        err.push(
            "password",
            format!("Password must be at least {} characters", min_len),
        );
    }
}

pub const LOGIN_MIN_PASSWORD: usize = 6;
pub const SIGNUP_MIN_PASSWORD: usize = 8;

pub fn login_form(email: &str, password: &str) -> Result<(), ValidationError> {
    let mut err = ValidationError::default();
    check_email(&mut err, email);
    check_password(&mut err, password, LOGIN_MIN_PASSWORD);
    err.into_result()
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}

pub fn signup_form(form: &SignupForm) -> Result<(), ValidationError> {
    let mut err = ValidationError::default();

    if form.fullname.is_empty() {
        err.push("name", "Full name is required");
    } else if form.fullname.chars().count() < 2 {
        err.push("name", "Name must be at least 2 characters");
    }

    check_email(&mut err, &form.email);
    check_password(&mut err, &form.password, SIGNUP_MIN_PASSWORD);

    if form.confirm_password.is_empty() {
        err.push("confirm", "Please confirm your password");
    } else if form.password != form.confirm_password {
        err.push("confirm", "Passwords do not match");
    }

    if !form.accepted_terms {
        err.push("terms", "Please agree to the Terms of Service");
    }

    err.into_result()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PasswordStrength {
    pub percent: f64,
    pub level: StrengthLevel,
}

pub fn password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    let mut score: f64 = 0.0;

    if len >= 8 {
        score += 25.0;
    }
    if len >= 12 {
        score += 25.0;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 12.5;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 12.5;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 12.5;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 12.5;
    }

    let percent = score.min(100.0);
    let level = if percent >= 75.0 {
        StrengthLevel::Strong
    } else if percent >= 50.0 {
        StrengthLevel::Medium
    } else {
        StrengthLevel::Weak
    };

    PasswordStrength { percent, level }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_fields_trims_and_parses() {
        let fields = student_fields(&StudentInput::new("  Ram ", " ram@x.com ", " 90 ")).unwrap();
        assert_eq!(fields.name, "Ram");
        assert_eq!(fields.email, "ram@x.com");
        assert_eq!(fields.attendance, 90);
    }

    #[test]
    fn student_fields_reports_every_bad_field() {
        let err = student_fields(&StudentInput::new(" ", "", "ninety")).unwrap_err();
        assert_eq!(err.errors.len(), 3);
        assert_eq!(err.for_field("name"), Some("Name is required"));
        assert_eq!(err.for_field("email"), Some("Email is required"));
        assert_eq!(
            err.for_field("attendance"),
            Some("Attendance must be a whole number")
        );
    }

    #[test]
    fn attendance_is_not_clamped() {
        let fields = student_fields(&StudentInput::new("A", "a@b.c", "150")).unwrap();
        assert_eq!(fields.attendance, 150);
        let fields = student_fields(&StudentInput::new("A", "a@b.c", "-3")).unwrap();
        assert_eq!(fields.attendance, -3);
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@school.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn login_form_messages() {
        let err = login_form("", "").unwrap_err();
        assert_eq!(err.for_field("email"), Some("Email is required"));
        assert_eq!(err.for_field("password"), Some("Password is required"));

        let err = login_form("nope", "12345").unwrap_err();
        assert_eq!(err.for_field("email"), Some("Please enter a valid email"));
        assert_eq!(
            err.for_field("password"),
            Some("Password must be at least 6 characters")
        );

        assert!(login_form("t@school.edu", "123456").is_ok());
    }

    #[test]
    fn signup_form_checks_confirmation_and_terms() {
        let form = SignupForm {
            fullname: "A".into(),
            email: "a@b.com".into(),
            password: "longenough".into(),
            confirm_password: "different".into(),
            accepted_terms: false,
        };
        let err = signup_form(&form).unwrap_err();
        assert_eq!(
            err.for_field("name"),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(err.for_field("confirm"), Some("Passwords do not match"));
        assert!(err.for_field("terms").is_some());
        assert!(err.for_field("password").is_none());
    }

    #[test]
    fn signup_form_accepts_complete_form() {
        let form = SignupForm {
            fullname: "Asha Rao".into(),
            email: "asha@school.edu".into(),
            password: "correct-horse".into(),
            confirm_password: "correct-horse".into(),
            accepted_terms: true,
        };
        assert!(signup_form(&form).is_ok());
    }

    #[test]
    fn strength_thresholds() {
        let weak = password_strength("abc");
        assert_eq!(weak.percent, 12.5);
        assert_eq!(weak.level, StrengthLevel::Weak);

        // 25 (len 8) + 12.5 lower + 12.5 digit
        let medium = password_strength("abcdef12");
        assert_eq!(medium.percent, 50.0);
        assert_eq!(medium.level, StrengthLevel::Medium);

        let strong = password_strength("Abcdefgh1234!");
        assert_eq!(strong.percent, 100.0);
        assert_eq!(strong.level, StrengthLevel::Strong);
    }
}
