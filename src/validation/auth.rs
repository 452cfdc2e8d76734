use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{AccountDirectory, FieldErrors, ValidationError};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

pub const USERNAME_MAX_CHARS: usize = 12;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterForm {
    /// Runs every rule. The backend is only asked about values that are
    /// already well-formed; an unanswered lookup does not block registration.
    pub async fn validate(&self, directory: &dyn AccountDirectory) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();

        if check_email_format(&self.email, &mut errors)
            && directory.email_exists(&self.email).await == Some(true)
        {
            errors.add("email", "This email address is already registered");
        }

        let username_len = self.username.chars().count();
        if username_len == 0 {
            errors.add("username", "Please enter a username");
        } else if username_len > USERNAME_MAX_CHARS {
            errors.add("username", "Username cannot exceed 12 characters");
        } else if directory.username_exists(&self.username).await == Some(true) {
            errors.add("username", "This username is already taken");
        }

        check_password_strength(&self.password, &mut errors);

        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// The email must be known to the backend; an unanswered lookup counts
    /// as unknown.
    pub async fn validate(&self, directory: &dyn AccountDirectory) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();

        if check_email_format(&self.email, &mut errors)
            && directory.email_exists(&self.email).await != Some(true)
        {
            errors.add("email", "This email address is not registered");
        }

        let password_len = self.password.chars().count();
        if password_len == 0 {
            errors.add("password", "Password cannot be empty");
        } else if password_len > PASSWORD_MAX_CHARS {
            errors.add("password", "Password cannot exceed 32 characters");
        }

        errors.into_result()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

fn check_email_format(email: &str, errors: &mut FieldErrors) -> bool {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
        return false;
    }
    if !is_valid_email(email) {
        errors.add("email", "Please enter a valid email address");
        return false;
    }
    true
}

fn check_password_strength(password: &str, errors: &mut FieldErrors) {
    let len = password.chars().count();
    if len < PASSWORD_MIN_CHARS {
        errors.add("password", "Password must be at least 6 characters.");
    }
    if len > PASSWORD_MAX_CHARS {
        errors.add("password", "Password cannot exceed 32 characters.");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.add("password", "Password must contain at least one uppercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.add("password", "Password must contain at least one lowercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.add("password", "Password must contain at least one number.");
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        errors.add("password", "Password must contain at least one special character.");
    }
}
