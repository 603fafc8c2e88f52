//! Client-side input validation
//!
//! Validation failures block submission locally and are never sent to the
//! server; the command layer surfaces them as inline messages.

use modbay_domain::constants::{MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH};
use thiserror::Error;
use url::Url;

/// Local validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Not a valid GitHub repository URL")]
    InvalidGithubUrl,
}

/// Reject empty (or whitespace-only) required fields
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Validate a username for profile updates and registration
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    require("username", username)?;
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong { field: "username", max: MAX_USERNAME_LENGTH });
    }
    Ok(())
}

/// Validate a new password together with its confirmation field
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    require("password", password)?;
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LENGTH });
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Validate a GitHub repository URL (`https://github.com/{owner}/{repo}`)
pub fn validate_github_url(raw: &str) -> Result<(), ValidationError> {
    require("github_url", raw)?;

    let url = Url::parse(raw.trim()).map_err(|_| ValidationError::InvalidGithubUrl)?;
    if url.scheme() != "https" || url.host_str() != Some("github.com") {
        return Err(ValidationError::InvalidGithubUrl);
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|parts| parts.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();
    if segments.len() != 2 {
        return Err(ValidationError::InvalidGithubUrl);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert_eq!(require("email", "   "), Err(ValidationError::Required { field: "email" }));
        assert!(require("email", "a@b.c").is_ok());
    }

    #[test]
    fn password_rules() {
        assert_eq!(
            validate_new_password("short", "short"),
            Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LENGTH })
        );
        assert_eq!(
            validate_new_password("long enough", "different"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_new_password("long enough", "long enough").is_ok());
    }

    #[test]
    fn github_url_accepts_owner_repo() {
        assert!(validate_github_url("https://github.com/modbay/sakura-theme").is_ok());
        assert!(validate_github_url("https://github.com/modbay/sakura-theme/").is_ok());
    }

    #[test]
    fn github_url_rejects_other_shapes() {
        for bad in [
            "",
            "github.com/modbay/sakura-theme",
            "http://github.com/modbay/sakura-theme",
            "https://gitlab.com/modbay/sakura-theme",
            "https://github.com/modbay",
            "https://github.com/modbay/repo/tree/main",
        ] {
            assert!(validate_github_url(bad).is_err(), "{bad} should be rejected");
        }
    }
}
