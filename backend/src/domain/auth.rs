//! Raw credentials handed to the user service.
//!
//! The HTTP layer passes login and signup payloads through verbatim; the user
//! service owns every business rule. Passwords are wiped from memory on drop
//! and never appear in `Debug` output.

use std::fmt;

use zeroize::Zeroizing;

/// Username/password pair submitted to `POST /user/login`.
///
/// # Examples
/// ```
/// use accounts::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("ada", "correct horse");
/// assert_eq!(creds.username(), "ada");
/// assert!(!format!("{creds:?}").contains("correct horse"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Wrap raw login inputs without validating them.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username exactly as submitted.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account details submitted to `POST /user/signup`.
#[derive(Clone, PartialEq, Eq)]
pub struct SignupDetails {
    username: String,
    email: String,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Wrap raw signup inputs without validating them.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Requested username exactly as submitted.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Email exactly as submitted.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignupDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupDetails")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("  ada  ", " pw ")]
    fn login_credentials_keep_inputs_verbatim(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::new(username, password);
        assert_eq!(creds.username(), username);
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn signup_debug_redacts_password() {
        let details = SignupDetails::new("ada", "ada@example.com", "hunter22");
        let rendered = format!("{details:?}");
        assert!(rendered.contains("ada@example.com"));
        assert!(!rendered.contains("hunter22"));
    }
}
