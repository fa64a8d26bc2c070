//! Driving port for account use-cases.
//!
//! Inbound adapters call this port to look users up, register accounts and
//! check credentials without knowing the backing infrastructure, so handler
//! tests can substitute a double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, ErrorCode, LoginCredentials, SignupDetails, User, UserId};

/// Result of a signup or login attempt.
///
/// Business-rule rejections are reported through `error` rather than as an
/// [`Error`]; infrastructure failures use the outer `Result` instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountOutcome {
    /// The registered or authenticated user.
    pub user: Option<User>,
    /// Human-readable reason the request was rejected.
    pub error: Option<String>,
}

impl AccountOutcome {
    /// Successful outcome carrying `user`.
    pub fn accepted(user: User) -> Self {
        Self {
            user: Some(user),
            error: None,
        }
    }

    /// Rejected outcome carrying a client-facing `message`.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            user: None,
            error: Some(message.into()),
        }
    }

    /// Translate into the handler result.
    ///
    /// A reported error wins over any user; an outcome with neither is an
    /// internal failure described by `missing_user`.
    ///
    /// # Examples
    /// ```
    /// use accounts::domain::ErrorCode;
    /// use accounts::domain::ports::AccountOutcome;
    ///
    /// let err = AccountOutcome::rejected("Username already taken")
    ///     .into_user("User could not be created")
    ///     .expect_err("rejections fail");
    /// assert_eq!(err.code(), ErrorCode::InvalidRequest);
    ///
    /// let err = AccountOutcome::default()
    ///     .into_user("User could not be created")
    ///     .expect_err("empty outcomes fail");
    /// assert_eq!(err.code(), ErrorCode::InternalError);
    /// ```
    pub fn into_user(self, missing_user: &str) -> Result<User, Error> {
        match self {
            Self {
                error: Some(message),
                ..
            } => Err(rejection(message)),
            Self {
                user: Some(user), ..
            } => Ok(user),
            Self {
                user: None,
                error: None,
            } => Err(Error::internal(missing_user)),
        }
    }
}

fn rejection(message: String) -> Error {
    // A blank rejection still has to reach the client as a 400.
    Error::try_new(ErrorCode::InvalidRequest, message)
        .unwrap_or_else(|_| Error::invalid_request("request rejected"))
}

/// Domain use-case port for account lookups, signup and login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch a user by identifier; `Ok(None)` when no such user exists.
    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, Error>;

    /// Register a new account.
    async fn signup(&self, details: &SignupDetails) -> Result<AccountOutcome, Error>;

    /// Check credentials and return the matching account.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccountOutcome, Error>;
}
