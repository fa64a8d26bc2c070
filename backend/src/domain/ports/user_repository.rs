//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId, Username};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// A unique field is already taken by another record.
    #[error("{field} is already registered")]
    Duplicate { field: &'static str },
}

impl UserPersistenceError {
    /// Helper for connection failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Stored account: the public user plus its password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredAccount {
    /// Public user record.
    pub user: User,
    /// bcrypt hash of the account password.
    pub password_hash: String,
}

impl std::fmt::Debug for StoredAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredAccount")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Driven port for account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account; rejects duplicate usernames or emails.
    async fn insert(&self, account: &StoredAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<StoredAccount>, UserPersistenceError>;

    /// Fetch an account by username, ignoring ASCII case.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredAccount>, UserPersistenceError>;

    /// Fetch an account by email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredAccount>, UserPersistenceError>;
}
