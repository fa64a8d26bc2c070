//! Default account service implementing the `UserService` driving port.
//!
//! Owns the signup and login rules: field validation, uniqueness checks and
//! bcrypt password hashing. Business-rule failures come back as
//! [`AccountOutcome::rejected`]; repository or hashing failures become
//! [`Error`]s.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountOutcome, StoredAccount, UserPersistenceError, UserRepository, UserService,
};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, ObjectId, SignupDetails, TraceId, User, UserId,
    Username,
};

/// Message returned for any failed login so callers cannot probe usernames.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
const USERNAME_TAKEN: &str = "username is already registered";
const EMAIL_TAKEN: &str = "email is already registered";

/// bcrypt only reads this many bytes of a password; anything beyond is ignored.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Tunable account rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRules {
    /// bcrypt work factor.
    pub hash_cost: u32,
    /// Minimum password length in characters.
    pub password_min: usize,
    /// Maximum password length in characters.
    pub password_max: usize,
}

impl Default for AccountRules {
    fn default() -> Self {
        Self {
            hash_cost: bcrypt::DEFAULT_COST,
            password_min: 8,
            password_max: 128,
        }
    }
}

/// Account service backed by a [`UserRepository`].
#[derive(Clone)]
pub struct AccountService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock + Send + Sync>,
    rules: AccountRules,
}

impl<R> AccountService<R> {
    /// Create a service with default rules.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self::with_rules(repository, clock, AccountRules::default())
    }

    /// Create a service with explicit rules.
    pub fn with_rules(
        repository: Arc<R>,
        clock: Arc<dyn Clock + Send + Sync>,
        rules: AccountRules,
    ) -> Self {
        Self {
            repository,
            clock,
            rules,
        }
    }

    fn check_password(&self, password: &str) -> Result<(), String> {
        let length = password.chars().count();
        let AccountRules {
            password_min,
            password_max,
            ..
        } = self.rules;
        if !(password_min..=password_max).contains(&length) {
            return Err(format!(
                "password must be between {password_min} and {password_max} characters"
            ));
        }
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(format!("password must not exceed {PASSWORD_MAX_BYTES} bytes"));
        }
        Ok(())
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => {
            Error::internal(format!("unexpected duplicate {field}"))
        }
    }
}

async fn run_blocking<F, T>(work: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    TraceId::spawn_blocking(work)
        .await
        .map_err(|err| Error::internal(format!("blocking task failed: {err}")))
}

async fn hash_password(password: &str, cost: u32) -> Result<String, Error> {
    let password = Zeroizing::new(password.to_owned());
    run_blocking(move || bcrypt::hash(password.as_str(), cost))
        .await?
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

async fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let password = Zeroizing::new(password.to_owned());
    let hash = hash.to_owned();
    run_blocking(move || bcrypt::verify(password.as_str(), &hash))
        .await?
        .map_err(|err| Error::internal(format!("password verification failed: {err}")))
}

#[async_trait]
impl<R> UserService for AccountService<R>
where
    R: UserRepository + 'static,
{
    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
        let account = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?;
        Ok(account.map(|stored| stored.user))
    }

    async fn signup(&self, details: &SignupDetails) -> Result<AccountOutcome, Error> {
        let username = match Username::new(details.username()) {
            Ok(value) => value,
            Err(err) => return Ok(AccountOutcome::rejected(err.to_string())),
        };
        let email = match EmailAddress::new(details.email()) {
            Ok(value) => value,
            Err(err) => return Ok(AccountOutcome::rejected(err.to_string())),
        };
        if let Err(message) = self.check_password(details.password()) {
            return Ok(AccountOutcome::rejected(message));
        }

        let by_username = self
            .repository
            .find_by_username(&username)
            .await
            .map_err(map_persistence_error)?;
        if by_username.is_some() {
            return Ok(AccountOutcome::rejected(USERNAME_TAKEN));
        }
        let by_email = self
            .repository
            .find_by_email(&email)
            .await
            .map_err(map_persistence_error)?;
        if by_email.is_some() {
            return Ok(AccountOutcome::rejected(EMAIL_TAKEN));
        }

        let password_hash = hash_password(details.password(), self.rules.hash_cost).await?;
        let created_at = self.clock.utc();
        let user = User::new(
            UserId::from(ObjectId::generate_at(created_at)),
            username,
            email,
            created_at,
        );
        let account = StoredAccount {
            user: user.clone(),
            password_hash,
        };

        match self.repository.insert(&account).await {
            Ok(()) => {}
            // Lost a race with a concurrent signup for the same name or email.
            Err(UserPersistenceError::Duplicate { field }) => {
                return Ok(AccountOutcome::rejected(format!("{field} is already registered")));
            }
            Err(err) => return Err(map_persistence_error(err)),
        }

        info!(user_id = %user.id(), username = %user.username(), "account registered");
        Ok(AccountOutcome::accepted(user))
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AccountOutcome, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Ok(AccountOutcome::rejected(INVALID_CREDENTIALS));
        };
        let Some(account) = self
            .repository
            .find_by_username(&username)
            .await
            .map_err(map_persistence_error)?
        else {
            debug!(username = %username, "login for unknown username");
            return Ok(AccountOutcome::rejected(INVALID_CREDENTIALS));
        };

        // A longer password would verify against its truncated prefix.
        if credentials.password().len() > PASSWORD_MAX_BYTES {
            debug!(user_id = %account.user.id(), "login with over-long password");
            return Ok(AccountOutcome::rejected(INVALID_CREDENTIALS));
        }
        if !verify_password(credentials.password(), &account.password_hash).await? {
            debug!(user_id = %account.user.id(), "login with wrong password");
            return Ok(AccountOutcome::rejected(INVALID_CREDENTIALS));
        }
        Ok(AccountOutcome::accepted(account.user))
    }
}
