//! In-memory `UserRepository` adapter.
//!
//! Accounts live for the lifetime of the process. Username and email indexes
//! are kept beside the primary map and updated under the same write lock, so
//! uniqueness holds even when two signups race.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{StoredAccount, UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, UserId, Username};

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<UserId, StoredAccount>,
    by_username: HashMap<String, UserId>,
    by_email: HashMap<String, UserId>,
}

impl Accounts {
    fn lookup(&self, id: Option<&UserId>) -> Option<StoredAccount> {
        id.and_then(|id| self.by_id.get(id)).cloned()
    }
}

/// Process-local account store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<Accounts>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.by_id.len()
    }

    /// Whether the repository holds no accounts.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &StoredAccount) -> Result<(), UserPersistenceError> {
        let user = &account.user;
        let username_key = user.username().normalized();
        let email_key = user.email().as_ref().to_owned();

        let mut accounts = self.accounts.write().await;
        if accounts.by_username.contains_key(&username_key) {
            return Err(UserPersistenceError::Duplicate { field: "username" });
        }
        if accounts.by_email.contains_key(&email_key) {
            return Err(UserPersistenceError::Duplicate { field: "email" });
        }
        if accounts.by_id.contains_key(user.id()) {
            return Err(UserPersistenceError::Duplicate { field: "id" });
        }

        accounts.by_username.insert(username_key, user.id().clone());
        accounts.by_email.insert(email_key, user.id().clone());
        accounts.by_id.insert(user.id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<StoredAccount>, UserPersistenceError> {
        Ok(self.accounts.read().await.by_id.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredAccount>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.lookup(accounts.by_username.get(&username.normalized())))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredAccount>, UserPersistenceError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.lookup(accounts.by_email.get(email.as_ref())))
    }
}
