//! Persistence adapters for the `UserRepository` port.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use accounts::domain::AccountService;
//! use accounts::outbound::persistence::InMemoryUserRepository;
//!
//! let repository = Arc::new(InMemoryUserRepository::new());
//! let _service = AccountService::new(repository, Arc::new(mockable::DefaultClock));
//! ```

mod memory_user_repository;

pub use memory_user_repository::InMemoryUserRepository;
