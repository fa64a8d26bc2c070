//! Domain ports defining the edges of the hexagon.
//!
//! `UserService` is the driving port the HTTP handlers call;
//! `UserRepository` is the driven port persistence adapters implement. Each
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants.

mod user_repository;
mod user_service;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredAccount, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::{AccountOutcome, UserService};
