//! Domain primitives, ports and the default account service.
//!
//! Purpose: define strongly typed account entities used by the HTTP layer and
//! the persistence adapters. Types are immutable once constructed and document
//! their invariants and serialisation contracts in their own Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `UserId` / `ObjectId`: 24-hex object-id identifiers.
//! - `User`: account record returned to clients.
//! - `LoginCredentials` / `SignupDetails`: raw credentials handed to the
//!   user service.
//! - `AccountService`: default implementation of [`ports::UserService`].
//! - `TraceId`: request-scoped correlation identifier.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod object_id;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountRules, AccountService};
pub use self::auth::{LoginCredentials, SignupDetails};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::object_id::{ObjectId, ObjectIdError};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, User, UserId, UserValidationError, Username};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
