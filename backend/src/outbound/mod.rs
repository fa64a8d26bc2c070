//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **persistence**: account storage behind the `UserRepository` port.
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic beyond enforcing the
//! uniqueness constraints a real store would.

pub mod persistence;
