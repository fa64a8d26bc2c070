//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the `UserService` port and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account use-cases backing the `/user` routes.
    pub users: Arc<dyn UserService>,
}

impl HttpState {
    /// Construct state from a user service implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use accounts::domain::AccountService;
    /// use accounts::inbound::http::state::HttpState;
    /// use accounts::outbound::persistence::InMemoryUserRepository;
    ///
    /// let service = AccountService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(mockable::DefaultClock),
    /// );
    /// let _state = HttpState::new(Arc::new(service));
    /// ```
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}
