//! Builders wiring the account service into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use accounts::domain::{AccountRules, AccountService};
use accounts::inbound::http::state::HttpState;
use accounts::outbound::persistence::InMemoryUserRepository;

/// Build handler state backed by the in-memory repository.
pub(super) fn build_http_state(rules: AccountRules) -> web::Data<HttpState> {
    let repository = Arc::new(InMemoryUserRepository::new());
    let service = AccountService::with_rules(repository, Arc::new(DefaultClock), rules);
    web::Data::new(HttpState::new(Arc::new(service)))
}
