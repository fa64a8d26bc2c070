//! Server settings loaded via OrthoConfig and the derived server configuration.

use std::net::{Ipv4Addr, SocketAddr};

use accounts::domain::AccountRules;
use accounts::inbound::http::session_config::SessionSettings;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const BCRYPT_MIN_COST: u32 = 4;
const BCRYPT_MAX_COST: u32 = 31;

/// Startup settings read from `ACCOUNTS_*` variables and CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct ServerSettings {
    /// Socket address to bind; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<SocketAddr>,
    /// bcrypt work factor for new password hashes.
    pub hash_cost: Option<u32>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Account rules with the configured hash cost applied.
    pub fn account_rules(&self) -> Result<AccountRules, ServerSettingsError> {
        let mut rules = AccountRules::default();
        if let Some(cost) = self.hash_cost {
            if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&cost) {
                return Err(ServerSettingsError::InvalidHashCost { cost });
            }
            rules.hash_cost = cost;
        }
        Ok(rules)
    }
}

/// Errors raised while validating server settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ServerSettingsError {
    #[error("ACCOUNTS_HASH_COST={cost} is outside the bcrypt range 4..=31")]
    InvalidHashCost { cost: u32 },
}

/// Everything `create_server` needs, validated up front.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) rules: AccountRules,
}

impl ServerConfig {
    /// Combine loaded settings with the session configuration.
    pub fn new(
        settings: &ServerSettings,
        session: SessionSettings,
    ) -> Result<Self, ServerSettingsError> {
        Ok(Self {
            session,
            bind_addr: settings.bind_addr(),
            rules: settings.account_rules()?,
        })
    }
}
