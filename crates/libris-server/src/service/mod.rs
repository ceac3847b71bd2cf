//! Application state, configuration and the services handlers depend on.

mod config;
mod security;
mod state;
mod store;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::security::{
    Action, CredentialHasher, DIGEST_HEX_LEN, RoleRightsExt, Rights, SESSION_ALGORITHM,
    SessionKeys, SessionKeysConfig, UnknownRole, parse_role, rights_of,
};
pub use crate::service::state::{RegistrationPolicy, ServiceState};
pub use crate::service::store::{BookStore, MemoryStore, PgStore, ServiceStore, Store, UserStore};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};
