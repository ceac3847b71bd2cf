//! Identity tokens and the extractors that verify them.
//!
//! - [`AuthClaims`] issues and verifies tokens.
//! - [`AuthHeader`] reads and verifies the bearer token of a request.
//! - [`AuthState`] additionally loads the caller from the store.

mod auth_claims;
mod auth_header;
mod auth_state;

pub use self::auth_claims::{AuthClaims, TokenError};
pub use self::auth_header::AuthHeader;
pub use self::auth_state::AuthState;
