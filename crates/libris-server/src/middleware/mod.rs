//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Access control per route group ([`RouterAccessExt`])
//! - Panic and timeout recovery ([`RouterRecoveryExt`])
//! - Request ids and tracing ([`RouterObservabilityExt`])
//! - CORS and body limits ([`RouterSecurityExt`])
//! - OpenAPI document and Scalar UI ([`RouterOpenApiExt`])
//!
//! # Usage
//!
//! ```rust,ignore
//! let router = handler::routes(state.clone())
//!     .with_open_api(&OpenApiConfig::default())
//!     .with_state(state)
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery();
//! ```

mod access;
mod observability;
mod recovery;
mod security;
mod specification;

pub use access::{AccessGuard, IdentityRequirement, RouterAccessExt, enforce_access};
pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{RouterSecurityExt, SecurityConfig};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
