//! Request extractors with JSON rejections.
//!
//! ## Authentication
//!
//! - [`AuthHeader`] verifies the bearer token.
//! - [`AuthState`] also loads the caller from the store.
//! - [`AuthClaims`] issues and verifies identity tokens.
//!
//! ## Request data
//!
//! - [`Json`] and [`Path`] reject with [`Error`] bodies.
//! - [`ValidateJson`] runs `validator` rules after deserializing.
//!
//! [`Error`]: crate::handler::Error

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthHeader, AuthState, TokenError};
pub use crate::extract::reject::{Json, Path, ValidateJson};
